//! Named routes and an ordered, name-unique route collection.

use crate::Coordinate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A named, ordered sequence of coordinates.
///
/// Point order defines the travel direction and distance accumulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Human readable name (segment name or track file name).
    pub name: String,
    /// Ordered route geometry.
    pub points: Vec<Coordinate>,
}

impl Route {
    /// Create a new route.
    pub fn new(name: impl Into<String>, points: Vec<Coordinate>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Number of points in the route.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the route has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Ordered collection of routes with unique names.
///
/// Inserting a route whose name is already taken renames it with the first
/// free ` (n)` suffix starting at 2, so no route is ever overwritten.
#[derive(Debug, Clone, Default)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, returning the (possibly suffixed) name it was stored under.
    pub fn insert(&mut self, mut route: Route) -> &str {
        if self.contains(&route.name) {
            let base = route.name.clone();
            let mut n = 2;
            let mut candidate = format!("{} ({})", base, n);
            while self.contains(&candidate) {
                n += 1;
                candidate = format!("{} ({})", base, n);
            }
            debug!("Route name '{}' already used, storing as '{}'", base, candidate);
            route.name = candidate;
        }
        self.routes.push(route);
        let last = self.routes.len() - 1;
        &self.routes[last].name
    }

    /// Whether a route with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.routes.iter().any(|r| r.name == name)
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Routes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Consume the set, yielding routes in insertion order.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}

impl<'a> IntoIterator for &'a RouteSet {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

impl FromIterator<Route> for RouteSet {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        let mut set = RouteSet::new();
        for route in iter {
            set.insert(route);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(name: &str) -> Route {
        Route::new(name, vec![Coordinate::new(51.0, 3.0)])
    }

    #[test]
    fn test_duplicate_names_are_suffixed() {
        let set: RouteSet = ["A", "A", "B", "A"].into_iter().map(route).collect();
        let names: Vec<&str> = set.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "A (2)", "B", "A (3)"]);
    }

    #[test]
    fn test_suffix_skips_taken_names() {
        let mut set = RouteSet::new();
        set.insert(route("Climb (2)"));
        set.insert(route("Climb"));
        let stored = set.insert(route("Climb")).to_string();
        assert_eq!(stored, "Climb (3)");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_lookup_by_name() {
        let set: RouteSet = ["Kemmelberg", "Muur"].into_iter().map(route).collect();
        assert!(set.get("Muur").is_some());
        assert!(set.get("Paterberg").is_none());
    }
}
