//! Whole-degree tile keys and SRTM-style tile naming.

use crate::tile::TileBounds;
use std::fmt;

/// Tile key based on the southwest corner of the tile.
///
/// Tile `N51E003` covers latitudes [51, 52) and longitudes [3, 4);
/// tile `S34W071` covers latitudes [-34, -33) and longitudes [-71, -70).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    /// Latitude of the southwest corner (negative for south).
    pub lat: i32,
    /// Longitude of the southwest corner (negative for west).
    pub lon: i32,
}

impl TileKey {
    /// Create a tile key from its southwest corner.
    pub const fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    /// Create a tile key for a given coordinate.
    ///
    /// Both axes are floored, so (47.5, -122.5) lands in `N47W123`.
    pub fn from_coord(lat: f64, lon: f64) -> Self {
        Self {
            lat: lat.floor() as i32,
            lon: lon.floor() as i32,
        }
    }

    /// Parse a key from a file name like `N51E003.hgt` or `s34w071.tif`.
    ///
    /// Anything after the `{N|S}dd{E|W}ddd` stem is ignored.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let upper = filename.to_ascii_uppercase();
        let mut chars = upper.chars().peekable();

        let lat_sign = match chars.next()? {
            'N' => 1,
            'S' => -1,
            _ => return None,
        };
        let mut lat_str = String::new();
        while let Some(d) = chars.next_if(|c| c.is_ascii_digit()) {
            lat_str.push(d);
        }

        let lon_sign = match chars.next()? {
            'E' => 1,
            'W' => -1,
            _ => return None,
        };
        let mut lon_str = String::new();
        while let Some(d) = chars.next_if(|c| c.is_ascii_digit()) {
            lon_str.push(d);
        }

        if lat_str.is_empty() || lon_str.is_empty() {
            return None;
        }

        let lat: i32 = lat_str.parse().ok()?;
        let lon: i32 = lon_str.parse().ok()?;
        Some(Self {
            lat: lat_sign * lat,
            lon: lon_sign * lon,
        })
    }

    /// File stem in SRTM convention, e.g. `N51E003`.
    pub fn file_stem(&self) -> String {
        let ns = if self.lat < 0 { 'S' } else { 'N' };
        let ew = if self.lon < 0 { 'W' } else { 'E' };
        format!(
            "{}{:02}{}{:03}",
            ns,
            self.lat.unsigned_abs(),
            ew,
            self.lon.unsigned_abs()
        )
    }

    /// Expected `.hgt` file name for this tile.
    pub fn hgt_filename(&self) -> String {
        format!("{}.hgt", self.file_stem())
    }

    /// Geographic bounds covered by this tile.
    pub fn bounds(&self) -> TileBounds {
        TileBounds {
            min_lat: self.lat as f64,
            max_lat: self.lat as f64 + 1.0,
            min_lon: self.lon as f64,
            max_lon: self.lon as f64 + 1.0,
        }
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_stem())
    }
}
