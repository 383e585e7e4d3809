//! Tile store: indexes a tiles directory and loads tiles on demand.

use crate::{DemError, DemTile, Result, TileKey};
use crate::tile::TileBounds;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::debug;

/// Source of terrain elevations for arbitrary coordinates.
///
/// Implemented by [`TileStore`]; profile and grid builders only depend on this.
pub trait ElevationProvider {
    /// Elevation in meters at the given coordinate.
    fn elevation(&self, lat: f64, lon: f64) -> Result<f64>;
}

impl<T: ElevationProvider + ?Sized> ElevationProvider for &T {
    fn elevation(&self, lat: f64, lon: f64) -> Result<f64> {
        (**self).elevation(lat, lon)
    }
}

/// How a tile is sampled for a fractional coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sampling {
    /// Value of the nearest sample.
    #[default]
    Nearest,
    /// Bilinear interpolation of the four surrounding samples.
    Bilinear,
}

/// On-disk tile format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileFormat {
    Hgt,
    GeoTiff,
}

impl TileFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "hgt" => Some(TileFormat::Hgt),
            "tif" | "tiff" => Some(TileFormat::GeoTiff),
            _ => None,
        }
    }
}

/// Counters describing store usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Tiles found in the tiles directory.
    pub indexed: usize,
    /// Tiles currently held in memory.
    pub loaded: usize,
    /// Elevation lookups served.
    pub lookups: u64,
}

/// Elevation tiles from one directory, loaded lazily and cached for the
/// lifetime of the store.
///
/// Tiles are immutable, so the cache is never invalidated. Each tile file
/// is opened, read and closed within a single load.
///
/// # Example
///
/// ```no_run
/// use segcomp_dem::{ElevationProvider, TileStore};
///
/// let store = TileStore::open("tiles")?;  // Fast - just indexes files
///
/// // Loads N51E003.hgt on first use
/// let elevation = store.elevation(51.05, 3.72)?;
/// println!("Ghent elevation: {} meters", elevation);
/// # Ok::<(), segcomp_dem::DemError>(())
/// ```
#[derive(Debug)]
pub struct TileStore {
    /// Directory the tiles were indexed from.
    tiles_dir: PathBuf,
    /// Available tile files indexed by their southwest corner.
    tile_paths: HashMap<TileKey, (PathBuf, TileFormat)>,
    /// Loaded tiles.
    cache: RwLock<HashMap<TileKey, DemTile>>,
    /// Sampling mode applied to every lookup.
    sampling: Sampling,
    /// Number of elevation lookups served.
    lookups: AtomicU64,
}

impl TileStore {
    /// Index all `.hgt` and GeoTIFF tiles in a directory.
    ///
    /// This is fast because it only scans filenames without loading tile data.
    /// Files whose names do not follow the `N51E003` convention are ignored.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tile_paths = HashMap::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(format) = TileFormat::from_path(&path) else {
                continue;
            };
            let Some(key) = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(TileKey::from_filename)
            else {
                debug!("Ignoring {}: not a tile name", path.display());
                continue;
            };
            // Prefer .hgt when both formats exist for a cell
            if !matches!(tile_paths.get(&key), Some((_, TileFormat::Hgt))) {
                tile_paths.insert(key, (path, format));
            }
        }

        debug!("Indexed {} tiles in {}", tile_paths.len(), dir.display());

        Ok(Self {
            tiles_dir: dir.to_path_buf(),
            tile_paths,
            cache: RwLock::new(HashMap::new()),
            sampling: Sampling::default(),
            lookups: AtomicU64::new(0),
        })
    }

    /// Use a different sampling mode.
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// The sampling mode in use.
    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Directory the tiles were indexed from.
    pub fn tiles_dir(&self) -> &Path {
        &self.tiles_dir
    }

    /// Ensure a tile is loaded into the cache.
    fn ensure_tile_loaded(&self, key: TileKey) -> Result<()> {
        {
            let cache = self.cache.read().map_err(|_| DemError::CacheLockPoisoned)?;
            if cache.contains_key(&key) {
                return Ok(());
            }
        }

        let (path, format) = self
            .tile_paths
            .get(&key)
            .ok_or_else(|| DemError::TileNotFound {
                name: key.hgt_filename(),
            })?;

        let tile = match format {
            TileFormat::Hgt => DemTile::from_hgt_file(path, key)?,
            TileFormat::GeoTiff => DemTile::from_geotiff(path, key)?,
        };
        let (width, height) = tile.dimensions();
        let (dx, dy) = tile.resolution();
        debug!(
            "Loaded tile {} ({}x{}, {:.5}x{:.5} deg) from {}",
            key,
            width,
            height,
            dx,
            dy,
            path.display()
        );

        let mut cache = self.cache.write().map_err(|_| DemError::CacheLockPoisoned)?;
        cache.insert(key, tile);

        Ok(())
    }

    /// Get the elevation at a geographic coordinate with the store's sampling mode.
    ///
    /// Loads the required tile on demand if not already cached.
    pub fn get_elevation(&self, lat: f64, lon: f64) -> Result<f32> {
        let key = TileKey::from_coord(lat, lon);
        self.ensure_tile_loaded(key)?;
        self.lookups.fetch_add(1, Ordering::Relaxed);

        let cache = self.cache.read().map_err(|_| DemError::CacheLockPoisoned)?;
        let tile = cache.get(&key).ok_or_else(|| DemError::TileNotFound {
            name: key.hgt_filename(),
        })?;
        match self.sampling {
            Sampling::Nearest => tile.get_elevation_nearest(lat, lon),
            Sampling::Bilinear => tile.get_elevation(lat, lon),
        }
    }

    /// Check if a tile is available (indexed) for the given coordinate.
    pub fn has_tile(&self, lat: f64, lon: f64) -> bool {
        self.tile_paths.contains_key(&TileKey::from_coord(lat, lon))
    }

    /// Usage counters.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            indexed: self.tile_paths.len(),
            loaded: self.cache.read().map(|c| c.len()).unwrap_or(0),
            lookups: self.lookups.load(Ordering::Relaxed),
        }
    }

    /// Get the bounding box that covers all indexed tiles.
    ///
    /// This works without loading any tiles since it uses the indexed keys.
    pub fn total_bounds(&self) -> Option<TileBounds> {
        let mut keys = self.tile_paths.keys();
        let first = keys.next()?;

        let mut min_lat = first.lat;
        let mut max_lat = first.lat + 1;
        let mut min_lon = first.lon;
        let mut max_lon = first.lon + 1;

        for key in keys {
            min_lat = min_lat.min(key.lat);
            max_lat = max_lat.max(key.lat + 1);
            min_lon = min_lon.min(key.lon);
            max_lon = max_lon.max(key.lon + 1);
        }

        Some(TileBounds {
            min_lat: min_lat as f64,
            max_lat: max_lat as f64,
            min_lon: min_lon as f64,
            max_lon: max_lon as f64,
        })
    }
}

impl ElevationProvider for TileStore {
    fn elevation(&self, lat: f64, lon: f64) -> Result<f64> {
        self.get_elevation(lat, lon).map(f64::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_format_from_path() {
        assert_eq!(TileFormat::from_path(Path::new("N51E003.hgt")), Some(TileFormat::Hgt));
        assert_eq!(TileFormat::from_path(Path::new("N51E003.HGT")), Some(TileFormat::Hgt));
        assert_eq!(TileFormat::from_path(Path::new("N51E003.tif")), Some(TileFormat::GeoTiff));
        assert_eq!(TileFormat::from_path(Path::new("N51E003.zip")), None);
        assert_eq!(TileFormat::from_path(Path::new("N51E003")), None);
    }

    #[test]
    fn test_open_missing_directory() {
        assert!(matches!(
            TileStore::open("/definitely/not/a/tiles/dir"),
            Err(DemError::Io(_))
        ));
    }
}
