//! # segcomp-dem
//!
//! Digital Elevation Model (DEM) reader for whole-degree SRTM tiles.
//!
//! ## Overview
//!
//! SRTM data is distributed as one file per 1x1 degree cell, named after the
//! cell's southwest corner: `N51E003.hgt` covers latitude 51°N to 52°N and
//! longitude 3°E to 4°E, `S34W071.hgt` covers 34°S to 33°S and 71°W to 70°W.
//! Each `.hgt` file is a square grid of big-endian 16-bit samples:
//! - SRTM3 (3 arc-second, ~90 m): 1201 x 1201
//! - SRTM1 (1 arc-second, ~30 m): 3601 x 3601
//!
//! GeoTIFF tiles using the same naming (`N51E003.tif`) are also accepted.
//!
//! ## Example
//!
//! ```no_run
//! use segcomp_dem::{DemTile, ElevationProvider, Sampling, TileKey, TileStore};
//!
//! // Index a directory; tiles load on first use and stay cached
//! let store = TileStore::open("tiles")?.with_sampling(Sampling::Nearest);
//! let elevation = store.elevation(51.05, 3.72)?;
//! println!("Elevation: {} meters", elevation);
//!
//! // Or load a single tile directly
//! let key = TileKey::from_coord(51.05, 3.72);
//! let tile = DemTile::from_hgt_file("tiles/N51E003.hgt", key)?;
//! let elevation = tile.get_elevation_nearest(51.05, 3.72)?;
//! # Ok::<(), segcomp_dem::DemError>(())
//! ```

mod error;
mod key;
mod store;
mod tile;

pub use error::DemError;
pub use key::TileKey;
pub use store::{ElevationProvider, Sampling, StoreStats, TileStore};
pub use tile::{DemTile, TileBounds, HGT_VOID};

/// Result type for DEM operations.
pub type Result<T> = std::result::Result<T, DemError>;
