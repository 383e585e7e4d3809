//! Single DEM tile representation.

use crate::{DemError, Result, TileKey};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;

/// Void marker used by SRTM `.hgt` files.
pub const HGT_VOID: i16 = -32768;

/// A single whole-degree DEM tile.
///
/// SRTM3 tiles are 1201 x 1201 samples and SRTM1 tiles 3601 x 3601, both
/// including the shared edge rows/columns with neighbouring tiles.
#[derive(Debug)]
pub struct DemTile {
    /// Elevation data in row-major order (north to south, west to east).
    data: Vec<f32>,
    /// Width of the tile in samples.
    width: u32,
    /// Height of the tile in samples.
    height: u32,
    /// Geographic bounds.
    bounds: TileBounds,
    /// No-data value (elevations equal to this should be treated as missing).
    no_data_value: Option<f32>,
}

/// Geographic bounds of a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBounds {
    /// Minimum latitude (south edge).
    pub min_lat: f64,
    /// Maximum latitude (north edge).
    pub max_lat: f64,
    /// Minimum longitude (west edge).
    pub min_lon: f64,
    /// Maximum longitude (east edge).
    pub max_lon: f64,
}

impl TileBounds {
    /// Check if a coordinate is within the bounds.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

impl DemTile {
    /// Load an SRTM `.hgt` tile.
    ///
    /// The file is read in one go and closed before parsing.
    pub fn from_hgt_file<P: AsRef<Path>>(path: P, key: TileKey) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Self::from_hgt_bytes(&bytes, key).map_err(|e| match e {
            DemError::InvalidTile { reason, .. } => DemError::InvalidTile {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parse raw `.hgt` contents: a square grid of big-endian `i16` samples.
    pub fn from_hgt_bytes(bytes: &[u8], key: TileKey) -> Result<Self> {
        let invalid = |reason: String| DemError::InvalidTile {
            path: key.hgt_filename(),
            reason,
        };

        if bytes.len() % 2 != 0 {
            return Err(invalid(format!("odd byte length {}", bytes.len())));
        }
        let samples = bytes.len() / 2;
        let side = (samples as f64).sqrt().round() as usize;
        if side < 2 || side * side != samples {
            return Err(invalid(format!(
                "{} samples do not form a square grid",
                samples
            )));
        }

        let data = bytes
            .chunks_exact(2)
            .map(|c| i16::from_be_bytes([c[0], c[1]]) as f32)
            .collect();

        Ok(Self {
            data,
            width: side as u32,
            height: side as u32,
            bounds: key.bounds(),
            no_data_value: Some(HGT_VOID as f32),
        })
    }

    /// Build a tile from samples already in memory.
    ///
    /// `data` is row-major, north row first, and must hold `width * height` values.
    pub fn from_samples(
        data: Vec<f32>,
        width: u32,
        height: u32,
        bounds: TileBounds,
        no_data_value: Option<f32>,
    ) -> Result<Self> {
        if width < 2 || height < 2 || data.len() != (width as usize) * (height as usize) {
            return Err(DemError::InvalidTile {
                path: "<memory>".to_string(),
                reason: format!(
                    "{} samples for a {}x{} grid",
                    data.len(),
                    width,
                    height
                ),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            bounds,
            no_data_value,
        })
    }

    /// Load a DEM tile from a GeoTIFF file.
    ///
    /// Bounds come from the GeoTIFF tiepoint/pixel-scale tags when present,
    /// otherwise from the whole-degree tile `key`.
    pub fn from_geotiff<P: AsRef<Path>>(path: P, key: TileKey) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let mut decoder = Decoder::new(file)?;

        // SRTM1-sized tiles need more than the default decoding buffer
        let mut limits = Limits::default();
        limits.decoding_buffer_size = 256 * 1024 * 1024;
        limits.intermediate_buffer_size = 256 * 1024 * 1024;
        limits.ifd_value_size = 256 * 1024 * 1024;
        decoder = decoder.with_limits(limits);

        let (width, height) = decoder.dimensions()?;
        let bounds = Self::read_geotransform(&mut decoder)?.unwrap_or_else(|| key.bounds());
        let data = Self::decode_elevation_data(&mut decoder)?;
        let no_data_value = Self::read_nodata_value(&mut decoder);

        Self::from_samples(data, width, height, bounds, no_data_value).map_err(|e| match e {
            DemError::InvalidTile { reason, .. } => DemError::InvalidTile {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Read the geotransform (geographic bounds) from GeoTIFF tags, if present.
    fn read_geotransform<R: std::io::Read + std::io::Seek>(
        decoder: &mut Decoder<R>,
    ) -> Result<Option<TileBounds>> {
        // ModelTiepoint (tag 33922) and ModelPixelScale (tag 33550)
        let tiepoint = decoder.get_tag_f64_vec(Tag::Unknown(33922));
        let pixel_scale = decoder.get_tag_f64_vec(Tag::Unknown(33550));

        if let (Ok(tiepoint), Ok(scale)) = (tiepoint, pixel_scale) {
            if tiepoint.len() >= 6 && scale.len() >= 2 {
                // Tiepoint format: [i, j, k, x, y, z] where (x, y) is the top-left corner
                let tie_x = tiepoint[3];
                let tie_y = tiepoint[4];
                let (width, height) = decoder.dimensions()?;

                return Ok(Some(TileBounds {
                    min_lat: tie_y - (height as f64 * scale[1]),
                    max_lat: tie_y,
                    min_lon: tie_x,
                    max_lon: tie_x + (width as f64 * scale[0]),
                }));
            }
        }

        Ok(None)
    }

    /// Decode elevation data from the TIFF decoder.
    fn decode_elevation_data<R: std::io::Read + std::io::Seek>(
        decoder: &mut Decoder<R>,
    ) -> Result<Vec<f32>> {
        let result = decoder.read_image()?;

        match result {
            DecodingResult::F32(data) => Ok(data),
            DecodingResult::F64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::F16(data) => Ok(data.into_iter().map(|v| v.to_f32()).collect()),
            DecodingResult::I16(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I32(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U16(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U32(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U8(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I8(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        }
    }

    /// Try to read the no-data value from the GDAL_NODATA tag (42113).
    fn read_nodata_value<R: std::io::Read + std::io::Seek>(decoder: &mut Decoder<R>) -> Option<f32> {
        decoder
            .get_tag_ascii_string(Tag::Unknown(42113))
            .ok()
            .and_then(|s| s.trim().trim_end_matches('\0').parse().ok())
            .or(Some(HGT_VOID as f32))
    }

    fn check_bounds(&self, lat: f64, lon: f64) -> Result<()> {
        if self.bounds.contains(lat, lon) {
            return Ok(());
        }
        Err(DemError::OutOfBounds {
            lat,
            lon,
            min_lat: self.bounds.min_lat,
            max_lat: self.bounds.max_lat,
            min_lon: self.bounds.min_lon,
            max_lon: self.bounds.max_lon,
        })
    }

    /// Fractional (column, row) position of a coordinate in the sample grid.
    fn sample_position(&self, lat: f64, lon: f64) -> (f64, f64) {
        // Row 0 is at max_lat (north) and increases southward
        let lat_range = self.bounds.max_lat - self.bounds.min_lat;
        let lon_range = self.bounds.max_lon - self.bounds.min_lon;

        let x = ((lon - self.bounds.min_lon) / lon_range) * (self.width - 1) as f64;
        let y = ((self.bounds.max_lat - lat) / lat_range) * (self.height - 1) as f64;
        (x, y)
    }

    /// Get the elevation of the sample nearest to a coordinate.
    ///
    /// # Arguments
    /// * `lat` - Latitude in decimal degrees (positive = north)
    /// * `lon` - Longitude in decimal degrees (negative = west)
    pub fn get_elevation_nearest(&self, lat: f64, lon: f64) -> Result<f32> {
        self.check_bounds(lat, lon)?;

        let (x, y) = self.sample_position(lat, lon);
        let x = (x.round() as u32).min(self.width - 1);
        let y = (y.round() as u32).min(self.height - 1);

        self.get_pixel(x, y, lat, lon)
    }

    /// Get the elevation at a coordinate using bilinear interpolation
    /// between the four surrounding samples.
    pub fn get_elevation(&self, lat: f64, lon: f64) -> Result<f32> {
        self.check_bounds(lat, lon)?;

        let (x, y) = self.sample_position(lat, lon);

        let x0 = (x.floor() as u32).min(self.width - 1);
        let y0 = (y.floor() as u32).min(self.height - 1);
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x - x0 as f64;
        let fy = y - y0 as f64;

        let v00 = self.get_pixel(x0, y0, lat, lon)? as f64;
        let v10 = self.get_pixel(x1, y0, lat, lon)? as f64;
        let v01 = self.get_pixel(x0, y1, lat, lon)? as f64;
        let v11 = self.get_pixel(x1, y1, lat, lon)? as f64;

        let elevation = v00 * (1.0 - fx) * (1.0 - fy)
            + v10 * fx * (1.0 - fy)
            + v01 * (1.0 - fx) * fy
            + v11 * fx * fy;

        Ok(elevation as f32)
    }

    /// Get the raw sample at a grid position.
    fn get_pixel(&self, x: u32, y: u32, lat: f64, lon: f64) -> Result<f32> {
        let idx = (y as usize) * (self.width as usize) + x as usize;
        let value = self.data[idx];

        if let Some(nodata) = self.no_data_value {
            if (value - nodata).abs() < 0.001 {
                return Err(DemError::NoData { lat, lon });
            }
        }

        Ok(value)
    }

    /// Get the geographic bounds of this tile.
    pub fn bounds(&self) -> TileBounds {
        self.bounds
    }

    /// Get the dimensions of this tile in samples.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the sample spacing in degrees (longitude, latitude).
    pub fn resolution(&self) -> (f64, f64) {
        let lat_range = self.bounds.max_lat - self.bounds.min_lat;
        let lon_range = self.bounds.max_lon - self.bounds.min_lon;
        (
            lon_range / (self.width - 1) as f64,
            lat_range / (self.height - 1) as f64,
        )
    }
}
