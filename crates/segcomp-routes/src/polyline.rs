//! Decoding of the encoded polyline format used by segment maps.
//!
//! Each coordinate is stored as the delta from the previous one, scaled by
//! 1e5, zig-zag encoded and split into 5-bit chunks offset by 63.

use crate::{Result, RouteError};
use segcomp_common::Coordinate;

const PRECISION: f64 = 1e5;

/// Decode a polyline into coordinates.
pub fn decode_polyline(encoded: &str) -> Result<Vec<Coordinate>> {
    let bytes = encoded.as_bytes();
    let mut pos = 0;
    let (mut lat, mut lon) = (0i64, 0i64);
    let mut points = Vec::new();

    while pos < bytes.len() {
        lat += next_value(bytes, &mut pos)?;
        if pos >= bytes.len() {
            return Err(RouteError::MalformedPolyline(format!(
                "latitude without longitude at byte {}",
                pos
            )));
        }
        lon += next_value(bytes, &mut pos)?;
        points.push(Coordinate::new(lat as f64 / PRECISION, lon as f64 / PRECISION));
    }
    Ok(points)
}

fn next_value(bytes: &[u8], pos: &mut usize) -> Result<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
        let byte = *bytes.get(*pos).ok_or_else(|| {
            RouteError::MalformedPolyline(format!("truncated value at byte {}", *pos))
        })?;
        if !(63..=126).contains(&byte) {
            return Err(RouteError::MalformedPolyline(format!(
                "invalid character {:?} at byte {}",
                byte as char, *pos
            )));
        }
        if shift > 60 {
            return Err(RouteError::MalformedPolyline(format!(
                "value too long at byte {}",
                *pos
            )));
        }
        *pos += 1;

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    Ok(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}
