//! Colours shared by charts and maps.

use plotters::style::RGBColor;
use segcomp_profile::GradientTier;

/// Opacity of gradient band fills.
pub const BAND_ALPHA: f64 = 0.5;

/// Opacity of the hill-shade overlay.
pub const SHADE_ALPHA: f64 = 0.4;

/// Opacity of major contour lines.
pub const MAJOR_CONTOUR_ALPHA: f64 = 0.7;

/// Opacity of minor contour lines.
pub const MINOR_CONTOUR_ALPHA: f64 = 0.5;

/// Ten-colour categorical cycle used for routes.
pub const ROUTE_COLORS: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

/// Colour of the `index`-th route on a chart.
pub fn route_color(index: usize) -> RGBColor {
    ROUTE_COLORS[index % ROUTE_COLORS.len()]
}

/// Fill colour of a gradient tier.
pub fn tier_color(tier: GradientTier) -> RGBColor {
    match tier {
        GradientTier::Downhill => RGBColor(0, 128, 0),
        GradientTier::Easy => RGBColor(255, 165, 0),
        GradientTier::Moderate => RGBColor(255, 0, 0),
        GradientTier::Steep => RGBColor(0, 0, 0),
    }
}

/// Stops of the terrain colormap: the green-to-tan middle of an earth-tone
/// ramp, leaving out the deep blues and the white peaks.
const EARTH_STOPS: [(f64, (u8, u8, u8)); 5] = [
    (0.0, (72, 145, 72)),
    (0.25, (120, 160, 80)),
    (0.5, (165, 168, 92)),
    (0.75, (185, 160, 110)),
    (1.0, (215, 190, 170)),
];

/// Terrain colour for a normalised elevation in `[0, 1]`.
pub fn earth_color(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let upper = EARTH_STOPS
        .iter()
        .position(|(at, _)| *at >= t)
        .unwrap_or(EARTH_STOPS.len() - 1)
        .max(1);
    let (t0, c0) = EARTH_STOPS[upper - 1];
    let (t1, c1) = EARTH_STOPS[upper];
    let f = (t - t0) / (t1 - t0);
    let mix = |a: u8, b: u8| (a as f64 + f * (b as f64 - a as f64)).round() as u8;
    RGBColor(mix(c0.0, c1.0), mix(c0.1, c1.1), mix(c0.2, c1.2))
}

/// Grey for a normalised shade value, black at 0 and white at 1.
pub fn shade_grey(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let v = (t * 255.0).round() as u8;
    RGBColor(v, v, v)
}

/// Position of `value` within `[min, max]`, or 0.5 for an empty range.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.5
    }
}
