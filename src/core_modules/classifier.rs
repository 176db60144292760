// THEORY:
// The `classifier` module is the per-pixel decision layer of the detection
// system. It answers exactly one question: does this RGB sample fall inside
// the color envelope of the target material? Everything above it (scanning,
// counting, visualization, measurement) treats this predicate as a black box.
//
// Key architectural principles:
// 1.  **Pure predicate**: `is_samosa_color` is a total function over the full
//     RGB cube, with no state and no error paths. The same triple always
//     produces the same answer.
// 2.  **Named ranges, not buried literals**: each brightness band is a
//     `ColorRange` constant. The three bands overlap, and overlap is harmless
//     because the combined result is a plain boolean OR.
// 3.  **Raw channel space**: the bands are defined directly over 0-255 channel
//     values with no HSV/HSL transform. Downstream calibration workflows were
//     tuned against these exact comparisons, so the bounds (strict on both
//     ends for red and green, strict upper for blue) must not drift.

use crate::core_modules::pixel::pixel::{Channel, Pixel};

/// An exclusive RGB band: a pixel is inside when `red_min < r < red_max`,
/// `green_min < g < green_max`, and `b < blue_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub red_min: Channel,
    pub red_max: Channel,
    pub green_min: Channel,
    pub green_max: Channel,
    pub blue_max: Channel,
}

impl ColorRange {
    pub fn contains(&self, red: Channel, green: Channel, blue: Channel) -> bool {
        red > self.red_min
            && red < self.red_max
            && green > self.green_min
            && green < self.green_max
            && blue < self.blue_max
    }
}

/// Mid-brown band: the typical fried-pastry body color.
pub const MID_BROWN: ColorRange = ColorRange {
    red_min: 100,
    red_max: 200,
    green_min: 50,
    green_max: 150,
    blue_max: 100,
};

/// Golden band: well-fried, lighter crust regions.
pub const GOLDEN_BROWN: ColorRange = ColorRange {
    red_min: 150,
    red_max: 220,
    green_min: 100,
    green_max: 180,
    blue_max: 80,
};

/// Dark-brown band: edges and heavily fried regions.
pub const DARK_BROWN: ColorRange = ColorRange {
    red_min: 80,
    red_max: 140,
    green_min: 40,
    green_max: 100,
    blue_max: 60,
};

/// The full color envelope of the target material, checked in order.
pub const SAMOSA_RANGES: [ColorRange; 3] = [MID_BROWN, GOLDEN_BROWN, DARK_BROWN];

/// Decides whether a single RGB sample belongs to the samosa color class.
/// A match in any one band is sufficient.
pub fn is_samosa_color(red: Channel, green: Channel, blue: Channel) -> bool {
    SAMOSA_RANGES
        .iter()
        .any(|range| range.contains(red, green, blue))
}

/// Convenience wrapper for callers already holding a typed `Pixel`.
pub fn classify(pixel: &Pixel) -> bool {
    is_samosa_color(pixel.red, pixel.green, pixel.blue)
}
