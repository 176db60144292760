// THEORY:
// The `area` module is the pure arithmetic tail of the measurement pipeline:
// it turns classification counts into a coverage percentage and, given a
// calibration ratio, into an estimated physical area. It also carries a small
// set of general-purpose shape-area formulas that are reusable anywhere area
// arithmetic is needed; they share nothing with the classifier beyond the
// validation convention.
//
// Every function validates its inputs up front and reports a violation as a
// typed `InvalidInput` error. No function panics, and a division can never
// execute against a non-positive denominator.

use crate::core_modules::error::{AnalysisError, Result};
use std::f64::consts::PI;

/// Percentage of an image's pixels that were classified as matches, 0-100.
pub fn coverage_percentage(samosa_pixels: u64, total_pixels: u64) -> Result<f64> {
    if total_pixels == 0 {
        return Err(AnalysisError::InvalidInput(
            "total pixel count must be positive",
        ));
    }
    Ok(samosa_pixels as f64 / total_pixels as f64 * 100.0)
}

/// Estimated physical area covered by the matched pixels, in square units of
/// the calibration ratio (`pixels_per_unit` pixels per unit length).
///
/// The image dimensions gate the call (both must be positive) but do not
/// enter the formula: the estimate is `samosa_pixels * (1 / pixels_per_unit)^2`.
pub fn estimated_physical_area(
    samosa_pixels: u64,
    image_width: u32,
    image_height: u32,
    pixels_per_unit: f64,
) -> Result<f64> {
    if samosa_pixels == 0 {
        return Err(AnalysisError::InvalidInput(
            "samosa pixel count must be positive",
        ));
    }
    if image_width == 0 || image_height == 0 {
        return Err(AnalysisError::InvalidInput(
            "image dimensions must be positive",
        ));
    }
    if pixels_per_unit <= 0.0 {
        return Err(AnalysisError::InvalidInput(
            "calibration factor must be positive",
        ));
    }

    let pixel_area = 1.0 / (pixels_per_unit * pixels_per_unit);
    Ok(samosa_pixels as f64 * pixel_area)
}

/// Area of a triangle: `0.5 * base * height`.
pub fn triangle_area(base: f64, height: f64) -> Result<f64> {
    if base <= 0.0 || height <= 0.0 {
        return Err(AnalysisError::InvalidInput(
            "triangle base and height must be positive",
        ));
    }
    Ok(0.5 * base * height)
}

/// Area of a rectangle: `length * width`.
pub fn rectangle_area(length: f64, width: f64) -> Result<f64> {
    if length <= 0.0 || width <= 0.0 {
        return Err(AnalysisError::InvalidInput(
            "rectangle length and width must be positive",
        ));
    }
    Ok(length * width)
}

/// Area of a circle: `PI * radius^2`.
pub fn circle_area(radius: f64) -> Result<f64> {
    if radius <= 0.0 {
        return Err(AnalysisError::InvalidInput(
            "circle radius must be positive",
        ));
    }
    Ok(PI * radius * radius)
}

/// Area of a square: `side^2`.
pub fn square_area(side: f64) -> Result<f64> {
    if side <= 0.0 {
        return Err(AnalysisError::InvalidInput("square side must be positive"));
    }
    Ok(side * side)
}

/// Area of a parallelogram: `base * height`.
pub fn parallelogram_area(base: f64, height: f64) -> Result<f64> {
    if base <= 0.0 || height <= 0.0 {
        return Err(AnalysisError::InvalidInput(
            "parallelogram base and height must be positive",
        ));
    }
    Ok(base * height)
}
