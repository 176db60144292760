// THEORY:
// Calibration converts pixel measurements into physical units. The user
// measures a reference object of known physical length in the image, the two
// measurements are divided into a pixels-per-unit ratio, and that ratio is
// held for the rest of the measurement session. The invariant (the ratio is
// positive and finite) is enforced here, at construction, so a zero or
// negative factor can never reach the area arithmetic.

use crate::core_modules::error::{AnalysisError, Result};

/// A validated pixels-per-unit-length ratio. Construct via [`new`] or
/// [`from_reference`]; an instance always holds a positive, finite value.
///
/// [`new`]: CalibrationFactor::new
/// [`from_reference`]: CalibrationFactor::from_reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationFactor(f64);

impl CalibrationFactor {
    /// Wraps an already-divided ratio, rejecting anything that is not a
    /// positive finite number.
    pub fn new(pixels_per_unit: f64) -> Result<Self> {
        if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 {
            return Err(AnalysisError::InvalidInput(
                "calibration factor must be a positive, finite pixels-per-unit ratio",
            ));
        }
        Ok(Self(pixels_per_unit))
    }

    /// Performs the calibration division at the boundary: a reference object
    /// of `reference_length` physical units measured as `pixel_measurement`
    /// pixels. Both inputs must be positive, so the division itself can never
    /// fault.
    pub fn from_reference(reference_length: f64, pixel_measurement: f64) -> Result<Self> {
        if !reference_length.is_finite() || reference_length <= 0.0 {
            return Err(AnalysisError::InvalidInput(
                "reference length must be positive",
            ));
        }
        if !pixel_measurement.is_finite() || pixel_measurement <= 0.0 {
            return Err(AnalysisError::InvalidInput(
                "pixel measurement must be positive",
            ));
        }
        Self::new(pixel_measurement / reference_length)
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.0
    }
}
