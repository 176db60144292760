// THEORY:
// The `pipeline` module is the final, top-level API for the entire measurement
// engine. It encapsulates the full stack (classification, scanning,
// visualization, calibration arithmetic) behind a single stateful session
// object, so a host application can load a raster, calibrate once, and ask for
// a complete report without wiring the core modules together itself.
//
// The session owns the current raster, the most recent visualization, and the
// calibration factor. The calibration factor lives for the lifetime of the
// session: loading a new raster clears the derived artifacts (visualization,
// report) but keeps the factor until it is replaced.

use crate::core_modules::area;
use crate::core_modules::scanner::ImageScanner;
use image::RgbImage;
use tracing::info;

// Re-export key data structures for the public API.
pub use crate::core_modules::calibration::CalibrationFactor;
pub use crate::core_modules::error::{AnalysisError, Result};
pub use crate::core_modules::scanner::{
    ClassificationResult, DEFAULT_HIGHLIGHT_COLOR, ScannerConfig,
};

/// Configuration for the DetectionPipeline, allowing for tunable behavior.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub scanner: ScannerConfig,
    /// Optional initial calibration; a session can also calibrate later via
    /// [`DetectionPipeline::calibrate`].
    pub pixels_per_unit: Option<CalibrationFactor>,
}

/// The detailed measurement package for a detection.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementData {
    /// How many pixels the classifier accepted.
    pub samosa_pixels: u64,
    /// Total pixels in the scanned raster.
    pub total_pixels: u64,
    /// Matched share of the raster, 0-100.
    pub coverage_percentage: f64,
    /// Estimated physical area in square calibration units; present only when
    /// the session was calibrated.
    pub physical_area: Option<f64>,
}

/// The primary output of the pipeline for a single analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    NoSamosaDetected,
    SamosaDetected(MeasurementData),
}

/// Builds a full report plus visualization for one raster. Shared by the
/// synchronous session below and the background worker pool.
pub(crate) fn measure(
    scanner: &ImageScanner,
    calibration: Option<CalibrationFactor>,
    raster: &RgbImage,
) -> Result<(Report, RgbImage)> {
    let (processed, counts) = scanner.visualize(raster);

    if counts.samosa_pixels == 0 {
        return Ok((Report::NoSamosaDetected, processed));
    }

    let coverage = area::coverage_percentage(counts.samosa_pixels, counts.total_pixels)?;
    let physical_area = match calibration {
        Some(factor) => Some(area::estimated_physical_area(
            counts.samosa_pixels,
            raster.width(),
            raster.height(),
            factor.pixels_per_unit(),
        )?),
        None => None,
    };

    Ok((
        Report::SamosaDetected(MeasurementData {
            samosa_pixels: counts.samosa_pixels,
            total_pixels: counts.total_pixels,
            coverage_percentage: coverage,
            physical_area,
        }),
        processed,
    ))
}

/// The main, top-level struct for the measurement engine.
pub struct DetectionPipeline {
    scanner: ImageScanner,
    calibration: Option<CalibrationFactor>,
    current_image: Option<RgbImage>,
    processed_image: Option<RgbImage>,
    last_report: Option<Report>,
}

impl DetectionPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            scanner: ImageScanner::new(config.scanner),
            calibration: config.pixels_per_unit,
            current_image: None,
            processed_image: None,
            last_report: None,
        }
    }

    /// Replaces the session's raster. Derived artifacts (visualization,
    /// report) are cleared; the calibration factor is kept for the session.
    pub fn load_image(&mut self, raster: RgbImage) {
        self.current_image = Some(raster);
        self.processed_image = None;
        self.last_report = None;
    }

    /// Derives and stores a calibration factor from a reference object of
    /// known physical length and its measured length in pixels. On invalid
    /// input the session's existing calibration is left untouched.
    pub fn calibrate(&mut self, reference_length: f64, pixel_measurement: f64) -> Result<CalibrationFactor> {
        let factor = CalibrationFactor::from_reference(reference_length, pixel_measurement)?;
        info!(
            "Calibration completed: {:.2} pixels per unit",
            factor.pixels_per_unit()
        );
        self.calibration = Some(factor);
        Ok(factor)
    }

    /// Stores an already-validated calibration factor.
    pub fn set_calibration(&mut self, factor: CalibrationFactor) {
        self.calibration = Some(factor);
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_some()
    }

    /// Scans the loaded raster and produces the measurement report plus the
    /// highlight visualization. Fails only when no raster has been loaded.
    pub fn analyze(&mut self) -> Result<Report> {
        let raster = self
            .current_image
            .as_ref()
            .ok_or(AnalysisError::InvalidInput("no image loaded"))?;

        let (report, processed) = measure(&self.scanner, self.calibration, raster)?;

        match &report {
            Report::SamosaDetected(data) => info!(
                "Samosa analysis completed: {} of {} pixels matched ({:.1}%).",
                data.samosa_pixels, data.total_pixels, data.coverage_percentage
            ),
            Report::NoSamosaDetected => info!("Samosa analysis completed: no samosa detected."),
        }

        self.processed_image = Some(processed);
        self.last_report = Some(report.clone());
        Ok(report)
    }

    pub fn current_image(&self) -> Option<&RgbImage> {
        self.current_image.as_ref()
    }

    /// The visualization produced by the most recent [`analyze`] call.
    ///
    /// [`analyze`]: DetectionPipeline::analyze
    pub fn processed_image(&self) -> Option<&RgbImage> {
        self.processed_image.as_ref()
    }

    pub fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }
}
