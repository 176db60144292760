// THEORY:
// The `ImageScanner` is the orchestration layer between a decoded raster and
// the per-pixel classifier. It owns the full-image walk: visit every pixel
// exactly once, ask the classifier about it, and accumulate the match count.
//
// Key architectural principles:
// 1.  **Borrow, never own**: the scanner borrows the caller's raster for the
//     duration of a scan and allocates nothing unless a visualization was
//     requested. Two entry points share the walk: `scan` only counts, while
//     `visualize` additionally paints a fresh same-size output raster.
// 2.  **Atomic and deterministic**: a scan either completes over every pixel
//     or fails input validation before touching any. There are no partial
//     results, and the same raster always yields the same counts. Iteration
//     order is row-major by convention but is not observable behavior, since
//     counting is commutative.
// 3.  **Wide counting arithmetic**: total pixel count is `width * height`
//     promoted to 64 bits before multiplying, so large rasters cannot
//     overflow a 32-bit intermediate.

use crate::core_modules::classifier;
use crate::core_modules::error::{AnalysisError, Result};
use crate::core_modules::pixel::pixel::{Byte, CHANNELS, Channel, Pixel};
use image::{Rgb, RgbImage};
use tracing::debug;

/// Default paint color for matched pixels in a visualization: pure red.
pub const DEFAULT_HIGHLIGHT_COLOR: [Channel; 3] = [255, 0, 0];

/// Configuration for the scanner, allowing for tunable visualization output.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// The color written over matched pixels in the visualization raster.
    pub highlight_color: [Channel; 3],
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
        }
    }
}

/// The counts produced by one full-image scan. Derived, never persisted;
/// recomputed on every invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassificationResult {
    /// How many pixels the classifier accepted.
    pub samosa_pixels: u64,
    /// `width * height` of the scanned raster.
    pub total_pixels: u64,
}

/// Walks rasters and accumulates classification counts.
#[derive(Debug, Clone, Default)]
pub struct ImageScanner {
    config: ScannerConfig,
}

impl ImageScanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Counts samosa-colored pixels in the raster. Never fails: a zero-area
    /// raster simply yields zero counts.
    pub fn scan(&self, raster: &RgbImage) -> ClassificationResult {
        let (width, height) = raster.dimensions();
        let total_pixels = width as u64 * height as u64;

        let mut samosa_pixels = 0u64;
        for rgb in raster.pixels() {
            if classifier::is_samosa_color(rgb.0[0], rgb.0[1], rgb.0[2]) {
                samosa_pixels += 1;
            }
        }

        debug!(
            "Scan completed. Found {} samosa pixels out of {}.",
            samosa_pixels, total_pixels
        );
        ClassificationResult {
            samosa_pixels,
            total_pixels,
        }
    }

    /// Counts samosa-colored pixels in a packed RGB byte buffer (three bytes
    /// per pixel, row-major). Fails before reading any pixel when the buffer
    /// length disagrees with the stated dimensions.
    pub fn scan_buffer(&self, width: u32, height: u32, buffer: &[Byte]) -> Result<ClassificationResult> {
        let total_pixels = width as u64 * height as u64;
        let expected_len = total_pixels * CHANNELS as u64;
        if buffer.len() as u64 != expected_len {
            return Err(AnalysisError::InvalidInput(
                "buffer length does not match width * height * 3",
            ));
        }

        let mut samosa_pixels = 0u64;
        for bytes in buffer.chunks_exact(CHANNELS) {
            if classifier::classify(&Pixel::from(bytes)) {
                samosa_pixels += 1;
            }
        }

        debug!(
            "Buffer scan completed. Found {} samosa pixels out of {}.",
            samosa_pixels, total_pixels
        );
        Ok(ClassificationResult {
            samosa_pixels,
            total_pixels,
        })
    }

    /// Scans the raster and produces a freshly allocated visualization of the
    /// same dimensions: matched pixels are painted with the configured
    /// highlight color, every other pixel keeps its original color.
    pub fn visualize(&self, raster: &RgbImage) -> (RgbImage, ClassificationResult) {
        let (width, height) = raster.dimensions();
        let total_pixels = width as u64 * height as u64;
        let highlight = Rgb(self.config.highlight_color);

        let mut output = RgbImage::new(width, height);
        let mut samosa_pixels = 0u64;
        for (x, y, rgb) in raster.enumerate_pixels() {
            if classifier::is_samosa_color(rgb.0[0], rgb.0[1], rgb.0[2]) {
                output.put_pixel(x, y, highlight);
                samosa_pixels += 1;
            } else {
                output.put_pixel(x, y, *rgb);
            }
        }

        debug!(
            "Visualization completed. Found {} samosa pixels out of {}.",
            samosa_pixels, total_pixels
        );
        (
            output,
            ClassificationResult {
                samosa_pixels,
                total_pixels,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_raster(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    #[test]
    fn pure_red_raster_has_no_matches() {
        let scanner = ImageScanner::default();
        let raster = uniform_raster(8, 8, [255, 0, 0]);
        let result = scanner.scan(&raster);
        assert_eq!(result.samosa_pixels, 0);
        assert_eq!(result.total_pixels, 64);
    }

    #[test]
    fn uniform_mid_brown_raster_matches_everywhere() {
        let scanner = ImageScanner::default();
        let raster = uniform_raster(10, 10, [150, 90, 40]);
        let result = scanner.scan(&raster);
        assert_eq!(result.samosa_pixels, 100);
        assert_eq!(result.total_pixels, 100);
    }

    #[test]
    fn single_pixel_non_match_is_a_valid_result() {
        let scanner = ImageScanner::default();
        let raster = uniform_raster(1, 1, [255, 255, 255]);
        let result = scanner.scan(&raster);
        assert_eq!(result.samosa_pixels, 0);
        assert_eq!(result.total_pixels, 1);
    }

    #[test]
    fn zero_area_raster_yields_zero_counts() {
        let scanner = ImageScanner::default();
        let raster = RgbImage::new(0, 0);
        let result = scanner.scan(&raster);
        assert_eq!(result.samosa_pixels, 0);
        assert_eq!(result.total_pixels, 0);
    }

    #[test]
    fn scanning_twice_is_idempotent() {
        let scanner = ImageScanner::default();
        let mut raster = uniform_raster(6, 4, [150, 90, 40]);
        raster.put_pixel(0, 0, Rgb([0, 0, 255]));
        raster.put_pixel(5, 3, Rgb([255, 255, 255]));

        let first = scanner.scan(&raster);
        let second = scanner.scan(&raster);
        assert_eq!(first, second);
        assert_eq!(first.samosa_pixels, 22);
        assert_eq!(first.total_pixels, 24);
    }

    #[test]
    fn visualize_paints_matches_and_preserves_the_rest() {
        let scanner = ImageScanner::default();
        let mut raster = uniform_raster(3, 1, [0, 0, 255]);
        raster.put_pixel(1, 0, Rgb([150, 90, 40]));

        let (output, result) = scanner.visualize(&raster);
        assert_eq!(output.dimensions(), raster.dimensions());
        assert_eq!(result.samosa_pixels, 1);
        assert_eq!(result.total_pixels, 3);
        assert_eq!(*output.get_pixel(0, 0), Rgb([0, 0, 255]));
        assert_eq!(*output.get_pixel(1, 0), Rgb(DEFAULT_HIGHLIGHT_COLOR));
        assert_eq!(*output.get_pixel(2, 0), Rgb([0, 0, 255]));
    }

    #[test]
    fn visualize_honors_a_custom_highlight_color() {
        let scanner = ImageScanner::new(ScannerConfig {
            highlight_color: [0, 255, 0],
        });
        let raster = uniform_raster(2, 2, [150, 90, 40]);
        let (output, result) = scanner.visualize(&raster);
        assert_eq!(result.samosa_pixels, 4);
        assert_eq!(*output.get_pixel(1, 1), Rgb([0, 255, 0]));
    }

    #[test]
    fn visualize_leaves_the_input_raster_untouched() {
        let scanner = ImageScanner::default();
        let raster = uniform_raster(4, 4, [150, 90, 40]);
        let before = raster.clone();
        let _ = scanner.visualize(&raster);
        assert_eq!(raster, before);
    }

    #[test]
    fn buffer_scan_agrees_with_raster_scan() {
        let scanner = ImageScanner::default();
        let raster = uniform_raster(5, 3, [150, 90, 40]);
        let buffer = raster.as_raw().clone();

        let from_raster = scanner.scan(&raster);
        let from_buffer = scanner.scan_buffer(5, 3, &buffer).unwrap();
        assert_eq!(from_raster, from_buffer);
    }

    #[test]
    fn buffer_scan_rejects_mismatched_length() {
        let scanner = ImageScanner::default();
        let buffer = vec![0u8; 10];
        let result = scanner.scan_buffer(2, 2, &buffer);
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn buffer_scan_accepts_an_empty_raster() {
        let scanner = ImageScanner::default();
        let result = scanner.scan_buffer(0, 0, &[]).unwrap();
        assert_eq!(result.samosa_pixels, 0);
        assert_eq!(result.total_pixels, 0);
    }
}
