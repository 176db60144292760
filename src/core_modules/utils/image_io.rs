// Raster decode/encode boundary. The measurement core only ever sees decoded
// `RgbImage` rasters; everything filesystem- and format-shaped lives here.

use image::RgbImage;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("Failed to read image file: {0}")]
    ReadError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImageIoError>;

/// Loads an image from a path and decodes it into an RGB raster.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    if !path.exists() {
        error!("Image file does not exist: {}", path.display());
        return Err(ImageIoError::ReadError(format!(
            "file does not exist: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(ImageIoError::ReadError(format!(
            "path is not a file: {}",
            path.display()
        )));
    }

    let decoded = image::open(path).map_err(|e| ImageIoError::DecodeError(e.to_string()))?;
    let raster = decoded.to_rgb8();
    info!(
        "Successfully loaded image: {} ({} x {} pixels)",
        path.display(),
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

/// Encodes a raster to a path; the format is inferred from the extension.
pub fn save_image(path: &Path, raster: &RgbImage) -> Result<()> {
    raster
        .save(path)
        .map_err(|e| ImageIoError::EncodeError(e.to_string()))?;
    info!("Saved image: {}", path.display());
    Ok(())
}

/// Reads the pixel dimensions `(width, height)` of an image file without
/// decoding the full raster.
pub fn dimensions(path: &Path) -> Result<(u32, u32)> {
    if !path.exists() {
        return Err(ImageIoError::ReadError(format!(
            "file does not exist: {}",
            path.display()
        )));
    }
    image::image_dimensions(path).map_err(|e| ImageIoError::DecodeError(e.to_string()))
}

/// Total pixel area of an image file, widened to avoid 32-bit overflow.
pub fn pixel_area(path: &Path) -> Result<u64> {
    let (width, height) = dimensions(path)?;
    Ok(width as u64 * height as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn save_then_inspect_dimensions() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("uniform.png");
        let raster = RgbImage::from_pixel(4, 3, Rgb([150, 90, 40]));

        save_image(&path, &raster).expect("save");
        assert_eq!(dimensions(&path).expect("dimensions"), (4, 3));
        assert_eq!(pixel_area(&path).expect("pixel area"), 12);

        let loaded = load_image(&path).expect("load");
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(*loaded.get_pixel(2, 1), Rgb([150, 90, 40]));
    }

    #[test]
    fn loading_a_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.png");
        assert!(matches!(
            load_image(&path),
            Err(ImageIoError::ReadError(_))
        ));
        assert!(dimensions(&path).is_err());
    }

    #[test]
    fn saving_to_an_unknown_extension_is_an_encode_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("raster.unknown");
        let raster = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
        assert!(matches!(
            save_image(&path, &raster),
            Err(ImageIoError::EncodeError(_))
        ));
    }
}
