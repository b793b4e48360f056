//! Image decoding, filler resizing and PNG export

use crate::io::error::{Result, ShuffleError};
use crate::spatial::buffer::PixelBuffer;
use image::RgbImage;
use image::imageops::{self, FilterType};
use std::path::Path;

/// Decode an image file into RGB, discarding any alpha channel
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a supported image format
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| ShuffleError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(image.to_rgb8())
}

/// Resize `image` to `width x height` unless it already has that size
pub fn fit_to(image: RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        image
    } else {
        imageops::resize(&image, width, height, FilterType::CatmullRom)
    }
}

/// Load the filler and skeleton images, resizing the filler to the skeleton's size
///
/// Returns `(filler, skeleton)`.
///
/// # Errors
///
/// Returns an error if either image cannot be loaded
pub fn load_pair<P: AsRef<Path>, Q: AsRef<Path>>(
    filler_path: P,
    skeleton_path: Q,
) -> Result<(PixelBuffer, PixelBuffer)> {
    let skeleton = load_rgb(skeleton_path)?;
    let (width, height) = skeleton.dimensions();
    let filler = fit_to(load_rgb(filler_path)?, width, height);

    tracing::debug!(width, height, "loaded filler and skeleton");
    Ok((
        PixelBuffer::from_rgb_image(&filler),
        PixelBuffer::from_rgb_image(&skeleton),
    ))
}

/// Create the parent directory of `path` if it has one
///
/// # Errors
///
/// Returns an error if the directory cannot be created
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ShuffleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Save a frame as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn export_frame_as_png(frame: &PixelBuffer, output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;

    frame
        .to_rgb_image()
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| ShuffleError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
