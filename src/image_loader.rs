//! Page image I/O between PNG files and OpenCV
//!
//! Rendered pages are decoded with the `image` crate and handed to the
//! detector as an OpenCV `Mat` in BGR order (the standard OpenCV color
//! layout). Crops are written back as PNG through OpenCV.

use crate::error::{ConversionError, Result};
use opencv::core::{Mat, Scalar, Vector, CV_8UC3};
use opencv::imgcodecs;
use opencv::prelude::*;
use std::path::Path;

/// Load a page image from disk as an OpenCV Mat (BGR format)
///
/// # Errors
///
/// Returns `ConversionError::ImageLoadError` if the file cannot be opened
/// or decoded.
pub fn load_image(path: &Path) -> Result<Mat> {
    use image::ImageReader;

    let reader = ImageReader::open(path).map_err(|e| {
        ConversionError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let img = reader
        .with_guessed_format()
        .map_err(|e| {
            ConversionError::image_load(format!("Failed to read image: {}", path.display()), e)
        })?
        .decode()
        .map_err(|e| {
            ConversionError::image_load(format!("Failed to decode image: {}", path.display()), e)
        })?;

    let rgb_img = img.to_rgb8();
    let (width, height) = rgb_img.dimensions();

    rgb_to_bgr_mat(rgb_img.as_raw(), width as i32, height as i32)
}

/// Write a BGR Mat as PNG
pub fn save_png(path: &Path, image: &Mat) -> Result<()> {
    let filename = path
        .to_str()
        .ok_or_else(|| ConversionError::unsupported_path(path, "path is not valid UTF-8"))?;

    let written = imgcodecs::imwrite(filename, image, &Vector::new())
        .map_err(|e| ConversionError::opencv(format!("imwrite {}", path.display()), e))?;

    if !written {
        return Err(ConversionError::ImageWriteError {
            message: format!("OpenCV refused to write {}", path.display()),
            source: None,
        });
    }
    Ok(())
}

/// Convert an interleaved RGB byte buffer to an OpenCV BGR Mat
pub fn rgb_to_bgr_mat(rgb_data: &[u8], width: i32, height: i32) -> Result<Mat> {
    let expected = (width.max(0) as usize) * (height.max(0) as usize) * 3;
    if rgb_data.len() != expected {
        return Err(ConversionError::invalid_parameter(
            "rgb_data",
            format!("{} bytes for {}x{} image", rgb_data.len(), width, height),
        ));
    }

    let mut mat = Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(0.0))
        .map_err(|e| ConversionError::opencv("Mat allocation", e))?;

    let bgr = mat
        .data_bytes_mut()
        .map_err(|e| ConversionError::opencv("Mat data access", e))?;

    for (dst, src) in bgr.chunks_exact_mut(3).zip(rgb_data.chunks_exact(3)) {
        dst[0] = src[2];
        dst[1] = src[1];
        dst[2] = src[0];
    }

    Ok(mat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::Vec3b;

    #[test]
    fn test_rgb_to_bgr_conversion() {
        // 2x2 image: red, green, blue, white
        let rgb_data = vec![
            255, 0, 0,    // Red
            0, 255, 0,    // Green
            0, 0, 255,    // Blue
            255, 255, 255 // White
        ];

        let mat = rgb_to_bgr_mat(&rgb_data, 2, 2).unwrap();

        let px = |r, c| *mat.at_2d::<Vec3b>(r, c).unwrap();
        assert_eq!(px(0, 0).0, [0, 0, 255]);
        assert_eq!(px(0, 1).0, [0, 255, 0]);
        assert_eq!(px(1, 0).0, [255, 0, 0]);
        assert_eq!(px(1, 1).0, [255, 255, 255]);
    }

    #[test]
    fn test_rgb_buffer_size_mismatch() {
        let result = rgb_to_bgr_mat(&[0, 0, 0], 2, 2);
        assert!(matches!(result, Err(ConversionError::InvalidParameter { .. })));
    }

    #[test]
    fn test_png_roundtrip_through_opencv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page_01.png");

        let rgb = image::RgbImage::from_fn(4, 3, |x, y| {
            image::Rgb([x as u8 * 10, y as u8 * 20, 200])
        });
        rgb.save(&path).unwrap();

        let mat = load_image(&path).unwrap();
        assert_eq!(mat.cols(), 4);
        assert_eq!(mat.rows(), 3);
        let px = mat.at_2d::<Vec3b>(2, 3).unwrap();
        assert_eq!(px.0, [200, 40, 30]);

        let out = dir.path().join("crop.png");
        save_png(&out, &mat).unwrap();
        let reloaded = image::open(&out).unwrap().to_rgb8();
        assert_eq!(reloaded, rgb);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_image(Path::new("nonexistent_page.png"));
        assert!(matches!(result, Err(ConversionError::ImageLoadError { .. })));
    }
}
