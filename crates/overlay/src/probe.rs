//! Natural-dimension probing for image files.

use std::path::Path;

/// Errors from reading image metadata.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to read image dimensions from {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Read an image's natural pixel dimensions from its header.
///
/// Decodes only the header, not the pixel data, so this is cheap
/// even for large uploads.
pub fn natural_dimensions(path: &Path) -> Result<(u32, u32), ProbeError> {
    image::image_dimensions(path).map_err(|source| ProbeError::Unreadable {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_probe_error() {
        let err = natural_dimensions(Path::new("/nonexistent/upload.jpg")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/upload.jpg"));
    }

    #[test]
    fn png_header_dimensions_are_read() {
        let path = std::env::temp_dir().join("parkwatch_probe_test.png");
        image::RgbaImage::from_pixel(640, 480, image::Rgba([0, 0, 0, 0xff]))
            .save(&path)
            .unwrap();

        let (width, height) = natural_dimensions(&path).unwrap();
        assert_eq!((width, height), (640, 480));

        let _ = std::fs::remove_file(&path);
    }
}
