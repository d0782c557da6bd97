// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Folder name used for config and saved photos
pub const APP_DIR_NAME: &str = "snap-gallery";

/// Default folder name (under the user's pictures directory) for saved photos
pub const DEFAULT_SAVE_FOLDER: &str = "SnapGallery";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Photos shown at the top of the gallery on every start
///
/// These are never deletable and never enter the photo store.
pub const DEFAULT_PHOTOS: [&str; 4] = [
    "https://res.cloudinary.com/babahedz/image/upload/v1686507914/4_dh1u9w.png",
    "https://res.cloudinary.com/babahedz/image/upload/v1686507914/1_f3guh8.png",
    "https://res.cloudinary.com/babahedz/image/upload/v1686507914/2_lrjyge.png",
    "https://res.cloudinary.com/babahedz/image/upload/v1686507913/3_hm866a.png",
];

/// Image transform defaults
pub mod transform {
    /// Width filtered photos are scaled down to
    pub const DEFAULT_RESIZE_WIDTH: u32 = 1000;

    /// JPEG quality for filtered photos (compress 0.9)
    pub const DEFAULT_JPEG_QUALITY: u8 = 90;

    /// JPEG quality for captured stills
    pub const CAPTURE_JPEG_QUALITY: u8 = 92;
}

/// File format helpers
pub mod file_formats {
    /// Image extensions the file-backed camera can read
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

    /// Check if a file extension is a supported image format
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }
}

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions_case_insensitive() {
        assert!(file_formats::is_image_extension("JPG"));
        assert!(file_formats::is_image_extension("png"));
        assert!(!file_formats::is_image_extension("mp4"));
    }
}
