// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON at `<config_dir>/snap-gallery/config.json`. Every field has
//! a default, so partial files are accepted.

use crate::backends::camera::Facing;
use crate::constants::{self, transform};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Output settings for filtered photos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformSettings {
    /// Scale filtered photos down to this width (`None` keeps full size)
    pub resize_width: Option<u32>,
    /// JPEG quality for filtered photos (1-100)
    pub jpeg_quality: u8,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            resize_width: Some(transform::DEFAULT_RESIZE_WIDTH),
            jpeg_quality: transform::DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Photos always shown first in the gallery (never deletable)
    pub default_photos: Vec<String>,
    /// Folder committed photos are saved to (`None` = pictures dir)
    pub output_dir: Option<PathBuf>,
    /// Filter output settings
    pub transform: TransformSettings,
    /// Camera used when a session starts
    pub initial_facing: Facing,
    /// Whether the file-backed camera grants access
    pub camera_access: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_photos: constants::DEFAULT_PHOTOS
                .iter()
                .map(|uri| uri.to_string())
                .collect(),
            output_dir: None,
            transform: TransformSettings::default(),
            initial_facing: Facing::Back,
            camera_access: true,
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(constants::APP_DIR_NAME)
                .join(constants::CONFIG_FILE_NAME)
        })
    }

    /// Load from the default location, falling back to defaults
    ///
    /// A missing file is normal on first start. An unreadable or invalid file
    /// is logged and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            debug!("No config directory, using defaults");
            return Self::default();
        };

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Ignoring config file");
                Self::default()
            }
        }
    }

    /// Load from a specific file
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent folders
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Config(format!("{}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Folder committed photos are saved to
    pub fn photos_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            dirs::picture_dir()
                .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
                .join(constants::DEFAULT_SAVE_FOLDER)
        })
    }

    /// Parent folder for per-run scratch folders (uncommitted photos)
    pub fn scratch_root() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(constants::APP_DIR_NAME)
    }
}
