// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Opaque reference to image bytes owned by the media subsystem
///
/// This is a URI or a plain filesystem path. The capture workflow never
/// decodes it; it only hands references between collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo(String);

impl Photo {
    /// Wrap any URI or path string
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Reference a local file
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().to_string_lossy().into_owned())
    }

    /// The raw reference string
    pub fn uri(&self) -> &str {
        &self.0
    }

    /// Local filesystem path, if this reference points at one
    ///
    /// Plain paths resolve as-is. `file://` URIs are percent-decoded, so
    /// `file:///x/My%20Pics/a.jpg` resolves to `/x/My Pics/a.jpg`.
    /// `http(s)://`, other schemes and malformed URIs return `None`.
    pub fn local_path(&self) -> Option<PathBuf> {
        if !self.0.contains("://") {
            return Some(PathBuf::from(&self.0));
        }

        let url = Url::parse(&self.0).ok()?;
        if url.scheme() != "file" {
            return None;
        }
        url.to_file_path().ok()
    }
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which camera the next capture uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Front,
    /// Rear camera (default)
    #[default]
    Back,
}

impl Facing {
    /// The other camera
    pub fn flipped(self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facing::Front => write!(f, "front"),
            Facing::Back => write!(f, "back"),
        }
    }
}

/// Camera permission as last reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Not asked yet
    #[default]
    Unknown,
    Denied,
    Granted,
}

/// Answer to a camera access request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied,
}

impl From<AccessDecision> for PermissionState {
    fn from(decision: AccessDecision) -> Self {
        match decision {
            AccessDecision::Granted => PermissionState::Granted,
            AccessDecision::Denied => PermissionState::Denied,
        }
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for collaborator operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Camera access was refused
    AccessDenied,
    /// Camera hardware could not deliver a frame
    CaptureFailed(String),
    /// Image transform failed
    TransformFailed(String),
    /// Photo reference is not a local file
    NotLocal(String),
    /// General I/O error
    IoError(String),
    /// Image decode/encode error
    ImageError(String),
    /// Other errors
    Other(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::AccessDenied => write!(f, "Camera access denied"),
            BackendError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            BackendError::TransformFailed(msg) => write!(f, "Transform failed: {}", msg),
            BackendError::NotLocal(uri) => write!(f, "Not a local photo: {}", uri),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::ImageError(msg) => write!(f, "Image error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::IoError(err.to_string())
    }
}

impl From<image::ImageError> for BackendError {
    fn from(err: image::ImageError) -> Self {
        BackendError::ImageError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for BackendError {
    fn from(err: tokio::task::JoinError) -> Self {
        BackendError::Other(format!("Blocking task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_path_resolution() {
        assert_eq!(
            Photo::new("/tmp/a.jpg").local_path(),
            Some(PathBuf::from("/tmp/a.jpg"))
        );
        assert_eq!(
            Photo::new("file:///tmp/b.jpg").local_path(),
            Some(PathBuf::from("/tmp/b.jpg"))
        );
        assert_eq!(Photo::new("https://example.com/c.png").local_path(), None);
    }

    #[test]
    fn test_file_uri_is_percent_decoded() {
        assert_eq!(
            Photo::new("file:///x/My%20Pics/a%23b.jpg").local_path(),
            Some(PathBuf::from("/x/My Pics/a#b.jpg"))
        );
        // Remote host
        assert_eq!(Photo::new("file://server/share/a.jpg").local_path(), None);
    }

    #[test]
    fn test_facing_flip() {
        assert_eq!(Facing::Back.flipped(), Facing::Front);
        assert_eq!(Facing::Front.flipped().flipped(), Facing::Front);
    }

    #[test]
    fn test_photo_serializes_as_string() {
        let json = serde_json::to_string(&Photo::new("x.jpg")).unwrap();
        assert_eq!(json, "\"x.jpg\"");
    }
}
