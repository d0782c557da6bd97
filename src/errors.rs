// SPDX-License-Identifier: MPL-2.0

//! Error types for the capture workflow
//!
//! Every error here is recoverable: a session that reports one stays usable
//! and keeps the state documented for the failing operation.

use crate::app::{FilterKind, SessionPhase};
use crate::backends::camera::BackendError;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for capture session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Top-level application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Capture session errors
    Session(SessionError),
    /// Collaborator (camera / transform) errors
    Backend(BackendError),
    /// Gallery errors
    Gallery(GalleryError),
    /// User profile errors
    Profile(ProfileError),
    /// Configuration errors
    Config(String),
}

/// Errors reported by [`CaptureSession`](crate::app::CaptureSession) operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The platform refused camera access
    PermissionDenied,
    /// The camera could not deliver a still frame
    CaptureFailed(String),
    /// The image transform for a filter failed
    FilterFailed { filter: FilterKind, reason: String },
    /// A capture is already waiting on the camera
    CaptureInProgress,
    /// The operation is not allowed in the current phase
    InvalidState {
        operation: &'static str,
        phase: SessionPhase,
    },
}

/// Errors reported by the gallery view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    /// Default photos cannot be deleted
    DefaultPhoto { index: usize },
    /// No gallery entry at this index
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors reported by the user profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The string is not a valid email address
    InvalidEmail(String),
    /// The email was already set for this session
    AlreadySet,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Session(e) => write!(f, "Session error: {}", e),
            AppError::Backend(e) => write!(f, "Backend error: {}", e),
            AppError::Gallery(e) => write!(f, "Gallery error: {}", e),
            AppError::Profile(e) => write!(f, "Profile error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::PermissionDenied => write!(f, "Camera permission denied"),
            SessionError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            SessionError::FilterFailed { filter, reason } => {
                write!(f, "Filter '{}' failed: {}", filter.id(), reason)
            }
            SessionError::CaptureInProgress => write!(f, "A capture is already in progress"),
            SessionError::InvalidState { operation, phase } => {
                write!(f, "Cannot {} while {}", operation, phase)
            }
        }
    }
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryError::DefaultPhoto { index } => {
                write!(f, "Photo {} is a default photo and cannot be deleted", index)
            }
            GalleryError::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range (gallery has {} photos)", index, len)
            }
        }
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            ProfileError::AlreadySet => write!(f, "Email is already set"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for SessionError {}
impl std::error::Error for GalleryError {}
impl std::error::Error for ProfileError {}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        AppError::Backend(err)
    }
}

impl From<GalleryError> for AppError {
    fn from(err: GalleryError) -> Self {
        AppError::Gallery(err)
    }
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        AppError::Profile(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_message() {
        let err = SessionError::InvalidState {
            operation: "commit",
            phase: SessionPhase::Live,
        };
        assert_eq!(err.to_string(), "Cannot commit while live");
    }

    #[test]
    fn test_filter_failed_uses_filter_id() {
        let err = SessionError::FilterFailed {
            filter: FilterKind::Monochrome,
            reason: "decoder exploded".into(),
        };
        assert_eq!(err.to_string(), "Filter 'bw' failed: decoder exploded");
    }

    #[test]
    fn test_conversion_to_app_error() {
        let err: AppError = GalleryError::DefaultPhoto { index: 1 }.into();
        assert!(matches!(err, AppError::Gallery(GalleryError::DefaultPhoto { index: 1 })));
    }
}
