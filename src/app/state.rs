// SPDX-License-Identifier: GPL-3.0-only

//! Session state types shared with the rendering layer

use crate::backends::camera::{Facing, PermissionState, Photo};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filters offered on the preview screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// No filter applied (displays as "Original")
    #[default]
    Original,
    /// Black & white
    #[serde(rename = "bw", alias = "monochrome", alias = "mono")]
    Monochrome,
    /// Warm brownish tint
    Sepia,
    /// Lifted blacks with muted colours
    Vintage,
    /// Blue colour temperature shift
    Cool,
    /// Orange colour temperature shift
    Warm,
}

impl FilterKind {
    /// All filters in picker order
    pub const ALL: [FilterKind; 6] = [
        FilterKind::Original,
        FilterKind::Monochrome,
        FilterKind::Sepia,
        FilterKind::Vintage,
        FilterKind::Cool,
        FilterKind::Warm,
    ];

    /// Stable identifier used in requests, file names and the CLI
    pub fn id(&self) -> &'static str {
        match self {
            FilterKind::Original => "original",
            FilterKind::Monochrome => "bw",
            FilterKind::Sepia => "sepia",
            FilterKind::Vintage => "vintage",
            FilterKind::Cool => "cool",
            FilterKind::Warm => "warm",
        }
    }

    /// Label shown in the filter picker
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterKind::Original => "Original",
            FilterKind::Monochrome => "B&W",
            FilterKind::Sepia => "Sepia",
            FilterKind::Vintage => "Vintage",
            FilterKind::Cool => "Cool",
            FilterKind::Warm => "Warm",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Unknown filter identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterError(pub String);

impl fmt::Display for ParseFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown filter: {}", self.0)
    }
}

impl std::error::Error for ParseFilterError {}

impl FromStr for FilterKind {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "original" => Ok(FilterKind::Original),
            "bw" | "mono" | "monochrome" => Ok(FilterKind::Monochrome),
            "sepia" => Ok(FilterKind::Sepia),
            "vintage" => Ok(FilterKind::Vintage),
            "cool" => Ok(FilterKind::Cool),
            "warm" => Ok(FilterKind::Warm),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// Where a capture session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Camera access not requested yet
    AwaitingPermission,
    /// Access refused; only a new permission request is offered
    Denied,
    /// Live preview, ready to capture
    Live,
    /// A captured photo is waiting to be committed or discarded
    Staged,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::AwaitingPermission => write!(f, "awaiting permission"),
            SessionPhase::Denied => write!(f, "permission denied"),
            SessionPhase::Live => write!(f, "live"),
            SessionPhase::Staged => write!(f, "staged"),
        }
    }
}

/// Result of a filter selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The preview now shows this photo
    Applied(Photo),
    /// A newer request replaced this one; nothing was changed
    Superseded,
}

/// Owned view of a capture session for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub permission: PermissionState,
    pub facing: Facing,
    /// Unfiltered capture
    pub staged: Option<Photo>,
    /// Capture with the active filter applied
    pub preview: Option<Photo>,
    pub active_filter: FilterKind,
    /// Filter whose transform is still running
    pub pending_filter: Option<FilterKind>,
    pub capture_pending: bool,
}
