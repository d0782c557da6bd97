// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture session
//!
//! One [`CaptureSession`] drives one camera screen:
//!
//! ```text
//! AwaitingPermission ──grant──▶ Live ──capture──▶ Staged ──commit/discard──▶ Live
//!        │  ▲                                       │  ▲
//!      deny │ request                         select_filter
//!        ▼  │                                       ▼  │
//!        Denied                               (transform in flight)
//! ```
//!
//! Every transition is checked under the session lock and rejected when the
//! session is in the wrong phase, so invalid calls never change state. The
//! lock is never held across an `.await`; collaborator calls run unlocked and
//! their results are applied only if no newer request replaced them.

use super::state::{FilterKind, FilterOutcome, SessionPhase, SessionSnapshot};
use crate::backends::camera::{CameraBackend, Facing, PermissionState, Photo};
use crate::config::{Config, TransformSettings};
use crate::errors::{SessionError, SessionResult};
use crate::pipelines::photo::{ImageTransform, TransformRequest};
use crate::storage::PhotoStore;
use futures::future::{AbortHandle, Abortable, Aborted};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Options fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Camera selected when the screen opens
    pub initial_facing: Facing,
    /// Parameters sent with each filter transform
    pub transform: TransformSettings,
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            initial_facing: config.initial_facing,
            transform: config.transform,
        }
    }
}

/// Captured photo awaiting commit or discard
#[derive(Debug, Clone)]
struct StagedPhoto {
    original: Photo,
    preview: Photo,
    filter: FilterKind,
    pending: Option<FilterKind>,
}

impl StagedPhoto {
    fn new(photo: Photo) -> Self {
        Self {
            preview: photo.clone(),
            original: photo,
            filter: FilterKind::Original,
            pending: None,
        }
    }
}

#[derive(Debug)]
struct SessionState {
    permission: PermissionState,
    facing: Facing,
    capture_pending: bool,
    staged: Option<StagedPhoto>,
    /// Bumped whenever the staged photo or its preview is replaced; transform
    /// results tagged with an older epoch are stale
    epoch: u64,
    in_flight: Option<AbortHandle>,
}

impl SessionState {
    fn phase(&self) -> SessionPhase {
        match self.permission {
            PermissionState::Unknown => SessionPhase::AwaitingPermission,
            PermissionState::Denied => SessionPhase::Denied,
            PermissionState::Granted if self.staged.is_some() => SessionPhase::Staged,
            PermissionState::Granted => SessionPhase::Live,
        }
    }

    fn require(&self, operation: &'static str, expected: SessionPhase) -> SessionResult<()> {
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            debug!(operation, %phase, "Rejected operation");
            Err(SessionError::InvalidState { operation, phase })
        }
    }

    /// Invalidate any running transform
    fn supersede(&mut self) {
        self.epoch += 1;
        if let Some(handle) = self.in_flight.take() {
            debug!("Cancelling in-flight filter transform");
            handle.abort();
        }
        if let Some(staged) = self.staged.as_mut() {
            staged.pending = None;
        }
    }

    fn take_staged(&mut self, operation: &'static str) -> SessionResult<StagedPhoto> {
        self.require(operation, SessionPhase::Staged)?;
        self.supersede();
        self.staged.take().ok_or(SessionError::InvalidState {
            operation,
            phase: SessionPhase::Live,
        })
    }
}

struct SessionInner {
    camera: Arc<dyn CameraBackend>,
    transform: Arc<dyn ImageTransform>,
    store: PhotoStore,
    settings: TransformSettings,
    state: Mutex<SessionState>,
}

impl SessionInner {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the capture-pending flag if a capture future is dropped mid-way
struct CaptureGuard<'a> {
    inner: &'a SessionInner,
    armed: bool,
}

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.inner.lock().capture_pending = false;
        }
    }
}

/// Clears the pending filter if a transform future is dropped mid-way
struct TransformGuard<'a> {
    inner: &'a SessionInner,
    epoch: u64,
    armed: bool,
}

impl Drop for TransformGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.inner.lock();
        if state.epoch == self.epoch {
            state.in_flight = None;
            if let Some(staged) = state.staged.as_mut() {
                staged.pending = None;
            }
        }
    }
}

/// Camera screen state machine
///
/// Cloning yields another handle to the same session, so a filter request
/// can run on one task while another reads [`CaptureSession::snapshot`].
#[derive(Clone)]
pub struct CaptureSession {
    inner: Arc<SessionInner>,
}

impl CaptureSession {
    /// Create a session with default options
    pub fn new(
        camera: Arc<dyn CameraBackend>,
        transform: Arc<dyn ImageTransform>,
        store: PhotoStore,
    ) -> Self {
        Self::with_options(camera, transform, store, SessionOptions::default())
    }

    /// Create a session with explicit options
    pub fn with_options(
        camera: Arc<dyn CameraBackend>,
        transform: Arc<dyn ImageTransform>,
        store: PhotoStore,
        options: SessionOptions,
    ) -> Self {
        let state = SessionState {
            permission: PermissionState::Unknown,
            facing: options.initial_facing,
            capture_pending: false,
            staged: None,
            epoch: 0,
            in_flight: None,
        };

        Self {
            inner: Arc::new(SessionInner {
                camera,
                transform,
                store,
                settings: options.transform,
                state: Mutex::new(state),
            }),
        }
    }

    /// Store that commits are appended to
    pub fn store(&self) -> &PhotoStore {
        &self.inner.store
    }

    /// Ask the camera for access
    ///
    /// A no-op once access is granted. After a denial the session stays in
    /// [`SessionPhase::Denied`] and this call may be repeated.
    pub async fn request_permission(&self) -> SessionResult<PermissionState> {
        if self.inner.lock().permission == PermissionState::Granted {
            return Ok(PermissionState::Granted);
        }

        let decision = self.inner.camera.request_access().await;

        let mut state = self.inner.lock();
        if state.permission == PermissionState::Granted {
            return Ok(PermissionState::Granted);
        }
        state.permission = decision.into();

        match state.permission {
            PermissionState::Granted => {
                info!("Camera permission granted");
                Ok(PermissionState::Granted)
            }
            _ => {
                warn!("Camera permission denied");
                Err(SessionError::PermissionDenied)
            }
        }
    }

    /// Switch between front and back camera for the next capture
    pub fn toggle_facing(&self) -> SessionResult<Facing> {
        let mut state = self.inner.lock();
        state.require("switch camera", SessionPhase::Live)?;
        state.facing = state.facing.flipped();

        debug!(facing = %state.facing, "Camera facing toggled");
        Ok(state.facing)
    }

    /// Capture a still and stage it
    ///
    /// On failure the session stays live and nothing is staged. A second
    /// capture while one is waiting on the camera is rejected.
    pub async fn capture(&self) -> SessionResult<Photo> {
        let facing = {
            let mut state = self.inner.lock();
            state.require("capture", SessionPhase::Live)?;
            if state.capture_pending {
                return Err(SessionError::CaptureInProgress);
            }
            state.capture_pending = true;
            state.facing
        };

        let mut guard = CaptureGuard {
            inner: &self.inner,
            armed: true,
        };

        let result = self.inner.camera.capture_still(facing).await;

        let mut state = self.inner.lock();
        guard.armed = false;
        state.capture_pending = false;

        match result {
            Ok(photo) => {
                state.supersede();
                state.staged = Some(StagedPhoto::new(photo.clone()));
                info!(photo = %photo, %facing, "Photo captured");
                Ok(photo)
            }
            Err(e) => {
                warn!(error = %e, "Capture failed");
                Err(SessionError::CaptureFailed(e.to_string()))
            }
        }
    }

    /// Select the filter shown in the preview
    ///
    /// [`FilterKind::Original`] resolves without calling the transform (see
    /// [`CaptureSession::show_original`]). Other filters run the transform
    /// unlocked; when a newer selection, a commit or a discard happens first,
    /// this call returns [`FilterOutcome::Superseded`] and changes nothing.
    /// A failed transform leaves the preview and active filter as they were.
    pub async fn select_filter(&self, filter: FilterKind) -> SessionResult<FilterOutcome> {
        if filter == FilterKind::Original {
            return self.show_original().map(FilterOutcome::Applied);
        }

        let (epoch, source, registration) = {
            let mut state = self.inner.lock();
            state.require("select a filter", SessionPhase::Staged)?;
            state.supersede();

            let (handle, registration) = AbortHandle::new_pair();
            state.in_flight = Some(handle);
            let epoch = state.epoch;

            let Some(staged) = state.staged.as_mut() else {
                return Err(SessionError::InvalidState {
                    operation: "select a filter",
                    phase: SessionPhase::Live,
                });
            };
            staged.pending = Some(filter);
            (epoch, staged.original.clone(), registration)
        };

        let mut guard = TransformGuard {
            inner: &self.inner,
            epoch,
            armed: true,
        };

        let request = TransformRequest::for_filter(filter, &self.inner.settings);
        debug!(filter = filter.id(), epoch, "Filter transform started");

        let result = Abortable::new(
            self.inner.transform.transform(&source, &request),
            registration,
        )
        .await;

        let mut state = self.inner.lock();
        guard.armed = false;

        if state.epoch != epoch {
            debug!(filter = filter.id(), "Discarding superseded filter result");
            return Ok(FilterOutcome::Superseded);
        }
        state.in_flight = None;

        let Some(staged) = state.staged.as_mut() else {
            return Ok(FilterOutcome::Superseded);
        };
        staged.pending = None;

        match result {
            Ok(Ok(photo)) => {
                staged.preview = photo.clone();
                staged.filter = filter;
                info!(filter = filter.id(), preview = %photo, "Filter applied");
                Ok(FilterOutcome::Applied(photo))
            }
            Ok(Err(e)) => {
                warn!(filter = filter.id(), error = %e, "Filter failed");
                Err(SessionError::FilterFailed {
                    filter,
                    reason: e.to_string(),
                })
            }
            Err(Aborted) => Ok(FilterOutcome::Superseded),
        }
    }

    /// Show the unfiltered capture
    ///
    /// Synchronous and never calls the transform. Cancels any running filter.
    pub fn show_original(&self) -> SessionResult<Photo> {
        let mut state = self.inner.lock();
        state.require("select a filter", SessionPhase::Staged)?;
        state.supersede();

        let Some(staged) = state.staged.as_mut() else {
            return Err(SessionError::InvalidState {
                operation: "select a filter",
                phase: SessionPhase::Live,
            });
        };
        staged.preview = staged.original.clone();
        staged.filter = FilterKind::Original;
        Ok(staged.original.clone())
    }

    /// Save the previewed photo to the store and return to live
    pub fn commit(&self) -> SessionResult<Photo> {
        let mut state = self.inner.lock();
        let staged = state.take_staged("commit")?;

        let photo = staged.preview;
        self.inner.store.append(photo.clone());

        info!(photo = %photo, filter = staged.filter.id(), "Photo committed");
        Ok(photo)
    }

    /// Save the unfiltered capture, ignoring the active filter
    pub fn commit_original(&self) -> SessionResult<Photo> {
        let mut state = self.inner.lock();
        let staged = state.take_staged("commit")?;

        self.inner.store.append(staged.original.clone());

        info!(photo = %staged.original, "Original photo committed");
        Ok(staged.original)
    }

    /// Drop the capture without saving and return to live
    pub fn discard(&self) -> SessionResult<Photo> {
        let mut state = self.inner.lock();
        let staged = state.take_staged("discard")?;

        info!(photo = %staged.original, "Photo discarded");
        Ok(staged.original)
    }

    /// Current phase
    pub fn phase(&self) -> SessionPhase {
        self.inner.lock().phase()
    }

    /// Owned view of the whole session
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.lock();
        let staged = state.staged.as_ref();

        SessionSnapshot {
            phase: state.phase(),
            permission: state.permission,
            facing: state.facing,
            staged: staged.map(|s| s.original.clone()),
            preview: staged.map(|s| s.preview.clone()),
            active_filter: staged.map(|s| s.filter).unwrap_or_default(),
            pending_filter: staged.and_then(|s| s.pending),
            capture_pending: state.capture_pending,
        }
    }
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("CaptureSession")
            .field("phase", &state.phase())
            .field("facing", &state.facing)
            .field("epoch", &state.epoch)
            .finish()
    }
}
