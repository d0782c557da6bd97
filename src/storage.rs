// SPDX-License-Identifier: MPL-2.0

//! Photo storage
//!
//! [`PhotoStore`] is a cloneable handle to one ordered list of photos shared
//! by the capture session (writer) and the gallery (reader). Each mutation
//! runs under the channel's write lock, so a snapshot never observes a
//! half-applied append or removal, and subscribers are woken after every
//! change.
//!
//! Files behind the references live in two places:
//! - [`ScratchDir`]: captures and filter previews of one run, removed on drop
//! - [`PhotoLibrary`]: the user's photo folder, which only receives committed
//!   photos

use crate::backends::camera::{BackendError, BackendResult, Photo};
use crate::pipelines::photo::encoding::output_path;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Ordered, process-wide list of committed photos
///
/// Newest photos are appended last. Duplicate references are allowed.
#[derive(Clone)]
pub struct PhotoStore {
    photos: Arc<watch::Sender<Vec<Photo>>>,
}

impl PhotoStore {
    /// Create an empty store
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Vec::new());
        Self {
            photos: Arc::new(sender),
        }
    }

    /// Append a photo at the end
    pub fn append(&self, photo: Photo) {
        debug!(photo = %photo, "Appending photo to store");
        self.photos.send_modify(|photos| photos.push(photo));
    }

    /// Remove the photo currently at `index`
    ///
    /// Later photos shift down by one. An out-of-range index leaves the store
    /// untouched and returns `None`.
    pub fn remove_at(&self, index: usize) -> Option<Photo> {
        let mut removed = None;
        self.photos.send_if_modified(|photos| {
            if index < photos.len() {
                removed = Some(photos.remove(index));
                true
            } else {
                false
            }
        });

        match &removed {
            Some(photo) => debug!(index, photo = %photo, "Removed photo from store"),
            None => debug!(index, "Ignoring out-of-range removal"),
        }
        removed
    }

    /// Owned copy of the current list
    pub fn snapshot(&self) -> Vec<Photo> {
        self.photos.borrow().clone()
    }

    /// Number of committed photos
    pub fn len(&self) -> usize {
        self.photos.borrow().len()
    }

    /// Check if no photo was committed
    pub fn is_empty(&self) -> bool {
        self.photos.borrow().is_empty()
    }

    /// Receiver woken after every append or removal
    pub fn subscribe(&self) -> watch::Receiver<Vec<Photo>> {
        self.photos.subscribe()
    }
}

impl Default for PhotoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PhotoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoStore")
            .field("len", &self.len())
            .finish()
    }
}

/// Per-run folder for photos that may never be committed
///
/// Discarded captures and replaced filter previews stay here until the
/// folder is dropped. Anything still writing into it (a blocking transform
/// whose request was cancelled) must finish before the drop.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Create a fresh, uniquely named folder under `parent`
    pub fn create(parent: &Path) -> BackendResult<Self> {
        let path = parent.join(format!("run-{}", Uuid::new_v4().simple()));
        std::fs::create_dir_all(&path)?;

        debug!(path = %path.display(), "Created scratch folder");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed scratch folder"),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to remove scratch folder")
            }
        }
    }
}

/// The user's photo folder
#[derive(Debug, Clone)]
pub struct PhotoLibrary {
    dir: PathBuf,
}

impl PhotoLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy a local photo into the library under a fresh name
    pub async fn save(&self, photo: &Photo) -> BackendResult<Photo> {
        let source = photo
            .local_path()
            .ok_or_else(|| BackendError::NotLocal(photo.uri().to_string()))?;
        let target = output_path(&self.dir, "photo");

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::copy(&source, &target).await?;

        info!(source = %source.display(), target = %target.display(), "Saved photo to library");
        Ok(Photo::from_path(target))
    }

    /// Save every photo of `store`, returning a store of the saved copies in
    /// the same order
    pub async fn save_all(&self, store: &PhotoStore) -> BackendResult<PhotoStore> {
        let saved = PhotoStore::new();
        for photo in store.snapshot() {
            saved.append(self.save(&photo).await?);
        }
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let store = PhotoStore::new();
        let other = store.clone();
        store.append(Photo::new("a.jpg"));
        assert_eq!(other.snapshot(), vec![Photo::new("a.jpg")]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = PhotoStore::new();
        store.append(Photo::new("a.jpg"));

        let mut snapshot = store.snapshot();
        snapshot.clear();

        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = PhotoStore::new();
        let mut receiver = store.subscribe();

        store.append(Photo::new("a.jpg"));
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow_and_update().len(), 1);

        // Out-of-range removal does not notify
        store.remove_at(5);
        assert!(!receiver.has_changed().unwrap());
    }

    #[test]
    fn test_scratch_dir_removed_on_drop() {
        let parent = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::create(parent.path()).unwrap();
        let path = scratch.path().to_path_buf();
        std::fs::write(path.join("left.jpg"), b"x").unwrap();

        drop(scratch);

        assert!(!path.exists());
        assert!(parent.path().exists());
    }

    #[tokio::test]
    async fn test_library_copies_local_photo() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("staged.jpg");
        std::fs::write(&source, b"jpeg bytes").unwrap();
        let library = PhotoLibrary::new(dir.path().join("library"));

        let saved = library.save(&Photo::from_path(&source)).await.unwrap();

        let saved_path = saved.local_path().unwrap();
        assert!(saved_path.starts_with(library.dir()));
        assert_eq!(std::fs::read(saved_path).unwrap(), b"jpeg bytes");
        assert!(source.exists());
    }

    #[tokio::test]
    async fn test_library_rejects_remote_photo() {
        let dir = tempfile::tempdir().unwrap();
        let library = PhotoLibrary::new(dir.path());

        let err = library
            .save(&Photo::new("https://example.com/a.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotLocal(_)));
    }
}
