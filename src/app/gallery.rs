// SPDX-License-Identifier: GPL-3.0-only

//! Gallery read model
//!
//! The gallery lists the configured default photos first, then every
//! committed photo in store order. Gallery indices past the defaults map to
//! store indices by subtracting the number of defaults.

use crate::backends::camera::Photo;
use crate::config::Config;
use crate::errors::GalleryError;
use crate::storage::PhotoStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Where a gallery photo comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoOrigin {
    /// Bundled photo, always shown, never deletable
    Default,
    /// Committed from a capture session
    Captured,
}

/// One tile in the gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryEntry {
    pub index: usize,
    pub photo: Photo,
    pub origin: PhotoOrigin,
}

impl GalleryEntry {
    pub fn is_deletable(&self) -> bool {
        self.origin == PhotoOrigin::Captured
    }
}

/// Default photos followed by the store contents
#[derive(Debug, Clone)]
pub struct Gallery {
    defaults: Arc<[Photo]>,
    store: PhotoStore,
}

impl Gallery {
    pub fn new(defaults: impl IntoIterator<Item = Photo>, store: PhotoStore) -> Self {
        Self {
            defaults: defaults.into_iter().collect(),
            store,
        }
    }

    /// Gallery using the configured default photos
    pub fn from_config(config: &Config, store: PhotoStore) -> Self {
        Self::new(
            config.default_photos.iter().map(|uri| Photo::new(uri.as_str())),
            store,
        )
    }

    /// All tiles in display order
    pub fn entries(&self) -> Vec<GalleryEntry> {
        let defaults = self.defaults.iter().cloned().map(|photo| (photo, PhotoOrigin::Default));
        let captured = self
            .store
            .snapshot()
            .into_iter()
            .map(|photo| (photo, PhotoOrigin::Captured));

        defaults
            .chain(captured)
            .enumerate()
            .map(|(index, (photo, origin))| GalleryEntry {
                index,
                photo,
                origin,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.defaults.len() + self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of non-deletable photos at the front
    pub fn default_count(&self) -> usize {
        self.defaults.len()
    }

    /// Delete the captured photo shown at `index`
    pub fn delete(&self, index: usize) -> Result<Photo, GalleryError> {
        if index < self.defaults.len() {
            debug!(index, "Refusing to delete default photo");
            return Err(GalleryError::DefaultPhoto { index });
        }

        let store_index = index - self.defaults.len();
        match self.store.remove_at(store_index) {
            Some(photo) => {
                info!(index, photo = %photo, "Deleted photo from gallery");
                Ok(photo)
            }
            None => Err(GalleryError::IndexOutOfRange {
                index,
                len: self.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_uses_default_photos() {
        let gallery = Gallery::from_config(&Config::default(), PhotoStore::new());
        assert_eq!(gallery.len(), 4);
        assert!(gallery.entries().iter().all(|e| !e.is_deletable()));
    }

    #[test]
    fn test_entries_are_indexed_in_display_order() {
        let store = PhotoStore::new();
        store.append(Photo::new("c1.jpg"));
        let gallery = Gallery::new([Photo::new("d0.png")], store);

        let entries = gallery.entries();
        assert_eq!(entries[0].origin, PhotoOrigin::Default);
        assert_eq!(entries[1].index, 1);
        assert_eq!(entries[1].photo, Photo::new("c1.jpg"));
        assert!(entries[1].is_deletable());
    }
}
