// SPDX-License-Identifier: MPL-2.0

//! Integration tests for where photo files end up

use image::{Rgb, RgbImage};
use snap_gallery::backends::camera::FileSourceCamera;
use snap_gallery::pipelines::photo::ImageFilterTransform;
use snap_gallery::{CaptureSession, FilterKind, PhotoLibrary, PhotoStore, ScratchDir};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn write_source(dir: &Path) -> PathBuf {
    let path = dir.join("scene.png");
    RgbImage::from_fn(32, 16, |x, y| Rgb([(x * 8) as u8, (y * 16) as u8, 128]))
        .save(&path)
        .unwrap();
    path
}

fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

#[tokio::test]
async fn test_library_receives_only_committed_photos() {
    let root = tempfile::tempdir().unwrap();
    let source = write_source(root.path());
    let scratch = ScratchDir::create(&root.path().join("cache")).unwrap();
    let library = PhotoLibrary::new(root.path().join("Pictures"));

    let store = PhotoStore::new();
    let session = CaptureSession::new(
        Arc::new(FileSourceCamera::new(&source, scratch.path()).unwrap()),
        Arc::new(ImageFilterTransform::new(scratch.path())),
        store.clone(),
    );
    session.request_permission().await.unwrap();

    // Retake: capture, try two filters, discard
    session.capture().await.unwrap();
    session.select_filter(FilterKind::Sepia).await.unwrap();
    session.select_filter(FilterKind::Cool).await.unwrap();
    session.discard().unwrap();

    // Keep: capture, filter, commit
    session.capture().await.unwrap();
    session.select_filter(FilterKind::Warm).await.unwrap();
    let committed = session.commit().unwrap();

    assert_eq!(file_count(scratch.path()), 5);
    assert_eq!(file_count(library.dir()), 0);

    let saved = library.save_all(&store).await.unwrap();

    assert_eq!(saved.len(), 1);
    assert_eq!(file_count(library.dir()), 1);
    let saved_path = saved.snapshot()[0].local_path().unwrap();
    assert!(saved_path.starts_with(library.dir()));
    assert_eq!(
        std::fs::read(saved_path).unwrap(),
        std::fs::read(committed.local_path().unwrap()).unwrap()
    );

    let scratch_path = scratch.path().to_path_buf();
    drop(scratch);
    assert!(!scratch_path.exists());
    assert_eq!(file_count(library.dir()), 1);
}

#[tokio::test]
async fn test_save_all_keeps_store_order() {
    let root = tempfile::tempdir().unwrap();
    let scratch = ScratchDir::create(root.path()).unwrap();
    let store = PhotoStore::new();
    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        let path = scratch.path().join(name);
        std::fs::write(&path, name.as_bytes()).unwrap();
        store.append(snap_gallery::Photo::from_path(path));
    }

    let library = PhotoLibrary::new(root.path().join("library"));
    let saved = library.save_all(&store).await.unwrap();

    let contents: Vec<Vec<u8>> = saved
        .snapshot()
        .iter()
        .map(|photo| std::fs::read(photo.local_path().unwrap()).unwrap())
        .collect();
    assert_eq!(contents, vec![b"a.jpg".to_vec(), b"b.jpg".to_vec(), b"c.jpg".to_vec()]);
}
