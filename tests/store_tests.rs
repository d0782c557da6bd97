// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the photo store

use snap_gallery::{Photo, PhotoStore};

fn photos(n: usize) -> Vec<Photo> {
    (0..n).map(|i| Photo::new(format!("p{}.jpg", i))).collect()
}

#[test]
fn test_append_preserves_call_order() {
    let store = PhotoStore::new();
    assert!(store.is_empty());

    for photo in photos(5) {
        store.append(photo);
    }

    assert_eq!(store.len(), 5);
    assert_eq!(store.snapshot(), photos(5));
}

#[test]
fn test_duplicates_allowed() {
    let store = PhotoStore::new();
    store.append(Photo::new("same.jpg"));
    store.append(Photo::new("same.jpg"));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_remove_at_shifts_later_photos() {
    // Store of 4, remove index 2
    let store = PhotoStore::new();
    for photo in photos(4) {
        store.append(photo);
    }

    let removed = store.remove_at(2);

    assert_eq!(removed, Some(Photo::new("p2.jpg")));
    let after = store.snapshot();
    assert_eq!(after.len(), 3);
    assert_eq!(after[0], Photo::new("p0.jpg"));
    assert_eq!(after[1], Photo::new("p1.jpg"));
    assert_eq!(after[2], Photo::new("p3.jpg"));
}

#[test]
fn test_remove_every_valid_index() {
    for index in 0..6 {
        let store = PhotoStore::new();
        for photo in photos(6) {
            store.append(photo);
        }
        let before = store.snapshot();

        store.remove_at(index);

        let after = store.snapshot();
        assert_eq!(after.len(), before.len() - 1);
        assert_eq!(&after[..index], &before[..index]);
        assert_eq!(&after[index..], &before[index + 1..]);
    }
}

#[test]
fn test_remove_out_of_range_is_noop() {
    let store = PhotoStore::new();
    for photo in photos(2) {
        store.append(photo);
    }

    assert_eq!(store.remove_at(2), None);
    assert_eq!(store.remove_at(usize::MAX), None);
    assert_eq!(store.snapshot(), photos(2));
}

#[test]
fn test_concurrent_appends_are_not_lost() {
    let store = PhotoStore::new();
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..50 {
                    store.append(Photo::new(format!("t{}-{}.jpg", t, i)));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 400);
}
