//! Snapshot/restore behaviour across index instances.
//!
//! - Restored index answers queries identically to the original
//! - Every kind of corruption is rejected and leaves the target intact
//! - Searches from many threads agree while a writer inserts

use std::sync::Arc;
use std::thread;

use covenant_core::errors::{CovenantError, IndexError};
use covenant_core::models::Metadata;
use covenant_index::VectorIndex;

fn meta(category: &str) -> Metadata {
    let mut m = Metadata::new();
    m.insert("category".to_string(), category.to_string());
    m
}

fn populated() -> VectorIndex {
    let index = VectorIndex::new();
    index
        .add(
            vec![
                "liquidated damages".into(),
                "termination rights".into(),
                "arbitration venue".into(),
            ],
            vec![vec![0.9, 0.1, 0.0], vec![0.1, 0.9, 0.0], vec![0.0, 0.2, 0.8]],
            vec![meta("risk"), meta("risk"), meta("dispute")],
        )
        .unwrap();
    index
}

#[test]
fn restore_reproduces_search_results() {
    let original = populated();
    let bytes = original.snapshot().unwrap();

    let restored = VectorIndex::new();
    restored.restore(&bytes).unwrap();

    for query in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.3, 0.3, 0.3]] {
        assert_eq!(
            original.search(&query, 3).unwrap(),
            restored.search(&query, 3).unwrap()
        );
    }
    assert_eq!(restored.dimension().unwrap(), Some(3));
}

#[test]
fn empty_index_snapshot_restores_empty() {
    let bytes = VectorIndex::new().snapshot().unwrap();
    let target = populated();
    target.restore(&bytes).unwrap();
    assert!(target.is_empty().unwrap());
    assert_eq!(target.dimension().unwrap(), None);
}

#[test]
fn corrupted_snapshot_leaves_index_untouched() {
    let target = populated();
    let before = target.search(&[1.0, 0.0, 0.0], 3).unwrap();

    let mut bytes = populated().snapshot().unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x5A;

    let err = target.restore(&bytes).unwrap_err();
    assert!(matches!(
        err,
        CovenantError::IndexError(IndexError::CorruptSnapshot { .. })
    ));
    assert_eq!(target.len().unwrap(), 3);
    assert_eq!(target.search(&[1.0, 0.0, 0.0], 3).unwrap(), before);
}

#[test]
fn garbage_is_rejected() {
    let target = VectorIndex::new();
    let blobs: [&[u8]; 3] = [b"", b"not a snapshot at all, clearly", &[0u8; 64]];
    for blob in blobs {
        assert!(target.restore(blob).is_err());
    }
    assert!(target.is_empty().unwrap());
}

#[test]
fn restored_index_enforces_dimension() {
    let restored = VectorIndex::new();
    restored.restore(&populated().snapshot().unwrap()).unwrap();
    let err = restored
        .add(vec!["x".into()], vec![vec![1.0, 0.0]], vec![meta("risk")])
        .unwrap_err();
    assert!(matches!(
        err,
        CovenantError::IndexError(IndexError::DimensionMismatch { expected: 3, actual: 2 })
    ));
}

#[test]
fn concurrent_readers_with_writer() {
    let index = Arc::new(populated());
    let writer = {
        let index = Arc::clone(&index);
        thread::spawn(move || {
            for i in 0..50 {
                index
                    .add(
                        vec![format!("chunk {i}")],
                        vec![vec![0.0, 0.0, 0.1]],
                        vec![meta("validity")],
                    )
                    .unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                for _ in 0..50 {
                    let hits = index.search(&[1.0, 0.0, 0.0], 1).unwrap();
                    assert_eq!(hits[0].content, "liquidated damages");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(index.len().unwrap(), 53);
}
