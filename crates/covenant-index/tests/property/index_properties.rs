//! Property tests for VectorIndex search ordering and counts.

use proptest::prelude::*;

use covenant_core::models::Metadata;
use covenant_index::VectorIndex;

const DIM: usize = 4;

fn vectors(max: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-1.0f32..1.0, DIM), 0..max)
}

fn build(vecs: &[Vec<f32>]) -> VectorIndex {
    let index = VectorIndex::new();
    index
        .add(
            (0..vecs.len()).map(|i| format!("doc-{i}")).collect(),
            vecs.to_vec(),
            vec![Metadata::new(); vecs.len()],
        )
        .unwrap();
    index
}

proptest! {
    #[test]
    fn result_count_is_min_of_k_and_len(vecs in vectors(20), k in 0usize..30) {
        let index = build(&vecs);
        let hits = index.search(&[0.5; DIM], k).unwrap();
        prop_assert_eq!(hits.len(), k.min(vecs.len()));
    }

    #[test]
    fn scores_are_non_increasing(vecs in vectors(20), query in prop::collection::vec(-1.0f32..1.0, DIM)) {
        let index = build(&vecs);
        let hits = index.search(&query, vecs.len()).unwrap();
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn top_hit_is_the_brute_force_maximum(vecs in vectors(20), query in prop::collection::vec(-1.0f32..1.0, DIM)) {
        prop_assume!(!vecs.is_empty());
        let index = build(&vecs);
        let best = vecs
            .iter()
            .map(|v| v.iter().zip(&query).map(|(a, b)| a * b).sum::<f32>())
            .fold(f32::NEG_INFINITY, f32::max);
        let hits = index.search(&query, 1).unwrap();
        prop_assert!((hits[0].score - best).abs() < 1e-5);
    }

    #[test]
    fn snapshot_restore_preserves_results(vecs in vectors(10), query in prop::collection::vec(-1.0f32..1.0, DIM)) {
        let index = build(&vecs);
        let restored = VectorIndex::new();
        restored.restore(&index.snapshot().unwrap()).unwrap();
        prop_assert_eq!(index.search(&query, 5).unwrap(), restored.search(&query, 5).unwrap());
    }
}
