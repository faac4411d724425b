//! Property-based tests for trees and proofs

use merkle_parts::{sha256, verify_proof, MerkleTree, ProofVerifier, Sha256Hasher};
use proptest::collection::{hash_set, vec};
use proptest::prelude::*;

fn distinct_chunks(max: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    hash_set(vec(any::<u8>(), 1..48), 1..max).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_leaf_round_trips(data in distinct_chunks(40)) {
        let tree = MerkleTree::from_chunks(&data).unwrap();
        for (index, chunk) in data.iter().enumerate() {
            let proof = tree.prove(index).unwrap();
            prop_assert_eq!(&proof.expected_root, tree.root_digest());
            prop_assert!(verify_proof(&sha256(chunk), &proof));
            prop_assert!(proof.len() <= tree.height());
        }
    }

    #[test]
    fn prop_wrong_leaf_fails(data in distinct_chunks(24), pick in any::<prop::sample::Index>()) {
        prop_assume!(data.len() > 1);
        let tree = MerkleTree::from_chunks(&data).unwrap();
        let target = pick.index(data.len());
        let proof = tree.prove(target).unwrap();

        for (index, chunk) in data.iter().enumerate() {
            prop_assert_eq!(verify_proof(&sha256(chunk), &proof), index == target);
        }
    }

    #[test]
    fn prop_flipped_step_fails(
        data in distinct_chunks(24),
        pick in any::<prop::sample::Index>(),
        step in any::<prop::sample::Index>(),
    ) {
        prop_assume!(data.len() > 1);
        let tree = MerkleTree::from_chunks(&data).unwrap();
        let target = pick.index(data.len());
        let mut proof = tree.prove(target).unwrap();
        prop_assume!(!proof.is_empty());

        let step = step.index(proof.len());
        proof.steps[step].position = proof.steps[step].position.flipped();

        let verifier = ProofVerifier::new(Sha256Hasher);
        prop_assert!(!verifier.verify_chunk(&data[target], &proof));
    }

    #[test]
    fn prop_root_is_deterministic(data in distinct_chunks(32)) {
        let first = MerkleTree::from_chunks(&data).unwrap();
        let second = MerkleTree::from_chunks(&data).unwrap();
        prop_assert_eq!(first.root_digest(), second.root_digest());
    }

    #[test]
    fn prop_swapping_chunks_changes_root(data in distinct_chunks(32)) {
        prop_assume!(data.len() > 1);
        let original = MerkleTree::from_chunks(&data).unwrap();

        let mut swapped = data.clone();
        swapped.swap(0, data.len() - 1);
        let reordered = MerkleTree::from_chunks(&swapped).unwrap();

        prop_assert_ne!(original.root_digest(), reordered.root_digest());
    }

    #[test]
    fn prop_layer_sizes_halve(data in distinct_chunks(64)) {
        let tree = MerkleTree::from_chunks(&data).unwrap();
        for window in tree.layers().windows(2) {
            prop_assert_eq!(window[1].len(), (window[0].len() + 1) / 2);
        }
        prop_assert_eq!(tree.layers().last().unwrap().len(), 1);
    }
}
