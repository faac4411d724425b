//! Proof verification
//!
//! Needs only the leaf digest, the proof and the hash function. The tree the
//! proof came from is not required.

use crate::core::{combine, Digest, HashFunction, Sha256Hasher};
use crate::proofs::proof::{Proof, ProofPosition};
use tracing::trace;

/// Replays proofs with a given hash function
#[derive(Debug, Clone, Default)]
pub struct ProofVerifier<H = Sha256Hasher> {
    hasher: H,
}

impl<H: HashFunction> ProofVerifier<H> {
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    /// Recompute the root implied by `leaf_digest` and the proof's steps
    pub fn compute_root(&self, leaf_digest: &Digest, proof: &Proof) -> Digest {
        replay(&self.hasher, leaf_digest, proof)
    }

    /// Whether the proof links `leaf_digest` to its expected root
    pub fn verify(&self, leaf_digest: &Digest, proof: &Proof) -> bool {
        self.compute_root(leaf_digest, proof) == proof.expected_root
    }

    /// Hash the chunk bytes and verify the resulting leaf
    pub fn verify_chunk(&self, data: &[u8], proof: &Proof) -> bool {
        self.verify(&self.hasher.hash(data), proof)
    }
}

/// Fold the proof steps over `leaf_digest`, placing each sibling in the slot
/// its position names
pub fn replay<H: HashFunction + ?Sized>(hasher: &H, leaf_digest: &Digest, proof: &Proof) -> Digest {
    proof
        .steps
        .iter()
        .enumerate()
        .fold(leaf_digest.clone(), |current, (i, step)| {
            let next = match step.position {
                ProofPosition::Left => combine(hasher, &step.digest, &current),
                ProofPosition::Right => combine(hasher, &current, &step.digest),
            };
            trace!(step = i, digest = %next.short(), "Replayed proof step");
            next
        })
}

/// Verify with SHA-256
pub fn verify_proof(leaf_digest: &Digest, proof: &Proof) -> bool {
    ProofVerifier::new(Sha256Hasher).verify(leaf_digest, proof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sha256;
    use crate::proofs::merkle::MerkleTree;
    use crate::proofs::proof::ProofStep;

    fn tree_of(items: &[&str]) -> MerkleTree {
        let chunks: Vec<&[u8]> = items.iter().map(|s| s.as_bytes()).collect();
        MerkleTree::from_chunks(&chunks).unwrap()
    }

    #[test]
    fn test_verify_every_leaf() {
        let items = ["a", "b", "c", "d", "e", "f"];
        let tree = tree_of(&items);
        let verifier = ProofVerifier::new(Sha256Hasher);

        for (i, item) in items.iter().enumerate() {
            let proof = tree.prove(i).unwrap();
            assert!(verifier.verify_chunk(item.as_bytes(), &proof), "leaf {}", i);
        }
    }

    #[test]
    fn test_wrong_leaf_rejected() {
        let tree = tree_of(&["a", "b", "c"]);
        let proof = tree.prove(1).unwrap();
        assert!(!verify_proof(&sha256(b"a"), &proof));
        assert!(verify_proof(&sha256(b"b"), &proof));
    }

    #[test]
    fn test_flipped_position_rejected() {
        let tree = tree_of(&["a", "b", "c", "d"]);
        let mut proof = tree.prove(2).unwrap();
        proof.steps[1].position = proof.steps[1].position.flipped();
        assert!(!verify_proof(&sha256(b"c"), &proof));
    }

    #[test]
    fn test_compute_root_known_answer() {
        let proof = Proof::new(
            vec![
                ProofStep {
                    position: ProofPosition::Right,
                    digest: sha256(b"b"),
                },
                ProofStep {
                    position: ProofPosition::Right,
                    digest: sha256(b"c"),
                },
            ],
            Digest::new("unused"),
        );
        let root = ProofVerifier::new(Sha256Hasher).compute_root(&sha256(b"a"), &proof);
        assert_eq!(
            root.as_str(),
            "d71dc32fa2cd95be60b32dbb3e63009fa8064407ee19f457c92a09a5ff841a8a"
        );
    }

    #[test]
    fn test_empty_proof_compares_leaf_to_root() {
        let proof = Proof::new(Vec::new(), sha256(b"x"));
        assert!(verify_proof(&sha256(b"x"), &proof));
        assert!(!verify_proof(&sha256(b"y"), &proof));
    }
}
