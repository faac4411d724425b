//! Inclusion proof generation
//!
//! A proof is the ordered list of sibling digests met while walking from a
//! leaf up to the root, each tagged with the slot the sibling occupies in the
//! pairing. The verifier uses that slot to rebuild the same left-then-right
//! concatenation the builder used.

use crate::core::{Digest, MerkleError, NodeId, Result};
use crate::proofs::merkle::MerkleTree;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Slot a sibling occupies in the pairing being reconstructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProofPosition {
    Left,
    Right,
}

impl ProofPosition {
    pub fn flipped(self) -> Self {
        match self {
            ProofPosition::Left => ProofPosition::Right,
            ProofPosition::Right => ProofPosition::Left,
        }
    }
}

/// A single element in a proof path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Whether the sibling is on the left or right
    pub position: ProofPosition,
    /// Digest of the sibling node
    pub digest: Digest,
}

/// Inclusion proof for one leaf
///
/// The JSON form is the stable wire contract:
/// `{"steps":[{"position":"LEFT","digest":"…"}],"expectedRoot":"…"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    /// Sibling steps, from the leaf's sibling upwards
    pub steps: Vec<ProofStep>,
    /// Root digest the replay must arrive at
    pub expected_root: Digest,
}

impl Proof {
    pub fn new(steps: Vec<ProofStep>, expected_root: Digest) -> Self {
        Self {
            steps,
            expected_root,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Serialize proof to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(MerkleError::JsonSerialization)
    }

    /// Deserialize proof from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(MerkleError::JsonSerialization)
    }

    /// Compact binary encoding
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(MerkleError::Serialization)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(MerkleError::Serialization)
    }

    /// Sibling positions a proof for `leaf_index` must carry in a tree of
    /// `leaf_count` leaves. A node that is last in an odd layer is carried up
    /// and contributes no step at that height.
    pub fn path_positions(leaf_index: usize, leaf_count: usize) -> Vec<ProofPosition> {
        let mut positions = Vec::new();
        let (mut index, mut count) = (leaf_index, leaf_count);

        while count > 1 {
            let carried = count % 2 == 1 && index == count - 1;
            if !carried {
                positions.push(if index % 2 == 0 {
                    ProofPosition::Right
                } else {
                    ProofPosition::Left
                });
            }
            index /= 2;
            count = (count + 1) / 2;
        }
        positions
    }

    /// Whether the step positions place the leaf at `leaf_index`
    pub fn fits_index(&self, leaf_index: usize, leaf_count: usize) -> bool {
        leaf_index < leaf_count
            && self
                .steps
                .iter()
                .map(|step| step.position)
                .eq(Self::path_positions(leaf_index, leaf_count))
    }
}

/// Stateless proof generator
pub struct ProofGenerator;

impl ProofGenerator {
    /// Walk from the leaf at `leaf_index` to the root, recording each sibling.
    ///
    /// Carried-forward nodes have no sibling at the heights they skip; the
    /// parent link jumps straight to the height where they were paired, so
    /// no step is emitted for those heights.
    pub fn prove(tree: &MerkleTree, leaf_index: usize) -> Result<Proof> {
        let mut current = tree.leaf_id(leaf_index)?;
        let mut steps = Vec::with_capacity(tree.height());

        while current != tree.root() {
            if steps.len() >= tree.height() {
                return Err(malformed(format!(
                    "walk from leaf {} exceeded tree height {}",
                    leaf_index,
                    tree.height()
                )));
            }

            let node = lookup(tree, current)?;
            let parent_id = node.parent.ok_or_else(|| {
                malformed(format!(
                    "node {} has no parent before reaching the root",
                    current
                ))
            })?;
            let parent = lookup(tree, parent_id)?;

            let (sibling, position) = match (parent.left, parent.right) {
                (Some(left), Some(right)) if left == current => (right, ProofPosition::Right),
                (Some(left), Some(right)) if right == current => (left, ProofPosition::Left),
                _ => {
                    return Err(malformed(format!(
                        "node {} is not a child of its parent {}",
                        current, parent_id
                    )))
                },
            };

            steps.push(ProofStep {
                position,
                digest: lookup(tree, sibling)?.digest.clone(),
            });
            current = parent_id;
        }

        debug!(leaf_index, steps = steps.len(), "Generated inclusion proof");
        Ok(Proof::new(steps, tree.root_digest().clone()))
    }
}

fn lookup(tree: &MerkleTree, id: NodeId) -> Result<&crate::proofs::merkle::Node> {
    tree.node(id)
        .ok_or_else(|| malformed(format!("node {} is outside the arena", id)))
}

fn malformed(reason: String) -> MerkleError {
    error!(%reason, "Merkle tree invariant violated");
    MerkleError::malformed_tree(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sha256;

    fn tree_of(items: &[&str]) -> MerkleTree {
        let chunks: Vec<&[u8]> = items.iter().map(|s| s.as_bytes()).collect();
        MerkleTree::from_chunks(&chunks).unwrap()
    }

    #[test]
    fn test_singleton_proof_is_empty() {
        let tree = tree_of(&["solo"]);
        let proof = ProofGenerator::prove(&tree, 0).unwrap();
        assert!(proof.is_empty());
        assert_eq!(proof.expected_root, sha256(b"solo"));
    }

    #[test]
    fn test_sibling_positions_for_pair() {
        let tree = tree_of(&["a", "b"]);

        let left_proof = tree.prove(0).unwrap();
        assert_eq!(
            left_proof.steps,
            vec![ProofStep {
                position: ProofPosition::Right,
                digest: sha256(b"b"),
            }]
        );

        let right_proof = tree.prove(1).unwrap();
        assert_eq!(
            right_proof.steps,
            vec![ProofStep {
                position: ProofPosition::Left,
                digest: sha256(b"a"),
            }]
        );
    }

    #[test]
    fn test_carried_leaf_skips_height() {
        // c is carried from height 0 to height 1 and only paired at height 2
        let tree = tree_of(&["a", "b", "c"]);
        let proof = tree.prove(2).unwrap();

        assert_eq!(proof.len(), 1);
        assert_eq!(proof.steps[0].position, ProofPosition::Left);
        assert_eq!(
            proof.steps[0].digest,
            tree.layer_digests(1).unwrap()[0].clone()
        );
    }

    #[test]
    fn test_out_of_range() {
        let tree = tree_of(&["a", "b", "c"]);
        let err = tree.prove(3).unwrap_err();
        assert!(matches!(
            err,
            MerkleError::IndexOutOfRange {
                index: 3,
                leaf_count: 3
            }
        ));
    }

    #[test]
    fn test_wire_format() {
        let proof = Proof::new(
            vec![ProofStep {
                position: ProofPosition::Left,
                digest: Digest::new("ab"),
            }],
            Digest::new("cd"),
        );
        let value: serde_json::Value = serde_json::from_str(&proof.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "steps": [{"position": "LEFT", "digest": "ab"}],
                "expectedRoot": "cd"
            })
        );
    }

    #[test]
    fn test_binary_encoding() {
        let tree = tree_of(&["a", "b", "c", "d", "e"]);
        let proof = tree.prove(4).unwrap();
        let decoded = Proof::from_bytes(&proof.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, proof);
    }

    #[test]
    fn test_path_positions_match_generated_proofs() {
        for count in 1..=40 {
            let items: Vec<String> = (0..count).map(|i| format!("leaf {}", i)).collect();
            let chunks: Vec<&[u8]> = items.iter().map(|s| s.as_bytes()).collect();
            let tree = MerkleTree::from_chunks(&chunks).unwrap();

            for index in 0..count {
                let proof = tree.prove(index).unwrap();
                let positions: Vec<ProofPosition> =
                    proof.steps.iter().map(|s| s.position).collect();
                assert_eq!(positions, Proof::path_positions(index, count));
                assert!(proof.fits_index(index, count));
            }
        }
    }

    #[test]
    fn test_fits_index_rejects_other_slots() {
        let tree = tree_of(&["a", "b", "c", "d", "e"]);
        let proof = tree.prove(1).unwrap();
        assert!(proof.fits_index(1, 5));
        for other in [0, 2, 3, 4, 5] {
            assert!(!proof.fits_index(other, 5), "slot {}", other);
        }
    }

    #[test]
    fn test_position_flip() {
        assert_eq!(ProofPosition::Left.flipped(), ProofPosition::Right);
        assert_eq!(ProofPosition::Right.flipped(), ProofPosition::Left);
    }
}
