//! Merkle proof system for merkle_parts
//!
//! This module builds merkle trees over ordered chunks, generates inclusion
//! proofs for single leaves and verifies them against a root digest.

pub mod merkle;
pub mod proof;
pub mod verify;

// Re-export commonly used items
pub use merkle::{Layer, LeafLayer, MerkleTree, Node, TreeBuilder, DEFAULT_PARALLEL_THRESHOLD};
pub use proof::{Proof, ProofGenerator, ProofPosition, ProofStep};
pub use verify::{replay, verify_proof, ProofVerifier};
