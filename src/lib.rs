//! merkle_parts - fixed-size chunk merkle trees with portable inclusion proofs
//!
//! A source is split into fixed-size chunks and committed to by a merkle
//! tree. Any single chunk can then be shipped with an inclusion proof that a
//! receiver checks against the root digest alone, without the rest of the
//! data or the tree.
//!
//! # Core Features
//!
//! - **Text-concatenation hashing**: a parent digest is the hash of the left
//!   child's hex digest followed by the right child's hex digest
//! - **Carry-forward odd nodes**: an unpaired node moves up a layer unchanged
//!   instead of being duplicated and rehashed
//! - **Sibling-slot proofs**: each proof step records which side its sibling
//!   sits on, with a stable JSON wire format
//! - **Pluggable hashing**: any [`HashFunction`] can replace SHA-256
//!
//! # Example Usage
//!
//! ```rust
//! use merkle_parts::{sha256, verify_proof, MerkleTree};
//!
//! let chunks = vec!["alpha".as_bytes(), "beta".as_bytes(), "gamma".as_bytes()];
//! let tree = MerkleTree::from_chunks(&chunks)?;
//!
//! let proof = tree.prove(2)?;
//! assert!(verify_proof(&sha256(b"gamma"), &proof));
//! assert_eq!(&proof.expected_root, tree.root_digest());
//! # Ok::<(), merkle_parts::MerkleError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod proofs;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    combine,
    error::{MerkleError, Result},
    hash::{sha256, HashFunction, Sha256Hasher},
    types::{Chunk, Digest, NodeId},
};

pub use crate::proofs::{
    verify_proof, Layer, LeafLayer, MerkleTree, Node, Proof, ProofGenerator, ProofPosition,
    ProofStep, ProofVerifier, TreeBuilder,
};

pub use crate::storage::{reassemble, ChunkConfig, ChunkingEngine, Metadata, Part, PartStore};

/// Current version of merkle_parts
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
