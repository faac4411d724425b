//! Core types and utilities for merkle_parts
//!
//! This module contains the fundamental data types, error handling,
//! and the hash function abstraction used throughout the system.

pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use error::{MerkleError, Result};
pub use hash::{combine, sha256, HashFunction, Sha256Hasher};
pub use types::{Chunk, Digest, NodeId};
