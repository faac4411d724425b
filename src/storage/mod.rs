//! Storage layer for merkle_parts
//!
//! This module turns a byte source into fixed-size chunks and serves
//! individual parts with their inclusion proofs.

pub mod chunk;
pub mod store;

// Re-export commonly used items
pub use chunk::{ChunkConfig, ChunkingEngine, DEFAULT_CHUNK_SIZE};
pub use store::{reassemble, Metadata, Part, PartStore};
