//! Error types for merkle_parts

use thiserror::Error;

/// Main error type for tree, proof and part-store operations
#[derive(Error, Debug)]
pub enum MerkleError {
    /// No chunks were supplied to the tree builder
    #[error("Cannot build a merkle tree from an empty chunk sequence")]
    EmptyInput,

    #[error("Leaf index {index} out of range (tree has {leaf_count} leaves)")]
    IndexOutOfRange { index: usize, leaf_count: usize },

    /// Internal invariant violated during a tree walk
    #[error("Malformed merkle tree: {reason}")]
    MalformedTree { reason: String },

    #[error("Chunk {index} is unavailable")]
    ChunkUnavailable { index: usize },

    #[error("Invalid chunk size: {size}")]
    InvalidChunkSize { size: usize },

    #[error("Proof verification failed for part {index}")]
    ProofVerificationFailed { index: usize },

    #[error("Part {index} was received more than once")]
    DuplicatePart { index: usize },

    #[error("Invalid digest: {value}")]
    InvalidDigest { value: String },

    #[error("Invalid proof format: {reason}")]
    InvalidProofFormat { reason: String },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

impl MerkleError {
    pub fn index_out_of_range(index: usize, leaf_count: usize) -> Self {
        Self::IndexOutOfRange { index, leaf_count }
    }

    pub fn malformed_tree(reason: impl Into<String>) -> Self {
        Self::MalformedTree {
            reason: reason.into(),
        }
    }

    pub fn chunk_unavailable(index: usize) -> Self {
        Self::ChunkUnavailable { index }
    }

    pub fn invalid_digest(value: impl Into<String>) -> Self {
        Self::InvalidDigest {
            value: value.into(),
        }
    }

    pub fn invalid_proof_format(reason: impl Into<String>) -> Self {
        Self::InvalidProofFormat {
            reason: reason.into(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Whether the caller can act on this error (bad request) rather than
    /// it signalling a construction bug
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MalformedTree { .. } | Self::EmptyInput)
    }
}

/// Result type alias for merkle_parts operations
pub type Result<T> = std::result::Result<T, MerkleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MerkleError::index_out_of_range(9, 4);
        assert_eq!(
            err.to_string(),
            "Leaf index 9 out of range (tree has 4 leaves)"
        );

        let err = MerkleError::chunk_unavailable(2);
        assert_eq!(err.to_string(), "Chunk 2 is unavailable");

        let err = MerkleError::DuplicatePart { index: 5 };
        assert_eq!(err.to_string(), "Part 5 was received more than once");
    }

    #[test]
    fn test_recoverability() {
        assert!(MerkleError::index_out_of_range(1, 1).is_recoverable());
        assert!(MerkleError::chunk_unavailable(0).is_recoverable());
        assert!(!MerkleError::EmptyInput.is_recoverable());
        assert!(!MerkleError::malformed_tree("dangling node").is_recoverable());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: MerkleError = io.into();
        assert!(matches!(err, MerkleError::Io(_)));
    }
}
