//! Core data types for merkle_parts

use crate::core::error::{MerkleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hex-encoded digest text produced by a [`HashFunction`](crate::core::hash::HashFunction)
///
/// Digests are compared as text. The combination rule concatenates the text
/// form of two digests, so the exact characters (including case) matter.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Wrap already-encoded digest text without validation
    pub fn new(text: impl Into<String>) -> Self {
        Digest(text.into())
    }

    /// Parse user-supplied hex text, rejecting anything that is not valid hex
    pub fn from_hex(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || hex::decode(trimmed).is_err() {
            return Err(MerkleError::invalid_digest(text));
        }
        Ok(Digest(trimmed.to_ascii_lowercase()))
    }

    /// Encode raw digest bytes as lowercase hex
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Digest(hex::encode(bytes))
    }

    /// Borrow the digest text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix used in log output
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(12)
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short())
    }
}

impl From<String> for Digest {
    fn from(text: String) -> Self {
        Digest(text)
    }
}

impl From<&str> for Digest {
    fn from(text: &str) -> Self {
        Digest(text.to_string())
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A fixed-size slice of the source data, the unit the tree commits to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of the chunk in the source sequence
    pub index: usize,
    /// Byte offset within the source
    pub offset: u64,
    /// The chunk bytes
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(index: usize, offset: u64, data: Vec<u8>) -> Self {
        Self {
            index,
            offset,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Index of a node inside the tree's node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_from_hex_normalizes_case() {
        let digest = Digest::from_hex("ABcd01").unwrap();
        assert_eq!(digest.as_str(), "abcd01");
    }

    #[test]
    fn test_digest_from_hex_rejects_garbage() {
        assert!(Digest::from_hex("not-hex").is_err());
        assert!(Digest::from_hex("abc").is_err());
        assert!(matches!(
            Digest::from_hex(""),
            Err(MerkleError::InvalidDigest { .. })
        ));
    }

    #[test]
    fn test_digest_serializes_as_plain_text() {
        let digest = Digest::new("deadbeef");
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, "\"deadbeef\"");

        let parsed: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, digest);
    }

    #[test]
    fn test_digest_debug_is_shortened() {
        let digest = Digest::new("0123456789abcdef0123");
        assert_eq!(format!("{:?}", digest), "Digest(0123456789ab)");
        assert_eq!(digest.to_string(), "0123456789abcdef0123");
    }

    #[test]
    fn test_chunk_accessors() {
        let chunk = Chunk::new(3, 96, vec![1, 2, 3]);
        assert_eq!(chunk.len(), 3);
        assert!(!chunk.is_empty());
        assert_eq!(chunk.as_ref(), &[1, 2, 3]);
    }
}
