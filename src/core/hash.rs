//! Hash utilities for merkle_parts

use crate::core::types::Digest;
use sha2::{Digest as _, Sha256};

/// A one-way function from bytes to hex digest text
///
/// Tree building and verification are generic over this trait so the digest
/// algorithm can be swapped without touching tree logic. Any
/// `Fn(&[u8]) -> Digest` closure also implements it.
pub trait HashFunction: Send + Sync {
    fn hash(&self, data: &[u8]) -> Digest;
}

impl<F> HashFunction for F
where
    F: Fn(&[u8]) -> Digest + Send + Sync,
{
    fn hash(&self, data: &[u8]) -> Digest {
        self(data)
    }
}

/// SHA-256 with lowercase hex output
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl HashFunction for Sha256Hasher {
    fn hash(&self, data: &[u8]) -> Digest {
        sha256(data)
    }
}

/// Compute the SHA-256 digest of data
pub fn sha256(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    Digest::from_bytes(&hasher.finalize())
}

/// Combine two child digests into their parent's digest.
///
/// The parent is the hash of the left digest's text followed by the right
/// digest's text. Raw digest bytes are never concatenated.
pub fn combine<H: HashFunction + ?Sized>(hasher: &H, left: &Digest, right: &Digest) -> Digest {
    let mut text = String::with_capacity(left.as_str().len() + right.as_str().len());
    text.push_str(left.as_str());
    text.push_str(right.as_str());
    hasher.hash(text.as_bytes())
}
