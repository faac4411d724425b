//! Part store: the metadata and part-retrieval interface over one chunked source
//!
//! The store owns the chunks and their tree. It answers the two requests a
//! serving layer needs (metadata, and a single part with its inclusion proof)
//! and provides the client-side checks for parts received from elsewhere.

use crate::core::{error::*, types::*, HashFunction, Sha256Hasher};
use crate::proofs::{replay, MerkleTree, Proof, TreeBuilder};
use crate::storage::chunk::{ChunkConfig, ChunkingEngine};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Summary of a chunked source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub filename: String,
    pub parts: usize,
    pub chunk_size: usize,
    pub root: Digest,
}

/// One chunk together with the proof that it belongs to the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub index: usize,
    #[serde(with = "base64_data")]
    pub data: Vec<u8>,
    pub proof: Proof,
}

impl Part {
    /// Accept the part only if its proof links the data to `trusted_root`.
    ///
    /// The proof's own expected root is not trusted on its own; it must also
    /// match the root the caller obtained out of band.
    pub fn verify<H: HashFunction + ?Sized>(&self, hasher: &H, trusted_root: &Digest) -> bool {
        if &self.proof.expected_root != trusted_root {
            return false;
        }
        let leaf = hasher.hash(&self.data);
        replay(hasher, &leaf, &self.proof) == self.proof.expected_root
    }

    /// [`verify`](Self::verify), and additionally require the proof's path to
    /// lead to slot `self.index` of a source with `parts` parts. Without this a
    /// relabeled part still proves membership, just at another position.
    pub fn verify_at<H: HashFunction + ?Sized>(
        &self,
        hasher: &H,
        trusted_root: &Digest,
        parts: usize,
    ) -> bool {
        self.proof.fits_index(self.index, parts) && self.verify(hasher, trusted_root)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(MerkleError::JsonSerialization)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(MerkleError::JsonSerialization)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(MerkleError::Serialization)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(MerkleError::Serialization)
    }
}

/// Chunks of one source plus the tree committing to them
#[derive(Debug, Clone)]
pub struct PartStore {
    name: String,
    chunk_size: usize,
    chunks: Vec<Chunk>,
    tree: MerkleTree,
}

impl PartStore {
    /// Build a store from raw chunk payloads using the given tree builder
    pub fn from_chunks<H: HashFunction>(
        name: impl Into<String>,
        chunk_size: usize,
        payloads: Vec<Vec<u8>>,
        builder: &TreeBuilder<H>,
    ) -> Result<Self> {
        let mut offset = 0u64;
        let chunks: Vec<Chunk> = payloads
            .into_iter()
            .enumerate()
            .map(|(index, data)| {
                let chunk = Chunk::new(index, offset, data);
                offset += chunk.len() as u64;
                chunk
            })
            .collect();
        Self::from_chunk_list(name.into(), chunk_size, chunks, builder)
    }

    /// Chunk everything a reader produces and build a SHA-256 tree over it
    pub fn from_reader<R: Read>(
        name: impl Into<String>,
        reader: R,
        config: ChunkConfig,
    ) -> Result<Self> {
        Self::from_reader_with(name, reader, config, &TreeBuilder::new(Sha256Hasher))
    }

    pub fn from_reader_with<R: Read, H: HashFunction>(
        name: impl Into<String>,
        reader: R,
        config: ChunkConfig,
        builder: &TreeBuilder<H>,
    ) -> Result<Self> {
        let chunks = ChunkingEngine::with_config(config).chunk_reader(reader)?;
        Self::from_chunk_list(name.into(), config.chunk_size, chunks, builder)
    }

    /// Open a file from disk
    pub fn open(path: &Path, config: ChunkConfig) -> Result<Self> {
        Self::open_with(path, config, &TreeBuilder::new(Sha256Hasher))
    }

    pub fn open_with<H: HashFunction>(
        path: &Path,
        config: ChunkConfig,
        builder: &TreeBuilder<H>,
    ) -> Result<Self> {
        let chunks = ChunkingEngine::with_config(config).chunk_file(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_chunk_list(name, config.chunk_size, chunks, builder)
    }

    fn from_chunk_list<H: HashFunction>(
        name: String,
        chunk_size: usize,
        chunks: Vec<Chunk>,
        builder: &TreeBuilder<H>,
    ) -> Result<Self> {
        if chunk_size == 0 {
            return Err(MerkleError::InvalidChunkSize { size: chunk_size });
        }
        let tree = builder.build(&chunks)?;
        info!(
            name = %name,
            parts = chunks.len(),
            chunk_size,
            root = %tree.root_digest(),
            "Opened part store"
        );
        Ok(Self {
            name,
            chunk_size,
            chunks,
            tree,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn parts(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    pub fn root(&self) -> &Digest {
        self.tree.root_digest()
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            filename: self.name.clone(),
            parts: self.parts(),
            chunk_size: self.chunk_size,
            root: self.root().clone(),
        }
    }

    /// Retrieve one chunk with its inclusion proof
    pub fn get_part(&self, index: usize) -> Result<Part> {
        let chunk = self
            .chunks
            .get(index)
            .ok_or_else(|| MerkleError::index_out_of_range(index, self.parts()))?;
        if chunk.is_empty() {
            warn!(index, "Requested part has no data");
            return Err(MerkleError::chunk_unavailable(index));
        }

        let proof = self.tree.prove(index)?;
        debug!(index, bytes = chunk.len(), steps = proof.len(), "Serving part");
        Ok(Part {
            index,
            data: chunk.data.clone(),
            proof,
        })
    }
}

/// Rebuild the source from received parts, verifying each against
/// `metadata.root`. Parts may arrive in any order.
pub fn reassemble<H: HashFunction + ?Sized>(
    metadata: &Metadata,
    mut parts: Vec<Part>,
    hasher: &H,
) -> Result<Vec<u8>> {
    parts.sort_by_key(|part| part.index);
    let mut output = Vec::with_capacity(metadata.parts.saturating_mul(metadata.chunk_size));

    for expected in 0..metadata.parts {
        let part = match parts.get(expected) {
            Some(part) if part.index == expected => part,
            Some(part) if part.index < expected => {
                return Err(MerkleError::DuplicatePart { index: part.index });
            },
            _ => return Err(MerkleError::chunk_unavailable(expected)),
        };
        if part.data.is_empty() {
            return Err(MerkleError::chunk_unavailable(expected));
        }
        if !part.verify_at(hasher, &metadata.root, metadata.parts) {
            warn!(index = expected, "Rejected part with invalid proof");
            return Err(MerkleError::ProofVerificationFailed { index: expected });
        }
        output.extend_from_slice(&part.data);
    }

    if let Some(extra) = parts.get(metadata.parts) {
        return Err(MerkleError::index_out_of_range(extra.index, metadata.parts));
    }

    Ok(output)
}

mod base64_data {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text).map_err(serde::de::Error::custom)
    }
}
