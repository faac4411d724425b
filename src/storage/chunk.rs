//! Fixed-size chunking

use crate::core::{error::*, types::*};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use tracing::debug;

/// Default chunk size in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 32;

/// Chunking configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Size of every chunk except possibly the last
    pub chunk_size: usize,
}

impl ChunkConfig {
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(MerkleError::InvalidChunkSize { size: chunk_size });
        }
        Ok(Self { chunk_size })
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Splits a byte source into fixed-size chunks
pub struct ChunkingEngine {
    config: ChunkConfig,
}

impl ChunkingEngine {
    /// Create a new chunking engine with default configuration
    pub fn new() -> Self {
        Self {
            config: ChunkConfig::default(),
        }
    }

    /// Create a new chunking engine with custom configuration
    pub fn with_config(config: ChunkConfig) -> Self {
        Self { config }
    }

    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size
    }

    /// Chunk an in-memory buffer
    pub fn chunk_data(&self, data: &[u8]) -> Result<Vec<Chunk>> {
        self.validate()?;
        Ok(data
            .chunks(self.config.chunk_size)
            .enumerate()
            .map(|(index, slice)| {
                Chunk::new(
                    index,
                    (index * self.config.chunk_size) as u64,
                    slice.to_vec(),
                )
            })
            .collect())
    }

    /// Chunk everything a reader produces. Short reads are topped up so every
    /// chunk but the last is exactly `chunk_size` bytes.
    pub fn chunk_reader<R: Read>(&self, mut reader: R) -> Result<Vec<Chunk>> {
        self.validate()?;
        let size = self.config.chunk_size;
        let mut chunks = Vec::new();
        let mut offset = 0u64;

        loop {
            let mut buffer = vec![0u8; size];
            let filled = fill_buffer(&mut reader, &mut buffer)?;
            if filled == 0 {
                break;
            }
            buffer.truncate(filled);
            chunks.push(Chunk::new(chunks.len(), offset, buffer));
            offset += filled as u64;
            if filled < size {
                break;
            }
        }

        debug!(chunks = chunks.len(), bytes = offset, "Chunked input");
        Ok(chunks)
    }

    /// Chunk a file on disk
    pub fn chunk_file(&self, path: &Path) -> Result<Vec<Chunk>> {
        let file = File::open(path)?;
        self.chunk_reader(BufReader::new(file))
    }

    fn validate(&self) -> Result<()> {
        if self.config.chunk_size == 0 {
            return Err(MerkleError::InvalidChunkSize { size: 0 });
        }
        Ok(())
    }
}

impl Default for ChunkingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Read until the buffer is full or the reader is exhausted
fn fill_buffer<R: Read>(reader: &mut R, buffer: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
