use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::core::BenchgenError;
use crate::keys::Key;

use super::format::{LEN_PREFIX_SIZE, read_u64_le};

/// Decode a serialized artifact of keys of type `K`.
pub fn decode<K: Key>(bytes: &[u8]) -> Result<Vec<K>, BenchgenError> {
    if bytes.len() < LEN_PREFIX_SIZE {
        return Err(BenchgenError::TruncatedInput {
            expected: LEN_PREFIX_SIZE as u64,
            actual: bytes.len() as u64,
        });
    }
    let count = read_u64_le(bytes, 0);
    let width = K::WIDTH.byte_size() as u64;
    let expected = count
        .checked_mul(width)
        .and_then(|n| n.checked_add(LEN_PREFIX_SIZE as u64))
        .ok_or_else(|| {
            BenchgenError::MalformedArtifact(format!("declared count {count} overflows"))
        })?;
    let actual = bytes.len() as u64;
    if actual < expected {
        return Err(BenchgenError::TruncatedInput { expected, actual });
    }
    if actual > expected {
        return Err(BenchgenError::MalformedArtifact(format!(
            "{} trailing bytes after {count} {} values",
            actual - expected,
            K::WIDTH
        )));
    }
    Ok(bytes[LEN_PREFIX_SIZE..]
        .chunks_exact(K::WIDTH.byte_size())
        .map(|chunk| bytemuck::pod_read_unaligned::<K>(chunk).from_le())
        .collect())
}

/// Memory-mapped read handle for an artifact file.
#[derive(Debug)]
pub struct ArtifactFile {
    path: PathBuf,
    mmap: Mmap,
}

impl ArtifactFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BenchgenError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| BenchgenError::IoError(format!("opening {}: {}", path.display(), e)))?;
        let len = file.metadata()?.len();
        if len < LEN_PREFIX_SIZE as u64 {
            return Err(BenchgenError::TruncatedInput {
                expected: LEN_PREFIX_SIZE as u64,
                actual: len,
            });
        }
        // SAFETY: the file is opened read-only and we treat the mapping as immutable.
        let mmap = unsafe { Mmap::map(&file) }?;
        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    /// Element count declared in the length prefix.
    pub fn declared_len(&self) -> u64 {
        read_u64_le(&self.mmap, 0)
    }

    pub fn byte_len(&self) -> usize {
        self.mmap.len()
    }

    /// Decode the payload; errors carry the file path.
    pub fn values<K: Key>(&self) -> Result<Vec<K>, BenchgenError> {
        decode(&self.mmap).map_err(|e| e.for_artifact(self.path.display().to_string()))
    }
}
