use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::BenchgenError;
use crate::keys::Key;

use super::format::LEN_PREFIX_SIZE;

/// Serialize `values` to any `Write` destination.
///
/// Format: `[count u64 LE][value LE; count]`, values 4 or 8 bytes wide.
pub fn write_artifact<K: Key>(w: &mut impl Write, values: &[K]) -> Result<(), BenchgenError> {
    w.write_all(&(values.len() as u64).to_le_bytes())?;
    if cfg!(target_endian = "little") {
        w.write_all(bytemuck::cast_slice(values))?;
    } else {
        for &v in values {
            w.write_all(bytemuck::bytes_of(&v.to_le()))?;
        }
    }
    Ok(())
}

pub fn encode<K: Key>(values: &[K]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(LEN_PREFIX_SIZE + std::mem::size_of_val(values));
    // Writing into a Vec cannot fail.
    let _ = write_artifact(&mut buf, values);
    buf
}

/// Create (or truncate) `path` and write `values` to it.
pub fn write_artifact_file<K: Key>(path: &Path, values: &[K]) -> Result<(), BenchgenError> {
    let file = File::create(path).map_err(|e| {
        BenchgenError::IoError(format!("creating {}: {}", path.display(), e))
    })?;
    let mut w = BufWriter::new(file);
    write_artifact(&mut w, values)?;
    w.flush()
        .map_err(|e| BenchgenError::IoError(format!("writing {}: {}", path.display(), e)))?;
    Ok(())
}
