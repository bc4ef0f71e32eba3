/// Leading element count, u64 LE.
pub(crate) const LEN_PREFIX_SIZE: usize = 8;

/// Read a little-endian u64 from `data` at `offset`.
/// Caller must ensure `offset + 8 <= data.len()`.
pub(crate) fn read_u64_le(data: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; LEN_PREFIX_SIZE];
    buf.copy_from_slice(&data[offset..offset + LEN_PREFIX_SIZE]);
    u64::from_le_bytes(buf)
}
