use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "buffer size mismatch: {index_region_size} B of indices + {transform_region_size} B of transforms != {buffer_len} B buffer"
    )]
    SizeMismatch {
        index_region_size: usize,
        transform_region_size: usize,
        buffer_len: usize,
    },

    #[error("cursor at {actual} after reading {region}, expected region boundary {expected}")]
    OffsetMismatch {
        region: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported quantization scheme: {pos_bits}-bit positions, {rot_bits}-bit rotations")]
    UnsupportedScheme { pos_bits: u32, rot_bits: u32 },

    #[error("read of {wanted} B at offset {offset} exceeds buffer length {len}")]
    TruncatedBuffer {
        offset: usize,
        wanted: usize,
        len: usize,
    },

    #[error("frame {frame} {kind} index {index} out of range for value table of {len} entries")]
    ValueIndexOutOfRange {
        kind: &'static str,
        frame: u16,
        index: u16,
        len: usize,
    },
}
