//! Buffer region resolution and structural validation.
//!
//! The fallback buffer has no header: an index region (one chunk per frame)
//! is followed directly by the packed position table and then the packed
//! rotation table. The only available validation is that the sizes computed
//! from the external metadata tile the buffer exactly.

use crate::error::Error;
use crate::model::FrameDesc;
use crate::scheme::QuantScheme;

/// Resolved byte offsets of the three buffer regions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BufferLayout {
    /// Total size of the per-frame index chunks; the index region spans
    /// `0..index_region_size`.
    pub index_region_size: usize,
    /// Start of the packed position table. Equals `index_region_size`.
    pub positions_offset: usize,
    /// Start of the packed rotation table, immediately after the positions.
    pub rotations_offset: usize,
}

impl BufferLayout {
    pub fn resolve(
        buffer_len: usize,
        frames: &[FrameDesc],
        scheme: QuantScheme,
        total_positions: usize,
        total_rotations: usize,
    ) -> Result<Self, Error> {
        let index_region_size: usize = frames
            .iter()
            .map(|frame| frame.index_chunk_size as usize)
            .sum();

        let position_bytes = scheme.position.bits() as usize * total_positions / 8;
        let rotation_bytes = scheme.rotation.bits() as usize * total_rotations / 8;
        let transform_region_size = position_bytes + rotation_bytes;

        if index_region_size + transform_region_size != buffer_len {
            return Err(Error::SizeMismatch {
                index_region_size,
                transform_region_size,
                buffer_len,
            });
        }

        Ok(Self {
            index_region_size,
            positions_offset: index_region_size,
            rotations_offset: index_region_size + position_bytes,
        })
    }
}
