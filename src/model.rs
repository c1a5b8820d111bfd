//! Caller-supplied per-frame metadata and the decoded output tables.

use std::collections::HashMap;

use glam::{Quat, Vec3};

/// Per-frame descriptor, supplied by the containing animation set rather
/// than the fallback buffer itself.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct FrameDesc {
    /// Byte size of this frame's chunk in the index region.
    pub index_chunk_size: u32,
    /// Number of (value index, bone id) position pairs in the chunk.
    pub position_count: u16,
    /// Number of (value index, bone id) rotation pairs in the chunk.
    pub rotation_count: u16,
    /// Float-track keys for this frame. Carried for diagnostics only; the
    /// track payload format is unknown and not decoded.
    pub float_track_count: u16,
}

/// Decoded fallback animation: frame index to bone id to transform
/// component, translations and rotations kept independent.
///
/// Built once per decode call and read-only afterwards. Every frame named
/// by the metadata gets an entry, possibly empty.
#[derive(Clone, Debug, Default)]
pub struct FallbackAnimation {
    pub translations: HashMap<u16, HashMap<u16, Vec3>>,
    pub rotations: HashMap<u16, HashMap<u16, Quat>>,
}

impl FallbackAnimation {
    pub fn translation(&self, frame: u16, bone: u16) -> Option<Vec3> {
        self.translations.get(&frame)?.get(&bone).copied()
    }

    pub fn rotation(&self, frame: u16, bone: u16) -> Option<Quat> {
        self.rotations.get(&frame)?.get(&bone).copied()
    }
}
