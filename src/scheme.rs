//! Skeleton-variant classification and quantization scheme selection.

use crate::error::Error;

/// Substring markers that flag a rig identifier as player-specific.
const EXTENDED_RIG_MARKERS: [&str; 4] = ["player", "pma", "pwa", "tpp"];

/// Which bone set and bit-packing scheme a fallback buffer targets.
///
/// Player rigs carry LOD 0, 2 and 3 bones and use the tighter packing;
/// everything else carries LOD 0 bones only and stores raw floats.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SkeletonVariant {
    /// Player-class skeleton: 32-bit packed positions, 4x16-bit rotations.
    Extended,
    /// Everything else: raw float positions, w-stripped 3x16-bit rotations.
    Base,
}

impl SkeletonVariant {
    /// Classifies a rig identifier (depot path or arbitrary label).
    ///
    /// Best-effort substring heuristic; there is no authoritative format
    /// tag. A misclassification routes the decode to the wrong but still
    /// internally consistent bit-width table, surfacing downstream as a
    /// size mismatch rather than a crash.
    pub fn classify(rig_identifier: &str) -> Self {
        let lower = rig_identifier.to_lowercase();
        if EXTENDED_RIG_MARKERS.iter().any(|m| lower.contains(m)) {
            Self::Extended
        } else {
            Self::Base
        }
    }

    /// Bits per stored value for this variant, as `(position, rotation)`.
    pub fn bit_widths(self) -> (u32, u32) {
        match self {
            Self::Extended => (32, 64),
            Self::Base => (96, 48),
        }
    }
}

/// How positions are stored in the transform region.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PositionEncoding {
    /// Three raw little-endian `f32`s.
    RawFloat96,
    /// One 32-bit word, 10:10:12 packed.
    Packed10_10_12,
}

impl PositionEncoding {
    pub fn bits(self) -> u32 {
        match self {
            Self::RawFloat96 => 96,
            Self::Packed10_10_12 => 32,
        }
    }
}

/// How rotations are stored in the transform region.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RotationEncoding {
    /// Three signed-normalized 16-bit components, w reconstructed.
    WStripped16x3,
    /// Four signed-normalized 16-bit components.
    Full16x4,
}

impl RotationEncoding {
    pub fn bits(self) -> u32 {
        match self {
            Self::WStripped16x3 => 48,
            Self::Full16x4 => 64,
        }
    }
}

/// The position/rotation codec pair in effect for one decode call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct QuantScheme {
    pub position: PositionEncoding,
    pub rotation: RotationEncoding,
}

impl QuantScheme {
    /// Maps claimed bit widths to codecs.
    ///
    /// The variant table only ever produces the two known pairs, but the
    /// widths travel as plain integers, so an out-of-table combination is
    /// rejected here instead of being misread downstream.
    pub fn for_bit_widths(pos_bits: u32, rot_bits: u32) -> Result<Self, Error> {
        let position = match pos_bits {
            32 => PositionEncoding::Packed10_10_12,
            96 => PositionEncoding::RawFloat96,
            _ => return Err(Error::UnsupportedScheme { pos_bits, rot_bits }),
        };
        let rotation = match rot_bits {
            48 => RotationEncoding::WStripped16x3,
            64 => RotationEncoding::Full16x4,
            _ => return Err(Error::UnsupportedScheme { pos_bits, rot_bits }),
        };
        Ok(Self { position, rotation })
    }
}
