//! Dequantization codecs for packed fallback transform values.
//!
//! Pure functions from packed integers to floating-point vectors and
//! quaternions. Which codec applies to a given buffer is decided by the
//! scheme selector, not here.

use glam::{Quat, Vec3};

/// Shared dequantization constant for the 10:10:12 position packing:
/// `(1 << 10) - 1`. The 12-bit field is normalized against the 10-bit
/// maximum as well, matching the encoder.
const POSITION_DEQUANT: f32 = 1023.0;

const SNORM16_MAX: f32 = 32767.0;

/// Field order of the 10:10:12 packed position word, least-significant
/// field first.
///
/// The encoder's order is undocumented; [`PACKED_POSITION_FIELD_ORDER`] is
/// the single place to flip if a ground-truth sample disagrees.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PackedFieldOrder {
    /// z in the low 12 bits, then y and x in 10 bits each.
    Zyx,
    /// x in the low 12 bits, then y and z in 10 bits each.
    Xyz,
}

/// Shipped field order for [`decode_position_10_10_12`]. `Zyx` is how the
/// known buffers read; unverified against the encoder itself.
pub const PACKED_POSITION_FIELD_ORDER: PackedFieldOrder = PackedFieldOrder::Zyx;

/// Unpacks a 10:10:12 packed position word into a vector in `[-1, 1]³`.
///
/// Each field is divided by the shared 10-bit maximum and remapped from
/// `[0, 1]` to `[-1, 1]`.
pub fn decode_position_10_10_12(word: u32) -> Vec3 {
    let low = (word & 0xfff) as f32;
    let mid = ((word >> 12) & 0x3ff) as f32;
    let high = ((word >> 22) & 0x3ff) as f32;

    let (x, y, z) = match PACKED_POSITION_FIELD_ORDER {
        PackedFieldOrder::Zyx => (high, mid, low),
        PackedFieldOrder::Xyz => (low, mid, high),
    };

    Vec3::new(dequant_unorm(x), dequant_unorm(y), dequant_unorm(z))
}

/// Reconstructs a unit quaternion from its signed-normalized 16-bit x, y, z
/// components, with `w = sqrt(max(0, 1 - x² - y² - z²))`.
///
/// The stripped component is assumed to have been stored in the positive-w
/// hemisphere, so the result always has `w >= 0`.
pub fn decode_quat_w_stripped(x: i16, y: i16, z: i16) -> Quat {
    let x = dequant_snorm16(x);
    let y = dequant_snorm16(y);
    let z = dequant_snorm16(z);
    let w = (1.0 - x * x - y * y - z * z).max(0.0).sqrt();
    Quat::from_xyzw(x, y, z, w)
}

/// Dequantizes a full signed-normalized 16-bit x, y, z, w quaternion.
///
/// The result is not unit length by construction and is re-normalized here.
/// An all-zero word decodes to the identity rotation.
pub fn decode_quat_16x4(x: i16, y: i16, z: i16, w: i16) -> Quat {
    let q = Quat::from_xyzw(
        dequant_snorm16(x),
        dequant_snorm16(y),
        dequant_snorm16(z),
        dequant_snorm16(w),
    );
    let length = q.length();
    if length > f32::EPSILON {
        q / length
    } else {
        Quat::IDENTITY
    }
}

fn dequant_unorm(quantized: f32) -> f32 {
    (quantized / POSITION_DEQUANT) * 2.0 - 1.0
}

fn dequant_snorm16(raw: i16) -> f32 {
    (f32::from(raw) / SNORM16_MAX).clamp(-1.0, 1.0)
}
