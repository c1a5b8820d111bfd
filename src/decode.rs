//! The fallback-buffer decode pipeline.
//!
//! A single linear pass: classify the rig, resolve the buffer layout, read
//! the flat value tables, read the per-frame index tables, join them into
//! per-frame, per-bone maps. Every validation failure aborts the call;
//! there is no partial output.

use byteorder::{ByteOrder, LittleEndian};
use glam::{Quat, Vec3};
use tracing::debug;

use crate::error::Error;
use crate::layout::BufferLayout;
use crate::model::{FallbackAnimation, FrameDesc};
use crate::quant::{decode_position_10_10_12, decode_quat_16x4, decode_quat_w_stripped};
use crate::scheme::{PositionEncoding, QuantScheme, RotationEncoding, SkeletonVariant};

/// Bounds-checked little-endian reader over the fallback buffer.
struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn position(&self) -> usize {
        self.position
    }

    fn seek(&mut self, offset: usize) {
        self.position = offset;
    }

    fn take(&mut self, wanted: usize) -> Result<&'a [u8], Error> {
        let end = self
            .position
            .checked_add(wanted)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(Error::TruncatedBuffer {
                offset: self.position,
                wanted,
                len: self.bytes.len(),
            })?;
        let slice = &self.bytes[self.position..end];
        self.position = end;
        Ok(slice)
    }

    fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    fn read_i16(&mut self) -> Result<i16, Error> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(LittleEndian::read_f32(self.take(4)?))
    }
}

/// One frame's worth of index-region data: value indices and bone ids as
/// the buffer stores them, two contiguous arrays per component.
struct FrameIndices {
    position_values: Vec<u16>,
    position_bones: Vec<u16>,
    rotation_values: Vec<u16>,
    rotation_bones: Vec<u16>,
}

/// Decodes a fallback animation buffer into per-frame, per-bone transform
/// tables.
///
/// `buffer` is the raw fallback data blob; `rig_identifier` is the depot
/// path or label of the rig the animation set targets, used to pick the
/// quantization scheme; `frames` are the per-frame descriptors from the
/// animation set; `total_positions` and `total_rotations` are the flat
/// value-table lengths.
pub fn decode_fallback_animation(
    buffer: &[u8],
    rig_identifier: &str,
    frames: &[FrameDesc],
    total_positions: usize,
    total_rotations: usize,
) -> Result<FallbackAnimation, Error> {
    let variant = SkeletonVariant::classify(rig_identifier);
    let (pos_bits, rot_bits) = variant.bit_widths();
    let scheme = QuantScheme::for_bit_widths(pos_bits, rot_bits)?;

    let float_tracks: usize = frames
        .iter()
        .map(|frame| frame.float_track_count as usize)
        .sum();
    debug!(
        frames = frames.len(),
        transforms = total_positions + total_rotations,
        float_tracks,
        ?variant,
        "decoding fallback animation frames"
    );

    let layout = BufferLayout::resolve(buffer.len(), frames, scheme, total_positions, total_rotations)?;

    let mut cursor = Cursor::new(buffer);
    let (positions, rotations) =
        read_values(&mut cursor, scheme, &layout, total_positions, total_rotations)?;
    let indices = read_indices(&mut cursor, frames, &layout)?;

    assemble(&indices, &positions, &rotations)
}

/// Reads the flat position and rotation value tables, in quantized storage
/// order.
fn read_values(
    cursor: &mut Cursor,
    scheme: QuantScheme,
    layout: &BufferLayout,
    total_positions: usize,
    total_rotations: usize,
) -> Result<(Vec<Vec3>, Vec<Quat>), Error> {
    cursor.seek(layout.positions_offset);

    let mut positions = Vec::with_capacity(total_positions);
    for _ in 0..total_positions {
        let position = match scheme.position {
            PositionEncoding::Packed10_10_12 => decode_position_10_10_12(cursor.read_u32()?),
            PositionEncoding::RawFloat96 => {
                let x = cursor.read_f32()?;
                let y = cursor.read_f32()?;
                let z = cursor.read_f32()?;
                Vec3::new(x, y, z)
            }
        };
        positions.push(position);
    }

    // Redundant with the layout invariant, but catches per-element size bugs.
    if cursor.position() != layout.rotations_offset {
        return Err(Error::OffsetMismatch {
            region: "positions",
            expected: layout.rotations_offset,
            actual: cursor.position(),
        });
    }

    let mut rotations = Vec::with_capacity(total_rotations);
    for _ in 0..total_rotations {
        let rotation = match scheme.rotation {
            RotationEncoding::WStripped16x3 => {
                let x = cursor.read_i16()?;
                let y = cursor.read_i16()?;
                let z = cursor.read_i16()?;
                decode_quat_w_stripped(x, y, z)
            }
            RotationEncoding::Full16x4 => {
                let x = cursor.read_i16()?;
                let y = cursor.read_i16()?;
                let z = cursor.read_i16()?;
                let w = cursor.read_i16()?;
                decode_quat_16x4(x, y, z, w)
            }
        };
        rotations.push(rotation);
    }

    Ok((positions, rotations))
}

/// Reads the per-frame index chunks from the start of the buffer, strictly
/// forward. The cursor must land exactly on the index-region boundary after
/// the last frame.
fn read_indices(
    cursor: &mut Cursor,
    frames: &[FrameDesc],
    layout: &BufferLayout,
) -> Result<Vec<FrameIndices>, Error> {
    cursor.seek(0);

    let mut all = Vec::with_capacity(frames.len());
    for frame in frames {
        let position_values = read_u16_array(cursor, frame.position_count)?;
        let position_bones = read_u16_array(cursor, frame.position_count)?;
        let rotation_values = read_u16_array(cursor, frame.rotation_count)?;
        let rotation_bones = read_u16_array(cursor, frame.rotation_count)?;
        all.push(FrameIndices {
            position_values,
            position_bones,
            rotation_values,
            rotation_bones,
        });
    }

    if cursor.position() != layout.index_region_size {
        return Err(Error::OffsetMismatch {
            region: "indices",
            expected: layout.index_region_size,
            actual: cursor.position(),
        });
    }

    Ok(all)
}

fn read_u16_array(cursor: &mut Cursor, count: u16) -> Result<Vec<u16>, Error> {
    let mut values = Vec::with_capacity(count as usize);
    for _ in 0..count {
        values.push(cursor.read_u16()?);
    }
    Ok(values)
}

/// Joins the flat value tables and the per-frame indices into the final
/// frame-to-bone maps. A bone id repeated within one frame's list is
/// overwritten by the later entry.
fn assemble(
    indices: &[FrameIndices],
    positions: &[Vec3],
    rotations: &[Quat],
) -> Result<FallbackAnimation, Error> {
    let mut animation = FallbackAnimation::default();

    for (f, frame) in indices.iter().enumerate() {
        let frame_id = f as u16;

        let translations = animation.translations.entry(frame_id).or_default();
        for (&value, &bone) in frame.position_values.iter().zip(&frame.position_bones) {
            let position = positions.get(value as usize).copied().ok_or(
                Error::ValueIndexOutOfRange {
                    kind: "position",
                    frame: frame_id,
                    index: value,
                    len: positions.len(),
                },
            )?;
            translations.insert(bone, position);
        }

        let frame_rotations = animation.rotations.entry(frame_id).or_default();
        for (&value, &bone) in frame.rotation_values.iter().zip(&frame.rotation_bones) {
            let rotation = rotations.get(value as usize).copied().ok_or(
                Error::ValueIndexOutOfRange {
                    kind: "rotation",
                    frame: frame_id,
                    index: value,
                    len: rotations.len(),
                },
            )?;
            frame_rotations.insert(bone, rotation);
        }
    }

    Ok(animation)
}
