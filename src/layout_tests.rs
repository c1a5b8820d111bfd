use crate::{BufferLayout, Error, FrameDesc, QuantScheme, SkeletonVariant};

fn frame(index_chunk_size: u32, position_count: u16, rotation_count: u16) -> FrameDesc {
    FrameDesc {
        index_chunk_size,
        position_count,
        rotation_count,
        float_track_count: 0,
    }
}

fn scheme(variant: SkeletonVariant) -> QuantScheme {
    let (pos_bits, rot_bits) = variant.bit_widths();
    QuantScheme::for_bit_widths(pos_bits, rot_bits).expect("known variant")
}

#[test]
fn classify_player_rig_as_extended() {
    let variant = SkeletonVariant::classify("characters/main_player/pma_body.rig");
    assert_eq!(variant, SkeletonVariant::Extended);
    assert_eq!(variant.bit_widths(), (32, 64));
}

#[test]
fn classify_prop_rig_as_base() {
    let variant = SkeletonVariant::classify("props/crate.rig");
    assert_eq!(variant, SkeletonVariant::Base);
    assert_eq!(variant.bit_widths(), (96, 48));
}

#[test]
fn classify_is_case_insensitive() {
    assert_eq!(
        SkeletonVariant::classify("Characters\\TPP_Arms.rig"),
        SkeletonVariant::Extended
    );
}

#[test]
fn unknown_bit_widths_are_rejected() {
    assert!(matches!(
        QuantScheme::for_bit_widths(64, 64),
        Err(Error::UnsupportedScheme {
            pos_bits: 64,
            rot_bits: 64,
        })
    ));
    assert!(matches!(
        QuantScheme::for_bit_widths(32, 32),
        Err(Error::UnsupportedScheme { .. })
    ));
}

#[test]
fn resolve_base_variant_offsets() {
    // 2 frames of 8 B indices; 3 raw-float positions, 2 w-stripped rotations.
    let frames = [frame(8, 2, 0), frame(8, 0, 2)];
    let buffer_len = 16 + 3 * 12 + 2 * 6;

    let layout =
        BufferLayout::resolve(buffer_len, &frames, scheme(SkeletonVariant::Base), 3, 2)
            .expect("consistent layout");

    assert_eq!(layout.index_region_size, 16);
    assert_eq!(layout.positions_offset, 16);
    assert_eq!(layout.rotations_offset, 16 + 36);
}

#[test]
fn resolve_extended_variant_offsets() {
    // 1 frame of 12 B indices; 4 packed positions, 3 full quaternions.
    let frames = [frame(12, 2, 1)];
    let buffer_len = 12 + 4 * 4 + 3 * 8;

    let layout =
        BufferLayout::resolve(buffer_len, &frames, scheme(SkeletonVariant::Extended), 4, 3)
            .expect("consistent layout");

    assert_eq!(layout.positions_offset, 12);
    assert_eq!(layout.rotations_offset, 12 + 16);
}

#[test]
fn resolve_rejects_off_by_one_buffer_length() {
    let frames = [frame(8, 2, 0)];
    let exact = 8 + 2 * 12;

    for buffer_len in [exact - 1, exact + 1] {
        let err = BufferLayout::resolve(buffer_len, &frames, scheme(SkeletonVariant::Base), 2, 0)
            .expect_err("inconsistent layout");
        assert!(matches!(err, Error::SizeMismatch { .. }), "got {err:?}");
    }
}

#[test]
fn resolve_empty_animation() {
    let layout = BufferLayout::resolve(0, &[], scheme(SkeletonVariant::Base), 0, 0)
        .expect("empty layout is consistent");
    assert_eq!(layout.index_region_size, 0);
    assert_eq!(layout.positions_offset, 0);
    assert_eq!(layout.rotations_offset, 0);
}
