//! Tests for the encoder engine and the byte-level wire format.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::CString;

use super::*;
use crate::endian::{BigEndian, LittleEndian};

/// Helper to run a closure against a fresh encoder and return the produced
/// bytes.
fn with_encoder<O: ByteOrder, F>(mut f: F) -> Vec<u8>
where
    F: FnMut(&mut Encoder<Vec<u8>, O>) -> Result<()>,
{
    let mut encoder = Encoder::new(Vec::new());
    f(&mut encoder).unwrap();
    encoder.into_inner()
}

#[test]
fn scalars_are_byte_exact_little_endian() {
    let buf = with_encoder::<LittleEndian, _>(|e| 0x0102_0304_u32.encode(e));
    assert_eq!(buf, [0x04, 0x03, 0x02, 0x01]);

    let buf = with_encoder::<LittleEndian, _>(|e| 0x0102_u16.encode(e));
    assert_eq!(buf, [0x02, 0x01]);

    let buf = with_encoder::<LittleEndian, _>(|e| 0x01_u8.encode(e));
    assert_eq!(buf, [0x01]);

    let buf = with_encoder::<LittleEndian, _>(|e| {
        0x0102_0304_0506_0708_u64.encode(e)
    });
    assert_eq!(buf, [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn scalars_are_byte_exact_big_endian() {
    let buf = with_encoder::<BigEndian, _>(|e| 0x0102_0304_u32.encode(e));
    assert_eq!(buf, [0x01, 0x02, 0x03, 0x04]);

    let buf = with_encoder::<BigEndian, _>(|e| 0x0102_u16.encode(e));
    assert_eq!(buf, [0x01, 0x02]);

    let buf = with_encoder::<BigEndian, _>(|e| {
        0x0102_0304_0506_0708_u64.encode(e)
    });
    assert_eq!(buf, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
}

#[test]
fn signed_and_float_scalars_match_their_bit_patterns() {
    let buf = with_encoder::<LittleEndian, _>(|e| (-42_i32).encode(e));
    assert_eq!(buf, (-42_i32).to_le_bytes());

    let buf = with_encoder::<BigEndian, _>(|e| (-42_i32).encode(e));
    assert_eq!(buf, (-42_i32).to_be_bytes());

    let buf =
        with_encoder::<LittleEndian, _>(|e| std::f32::consts::PI.encode(e));
    assert_eq!(buf, std::f32::consts::PI.to_le_bytes());

    let buf =
        with_encoder::<BigEndian, _>(|e| std::f64::consts::E.encode(e));
    assert_eq!(buf, std::f64::consts::E.to_be_bytes());

    let buf = with_encoder::<LittleEndian, _>(|e| f32::NAN.encode(e));
    assert_eq!(buf, f32::NAN.to_le_bytes());
}

#[test]
fn pointer_sized_integers_always_occupy_eight_bytes() {
    let buf = with_encoder::<LittleEndian, _>(|e| 5_usize.encode(e));
    assert_eq!(buf, 5_u64.to_le_bytes());

    let buf = with_encoder::<BigEndian, _>(|e| (-5_isize).encode(e));
    assert_eq!(buf, (-5_i64).to_be_bytes());
}

#[test]
fn booleans_and_chars() {
    let buf = with_encoder::<LittleEndian, _>(|e| true.encode(e));
    assert_eq!(buf, [1]);

    let buf = with_encoder::<LittleEndian, _>(|e| false.encode(e));
    assert_eq!(buf, [0]);

    let buf = with_encoder::<LittleEndian, _>(|e| 'A'.encode(e));
    assert_eq!(buf, 0x41_u32.to_le_bytes());

    let buf = with_encoder::<BigEndian, _>(|e| '\u{1F980}'.encode(e));
    assert_eq!(buf, 0x0001_F980_u32.to_be_bytes());
}

#[test]
fn strings_are_length_prefixed_with_no_terminator() {
    let buf = with_encoder::<LittleEndian, _>(|e| "abcd".encode(e));
    assert_eq!(buf.len(), 12);
    assert_eq!(&buf[..8], 4_u64.to_le_bytes());
    assert_eq!(&buf[8..], b"abcd");

    let buf = with_encoder::<BigEndian, _>(|e| "abcd".encode(e));
    assert_eq!(&buf[..8], 4_u64.to_be_bytes());
    assert_eq!(&buf[8..], b"abcd");

    let buf = with_encoder::<LittleEndian, _>(|e| String::new().encode(e));
    assert_eq!(buf, 0_u64.to_le_bytes());
}

#[test]
fn c_strings_drop_the_terminator_from_the_wire() {
    let text = CString::new("abc").unwrap();
    let buf = with_encoder::<LittleEndian, _>(|e| text.encode(e));
    assert_eq!(&buf[..8], 3_u64.to_le_bytes());
    assert_eq!(&buf[8..], b"abc");
}

#[test]
fn sequences_are_length_prefixed() {
    let buf =
        with_encoder::<LittleEndian, _>(|e| vec![10_u8, 20, 30].encode(e));
    assert_eq!(&buf[..8], 3_u64.to_le_bytes());
    assert_eq!(&buf[8..], [10, 20, 30]);

    let buf = with_encoder::<LittleEndian, _>(|e| {
        vec![100_u32, 200, 300].encode(e)
    });
    assert_eq!(&buf[..8], 3_u64.to_le_bytes());
    let expected: Vec<u8> = [100_u32, 200, 300]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    assert_eq!(&buf[8..], expected);

    let buf = with_encoder::<LittleEndian, _>(|e| Vec::<u8>::new().encode(e));
    assert_eq!(buf, 0_u64.to_le_bytes());
}

#[test]
fn fixed_arrays_carry_no_length_prefix() {
    let buf =
        with_encoder::<LittleEndian, _>(|e| [10_u8, 20, 30, 40].encode(e));
    assert_eq!(buf, [10, 20, 30, 40]);

    let buf = with_encoder::<BigEndian, _>(|e| [0x0102_u16; 2].encode(e));
    assert_eq!(buf, [0x01, 0x02, 0x01, 0x02]);
}

#[test]
fn tuples_and_pairs_are_raw_concatenation() {
    let buf = with_encoder::<LittleEndian, _>(|e| (0x01_u8, 0x0203_u16).encode(e));
    assert_eq!(buf, [0x01, 0x03, 0x02]);

    let buf = with_encoder::<LittleEndian, _>(|e| {
        (42_u32, String::from("hi"), true).encode(e)
    });
    assert_eq!(&buf[..4], 42_u32.to_le_bytes());
    assert_eq!(&buf[4..12], 2_u64.to_le_bytes());
    assert_eq!(&buf[12..14], b"hi");
    assert_eq!(buf[14], 1);
}

#[test]
fn maps_and_sets_share_the_sequence_framing() {
    let mut map = BTreeMap::new();
    map.insert(1_u8, 0x0102_u16);
    map.insert(2_u8, 0x0304_u16);

    let buf = with_encoder::<BigEndian, _>(|e| map.encode(e));
    assert_eq!(&buf[..8], 2_u64.to_be_bytes());
    // BTreeMap iterates in key order.
    assert_eq!(&buf[8..], [1, 0x01, 0x02, 2, 0x03, 0x04]);

    let set: BTreeSet<u8> = [3, 1, 2].into_iter().collect();
    let buf = with_encoder::<LittleEndian, _>(|e| set.encode(e));
    assert_eq!(&buf[..8], 3_u64.to_le_bytes());
    assert_eq!(&buf[8..], [1, 2, 3]);
}

#[test]
fn options_use_a_single_tag_byte() {
    let buf = with_encoder::<LittleEndian, _>(|e| Some(0x0102_u16).encode(e));
    assert_eq!(buf, [1, 0x02, 0x01]);

    let buf = with_encoder::<LittleEndian, _>(|e| None::<u16>.encode(e));
    assert_eq!(buf, [0]);
}

#[test]
fn results_use_a_variant_index() {
    let ok: std::result::Result<u8, u8> = Ok(7);
    let buf = with_encoder::<LittleEndian, _>(|e| ok.encode(e));
    assert_eq!(&buf[..4], 0_u32.to_le_bytes());
    assert_eq!(buf[4], 7);

    let err: std::result::Result<u8, u8> = Err(9);
    let buf = with_encoder::<LittleEndian, _>(|e| err.encode(e));
    assert_eq!(&buf[..4], 1_u32.to_le_bytes());
    assert_eq!(buf[4], 9);
}

#[test]
fn unit_and_phantom_data_write_nothing() {
    let buf = with_encoder::<LittleEndian, _>(|e| ().encode(e));
    assert!(buf.is_empty());

    let buf = with_encoder::<LittleEndian, _>(|e| {
        std::marker::PhantomData::<u64>.encode(e)
    });
    assert!(buf.is_empty());
}

#[test]
fn raw_writes_bypass_all_framing() {
    let buf = with_encoder::<BigEndian, _>(|e| e.write_raw(&[9, 8, 7]));
    assert_eq!(buf, [9, 8, 7]);
}

#[test]
fn nested_containers_compose() {
    let value = vec![vec![1_u8], vec![2, 3]];
    let buf = with_encoder::<LittleEndian, _>(|e| value.encode(e));

    assert_eq!(&buf[..8], 2_u64.to_le_bytes());
    assert_eq!(&buf[8..16], 1_u64.to_le_bytes());
    assert_eq!(buf[16], 1);
    assert_eq!(&buf[17..25], 2_u64.to_le_bytes());
    assert_eq!(&buf[25..], [2, 3]);
}

#[test]
fn the_sink_can_be_a_borrowed_stream() {
    let mut stream = Vec::new();
    let mut encoder = Encoder::<_, LittleEndian>::new(&mut stream);
    encoder.encode(&0xAB_u8).unwrap();
    drop(encoder);
    assert_eq!(stream, [0xAB]);
}
