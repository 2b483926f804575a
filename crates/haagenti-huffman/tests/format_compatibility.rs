//! Byte-exact stream vectors.
//!
//! Output bytes depend on the tie-breaking rule and on the trailing-byte
//! convention, so these pin both. Any change here is a format break.

use haagenti_core::Error;
use haagenti_huffman::{decode, encode, encode_with_summary, CodecSummary};

fn assert_stream(input: &[u8], expected: &[u8]) {
    let encoded = encode(input).unwrap();
    assert_eq!(encoded, expected, "encoding of {:?}", input);
    assert_eq!(decode(expected).unwrap(), input);
}

#[test]
fn test_empty() {
    assert_stream(b"", b"");
}

#[test]
fn test_one_byte() {
    // Single leaf, one 0 bit, trailer 1.
    assert_stream(b"x", &[0x00, b'x', 0x00, 0x00, 0x01]);
}

#[test]
fn test_two_symbols_partial_byte() {
    assert_stream(b"aab", &[0x01, b'b', b'a', 0x80, 0xC0, 0x03]);
}

#[test]
fn test_equal_weights_prefer_lower_byte() {
    // a -> 0, b -> 1.
    assert_stream(b"ab", &[0x01, b'a', b'b', 0x80, 0x40, 0x02]);
    assert_stream(b"ba", &[0x01, b'a', b'b', 0x80, 0x80, 0x02]);
}

#[test]
fn test_three_symbols() {
    // c -> 0, a -> 10, b -> 11; bits 10 11 0 0 -> 1011_0000, 6 bits.
    assert_stream(b"abcc", &[0x02, b'c', b'a', b'b', 0xA0, 0xB0, 0x06]);
}

#[test]
fn test_exact_byte_boundary() {
    let mut input = vec![b'b'; 8];
    input.extend_from_slice(&[b'a'; 8]);
    assert_stream(&input, &[0x01, b'a', b'b', 0x80, 0xFF, 0x00, 0x00]);
}

#[test]
fn test_zero_data_byte_before_metadata() {
    let mut input = vec![b'b'; 8];
    input.extend_from_slice(&[b'a'; 3]);
    assert_stream(&input, &[0x01, b'a', b'b', 0x80, 0xFF, 0x00, 0x03]);
}

#[test]
fn test_single_symbol_thousand() {
    let input = vec![0x41u8; 1000];
    let mut expected = vec![0x00, 0x41, 0x00];
    expected.extend(std::iter::repeat(0u8).take(126));
    assert_stream(&input, &expected);
}

#[test]
fn test_full_alphabet_header() {
    let input: Vec<u8> = (0..=255u8).collect();
    let encoded = encode(&input).unwrap();
    assert_eq!(encoded[0], 255);
    // Balanced tree: every code is 8 bits, 256 bytes of payload plus a zero
    // trailer.
    assert_eq!(encoded.len(), 1 + 256 + 64 + 256 + 1);
    assert_eq!(*encoded.last().unwrap(), 0);
    assert_eq!(decode(&encoded).unwrap(), input);
}

#[test]
fn test_skewed_pair() {
    let mut input = vec![0x00u8; 999];
    input.push(0xFF);
    let encoded = encode(&input).unwrap();
    // 0xFF (weight 1) is extracted first and takes the zero branch.
    assert_eq!(&encoded[..4], &[0x01, 0xFF, 0x00, 0x80]);
    assert_eq!(decode(&encoded).unwrap(), input);
}

#[test]
fn test_summary_counts_trailer_with_table() {
    let t = encode_with_summary(b"abcc").unwrap();
    assert_eq!(
        t.summary,
        CodecSummary {
            original_size: 4,
            encoded_size: 1,
            table_size: 6,
        }
    );
}

#[test]
fn test_decode_rejects_bad_trailer() {
    let err = decode(&[0x01, b'a', b'b', 0x80, 0xFF, 0x08]).unwrap_err();
    assert!(matches!(err, Error::CorruptedData { .. }));
}

#[test]
fn test_decode_rejects_truncated_header() {
    let err = decode(&[0xFF]).unwrap_err();
    assert!(matches!(err, Error::TruncatedTree { .. }));
}
