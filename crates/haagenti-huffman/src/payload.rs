//! Payload bit-packing.
//!
//! ## Layout
//!
//! Codes are packed MSB-first with no gaps, then one trailing byte `t`:
//!
//! - `t == 0`: every preceding byte is fully significant.
//! - `t in 1..=7`: only the top `t` bits of the preceding byte are
//!   significant.
//!
//! The zero case is ambiguous with a genuine data byte and is kept exactly as
//! written for compatibility; the encoder never emits anything else.

use haagenti_core::{Error, Result};
use tracing::trace;

use crate::bits::{BitReader, BitWriter};
use crate::table::CodeTable;
use crate::tree::CodeTree;

/// Pack `input` using the codes in `table`.
///
/// Fails if a byte of `input` has no code.
pub fn encode_payload(input: &[u8], table: &CodeTable) -> Result<Vec<u8>> {
    let mut writer = BitWriter::with_capacity(input.len() / 2 + 2);
    for (offset, &byte) in input.iter().enumerate() {
        let code = table
            .get(byte)
            .ok_or_else(|| Error::corrupted_at(format!("no code for byte 0x{:02x}", byte), offset))?;
        writer.write_sequence(code);
    }
    trace!(bits = writer.bit_len(), "packed payload");
    Ok(writer.finish())
}

/// Significant bit count of a payload, from its trailing byte.
///
/// Returns the number of data bytes (excluding the trailing byte) and the
/// number of significant bits across them.
pub fn significant_bits(payload: &[u8]) -> Result<(usize, usize)> {
    let Some((&trailer, data)) = payload.split_last() else {
        return Err(Error::truncated_payload("missing trailing byte"));
    };

    match trailer {
        0 => Ok((data.len(), data.len() * 8)),
        1..=7 => {
            if data.is_empty() {
                return Err(Error::truncated_payload(format!(
                    "trailing byte claims {} bits but no data byte precedes it",
                    trailer
                )));
            }
            Ok((data.len(), (data.len() - 1) * 8 + trailer as usize))
        }
        _ => Err(Error::corrupted_at(
            format!("trailing byte {} exceeds 7 significant bits", trailer),
            payload.len() - 1,
        )),
    }
}

/// Decode a payload by walking `tree` bit by bit.
pub fn decode_payload(payload: &[u8], tree: &CodeTree) -> Result<Vec<u8>> {
    let (data_len, total_bits) = significant_bits(payload)?;

    // Every code of a single-leaf tree is the same bit, so the bit count is
    // the symbol count.
    if let Some(symbol) = tree.symbol(tree.root()) {
        return Ok(vec![symbol; total_bits]);
    }

    let mut output = Vec::with_capacity(total_bits / 2);
    let mut reader = BitReader::with_limit(&payload[..data_len], total_bits);
    let root = tree.root();
    let mut node = root;

    while !reader.is_exhausted() {
        let bit = reader.read_bit()?;
        let Some(next) = tree.child(node, bit) else {
            return Err(Error::corrupted("code walk reached past a leaf"));
        };
        match tree.symbol(next) {
            Some(symbol) => {
                output.push(symbol);
                node = root;
            }
            None => node = next,
        }
    }

    if node != root {
        return Err(Error::truncated_payload(format!(
            "stream ends inside a code after {} bits",
            total_bits
        )));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(input: &[u8]) -> Vec<u8> {
        let tree = CodeTree::from_bytes(input).unwrap();
        let payload = encode_payload(input, &tree.code_table()).unwrap();
        decode_payload(&payload, &tree).unwrap()
    }

    #[test]
    fn test_encode_partial_byte() {
        // a=1, b=0: 1 1 0 -> 0b110_00000 with 3 significant bits.
        let tree = CodeTree::from_bytes(b"aab").unwrap();
        let payload = encode_payload(b"aab", &tree.code_table()).unwrap();
        assert_eq!(payload, vec![0b1100_0000, 3]);
    }

    #[test]
    fn test_encode_exact_boundary() {
        // a=0, b=1 (tie on weight 8 goes to the smaller byte).
        let mut input = vec![b'b'; 8];
        input.extend_from_slice(&[b'a'; 8]);
        let tree = CodeTree::from_bytes(&input).unwrap();
        let payload = encode_payload(&input, &tree.code_table()).unwrap();
        assert_eq!(payload, vec![0xFF, 0x00, 0x00]);
        assert_eq!(decode_payload(&payload, &tree).unwrap(), input);
    }

    #[test]
    fn test_zero_last_data_byte_partial() {
        // a=0 (weight 3), b=1 (weight 8): last data byte is 0b000_00000.
        let mut input = vec![b'b'; 8];
        input.extend_from_slice(&[b'a'; 3]);
        let tree = CodeTree::from_bytes(&input).unwrap();
        let payload = encode_payload(&input, &tree.code_table()).unwrap();
        assert_eq!(payload, vec![0xFF, 0x00, 3]);
        assert_eq!(decode_payload(&payload, &tree).unwrap(), input);
    }

    #[test]
    fn test_single_leaf_counts_bits() {
        let tree = CodeTree::from_bytes(&[0x41; 1000]).unwrap();
        let payload = encode_payload(&[0x41; 1000], &tree.code_table()).unwrap();
        assert_eq!(payload.len(), 126);
        assert!(payload.iter().all(|&b| b == 0));
        assert_eq!(decode_payload(&payload, &tree).unwrap(), vec![0x41; 1000]);
    }

    #[test]
    fn test_single_leaf_partial() {
        let tree = CodeTree::from_bytes(&[7; 13]).unwrap();
        let payload = encode_payload(&[7; 13], &tree.code_table()).unwrap();
        assert_eq!(payload, vec![0, 0, 5]);
        assert_eq!(decode_payload(&payload, &tree).unwrap(), vec![7; 13]);
    }

    #[test]
    fn test_significant_bits() {
        assert_eq!(significant_bits(&[0xAB, 0xCD, 0]).unwrap(), (2, 16));
        assert_eq!(significant_bits(&[0xAB, 0xCD, 3]).unwrap(), (2, 11));
        assert_eq!(significant_bits(&[0]).unwrap(), (0, 0));
    }

    #[test]
    fn test_significant_bits_errors() {
        assert!(matches!(
            significant_bits(&[]),
            Err(Error::TruncatedPayload { .. })
        ));
        assert!(matches!(
            significant_bits(&[5]),
            Err(Error::TruncatedPayload { .. })
        ));
        assert!(matches!(
            significant_bits(&[0xFF, 9]),
            Err(Error::CorruptedData { .. })
        ));
    }

    #[test]
    fn test_decode_stops_mid_code() {
        // c=0, a=10, b=11. Bits "1" then stop: inside a code.
        let tree = CodeTree::from_bytes(b"abcc").unwrap();
        let err = decode_payload(&[0b1000_0000, 1], &tree).unwrap_err();
        assert!(matches!(err, Error::TruncatedPayload { .. }));
    }

    #[test]
    fn test_encode_unknown_byte() {
        let tree = CodeTree::from_bytes(b"ab").unwrap();
        let err = encode_payload(b"abz", &tree.code_table()).unwrap_err();
        assert!(err.to_string().contains("0x7a"));
    }

    #[test]
    fn test_roundtrip_text() {
        let input = b"The quick brown fox jumps over the lazy dog. ".repeat(50);
        assert_eq!(roundtrip(&input), input);
    }

    #[test]
    fn test_roundtrip_all_bytes() {
        let input: Vec<u8> = (0..=255u8).rev().cycle().take(5000).collect();
        assert_eq!(roundtrip(&input), input);
    }
}
