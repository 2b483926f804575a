//! Bit-level building blocks.
//!
//! - [`BitSequence`]: growable/shrinkable bit string used for codes and the
//!   tree shape. Bits are packed MSB-first and unused trailing positions of the
//!   last byte are always zero.
//! - [`BitWriter`]: packs codes back to back into the payload.
//! - [`BitReader`]: MSB-first read cursor with an explicit bit limit.

use std::fmt;

use haagenti_core::{Error, Result};

/// A sequence of bits backed by bytes, MSB-first within each byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence {
    data: Vec<u8>,
    /// Number of unused low-order positions in the last byte (0-7).
    free_bits: u8,
}

impl BitSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one bit, growing the buffer when the last byte is full.
    #[inline]
    pub fn append(&mut self, bit: bool) {
        if self.free_bits == 0 {
            self.data.push(0);
            self.free_bits = 8;
        }
        self.free_bits -= 1;
        if bit {
            if let Some(last) = self.data.last_mut() {
                *last |= 1 << self.free_bits;
            }
        }
    }

    /// Remove the most recently appended bit.
    ///
    /// The removed position is cleared so padding stays zero. Does nothing on
    /// an empty sequence.
    #[inline]
    pub fn remove_last(&mut self) {
        let Some(last) = self.data.last_mut() else {
            return;
        };
        *last &= !(1u8 << self.free_bits);
        self.free_bits += 1;
        if self.free_bits == 8 {
            self.data.pop();
            self.free_bits = 0;
        }
    }

    /// Set the most recently appended bit to 1 without changing the length.
    #[inline]
    pub fn set_last_bit(&mut self) {
        if let Some(last) = self.data.last_mut() {
            *last |= 1 << self.free_bits;
        }
    }

    /// Number of bits in the sequence.
    pub fn len(&self) -> usize {
        self.data.len() * 8 - self.free_bits as usize
    }

    /// Check if the sequence holds no bits.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of occupied bits in the trailing byte (1-8), or 0 when empty.
    pub fn occupied_in_last(&self) -> u8 {
        if self.data.is_empty() {
            0
        } else {
            8 - self.free_bits
        }
    }

    /// The backing bytes, zero-padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the sequence, returning its zero-padded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Get the bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len() {
            return None;
        }
        Some(self.data[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut seq = BitSequence::new();
        for bit in iter {
            seq.append(bit);
        }
        seq
    }
}

/// MSB-first bit packer for the payload stream.
///
/// A fresh output byte is opened as soon as the previous one fills up, so the
/// buffer always ends with the byte currently being written.
#[derive(Debug)]
pub struct BitWriter {
    data: Vec<u8>,
    /// Bits occupied in the last byte (0-7).
    offset: u8,
}

impl BitWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create with capacity (in bytes).
    pub fn with_capacity(capacity: usize) -> Self {
        let mut data = Vec::with_capacity(capacity.max(1));
        data.push(0);
        Self { data, offset: 0 }
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.write_high_bits(if bit { 0x80 } else { 0 }, 1);
    }

    /// Write every bit of `bits` in order.
    #[inline]
    pub fn write_sequence(&mut self, bits: &BitSequence) {
        let bytes = bits.as_bytes();
        let Some((&last, full)) = bytes.split_last() else {
            return;
        };
        for &byte in full {
            self.write_high_bits(byte, 8);
        }
        self.write_high_bits(last, bits.occupied_in_last());
    }

    /// Write the top `count` bits of `byte` (lower bits must be zero).
    #[inline]
    fn write_high_bits(&mut self, byte: u8, count: u8) {
        debug_assert!((1..=8).contains(&count));
        let offset = self.offset;
        if let Some(current) = self.data.last_mut() {
            *current |= byte >> offset;
        }
        let filled = offset + count;
        if filled >= 8 {
            // Spill the low part of `byte` into the newly opened byte.
            let spill = if offset == 0 { 0 } else { byte << (8 - offset) };
            self.data.push(spill);
        }
        self.offset = filled % 8;
    }

    /// Bits occupied in the byte currently being written (0-7).
    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Total number of bits written.
    pub fn bit_len(&self) -> usize {
        (self.data.len() - 1) * 8 + self.offset as usize
    }

    /// Finish the stream, appending the trailing significant-bit byte.
    ///
    /// When the last byte is partial its significant-bit count is appended.
    /// On an exact byte boundary nothing is appended, and the already opened
    /// empty byte (value 0) terminates the stream instead.
    pub fn finish(mut self) -> Vec<u8> {
        if self.offset > 0 {
            self.data.push(self.offset);
        }
        self.data
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// MSB-first bit reader over a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    limit: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            limit: data.len() * 8,
        }
    }

    /// Create a reader that stops after `bit_limit` bits.
    pub fn with_limit(data: &'a [u8], bit_limit: usize) -> Self {
        Self {
            data,
            pos: 0,
            limit: bit_limit.min(data.len() * 8),
        }
    }

    /// Read one bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.pos >= self.limit {
            return Err(Error::unexpected_eof(self.pos));
        }
        let bit = self.data[self.pos / 8] & (0x80 >> (self.pos % 8)) != 0;
        self.pos += 1;
        Ok(bit)
    }

    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bits left before the limit.
    pub fn bits_remaining(&self) -> usize {
        self.limit - self.pos
    }

    /// Check if every bit up to the limit has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.limit
    }

    /// Bytes touched so far, counting a partially read byte as whole.
    pub fn bytes_consumed(&self) -> usize {
        self.pos.div_ceil(8)
    }
}
