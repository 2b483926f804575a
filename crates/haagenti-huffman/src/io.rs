//! `Read`/`Write` adapters for whole-stream coding.
//!
//! The format is whole-file: the tree depends on every input byte, so these
//! read the source to the end before producing any output.

use std::io::{Read, Write};

use haagenti_core::Result;

use crate::codec::{decode_with_summary, encode_with_summary, CodecSummary, Transcoded};
use crate::tree::CodeTree;

/// Encode everything from `reader` into `writer`.
pub fn compress_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
) -> Result<(CodecSummary, Option<CodeTree>)> {
    transcode(reader, writer, encode_with_summary)
}

/// Decode everything from `reader` into `writer`.
pub fn decompress_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
) -> Result<(CodecSummary, Option<CodeTree>)> {
    transcode(reader, writer, decode_with_summary)
}

fn transcode<R, W, F>(
    mut reader: R,
    mut writer: W,
    op: F,
) -> Result<(CodecSummary, Option<CodeTree>)>
where
    R: Read,
    W: Write,
    F: FnOnce(&[u8]) -> Result<Transcoded>,
{
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;

    let transcoded = op(&input)?;
    writer.write_all(&transcoded.data)?;
    writer.flush()?;

    Ok((transcoded.summary, transcoded.tree))
}
