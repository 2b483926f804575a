//! Rendering of run results.
//!
//! The text form is three lines: source size, destination payload size and
//! table size. For a decode the first two lines swap, so the first line is
//! always the side that was read. With `verbose` the code table follows, one
//! `code symbol` line per leaf.

use haagenti_core::CompressionStats;
use haagenti_huffman::{CodeTree, CodecSummary};
use serde::Serialize;

use crate::error::CliResult;
use crate::run::Mode;

/// Outcome of a single run.
#[derive(Debug, Clone)]
pub struct Report {
    pub mode: Mode,
    pub summary: CodecSummary,
    /// `None` when the source was empty.
    pub tree: Option<CodeTree>,
    pub stats: CompressionStats,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    mode: &'static str,
    #[serde(flatten)]
    summary: &'a CodecSummary,
    time_us: u64,
    ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    codes: Option<Vec<JsonCode>>,
}

#[derive(Serialize)]
struct JsonCode {
    symbol: u8,
    code: String,
}

impl Report {
    /// Plain-text report.
    pub fn render_text(&self, verbose: bool) -> String {
        let s = &self.summary;
        let (from, to) = match self.mode {
            Mode::Compress => (s.original_size, s.encoded_size),
            Mode::Decompress => (s.encoded_size, s.original_size),
        };
        let mut out = format!("{}\n{}\n{}\n", from, to, s.table_size);

        if verbose {
            if let Some(tree) = &self.tree {
                out.push_str(&tree.code_table().to_string());
            }
        }
        out
    }

    /// JSON report on a single line.
    pub fn render_json(&self, verbose: bool) -> CliResult<String> {
        let codes = match (&self.tree, verbose) {
            (Some(tree), true) => Some(
                tree.code_table()
                    .iter()
                    .map(|(symbol, code)| JsonCode {
                        symbol,
                        code: code.to_string(),
                    })
                    .collect(),
            ),
            _ => None,
        };

        let report = JsonReport {
            mode: self.mode.as_str(),
            summary: &self.summary,
            time_us: self.stats.time_us,
            ratio: self.stats.ratio().ratio(),
            codes,
        };
        Ok(serde_json::to_string(&report)?)
    }

    /// Render according to the `json` and `verbose` switches.
    pub fn render(&self, json: bool, verbose: bool) -> CliResult<String> {
        if json {
            let mut line = self.render_json(verbose)?;
            line.push('\n');
            Ok(line)
        } else {
            Ok(self.render_text(verbose))
        }
    }
}
