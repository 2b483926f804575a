//! Haagenti Huffman command-line tool
//!
//! Encodes and decodes whole files with the Huffman codec and reports the
//! sizes involved.
//!
//! ## Usage
//!
//! ```bash
//! # Encode
//! haagenti-huffman -c input.txt input.huf
//!
//! # Decode and print the code table
//! haagenti-huffman -v -d input.huf input.txt
//!
//! # Machine-readable report
//! haagenti-huffman -c input.txt input.huf --json
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod run;

pub use config::CliConfig;
pub use error::{CliError, CliResult};
pub use report::Report;
pub use run::{run, Mode};
