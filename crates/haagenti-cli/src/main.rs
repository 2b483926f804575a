//! Haagenti Huffman command-line tool
//!
//! ## Usage
//!
//! ```bash
//! haagenti-huffman -c SOURCE DEST
//! haagenti-huffman -v -d SOURCE DEST
//! haagenti-huffman -c SOURCE DEST --config huffman.json --json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use haagenti_cli::{run, CliConfig, CliResult, Mode};

#[derive(Parser, Debug)]
#[command(name = "haagenti-huffman")]
#[command(author = "Daemoniorum LLC")]
#[command(version)]
#[command(about = "Encodes and decodes a file using the Huffman algorithm", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["compress", "decompress"])))]
struct Args {
    /// Encode SOURCE and save to DEST
    #[arg(short = 'c')]
    compress: bool,

    /// Decode SOURCE and save to DEST
    #[arg(short = 'd')]
    decompress: bool,

    /// Display the encoding table
    #[arg(short, long)]
    verbose: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input file
    source: PathBuf,

    /// Output file
    dest: PathBuf,
}

impl Args {
    fn mode(&self) -> Mode {
        if self.compress {
            Mode::Compress
        } else {
            Mode::Decompress
        }
    }

    /// Load the config file, if any, and apply command-line overrides.
    fn resolve_config(&self) -> CliResult<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config.verbose |= self.verbose;
        config.json |= self.json;
        Ok(config)
    }
}

fn init_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("haagenti-huffman: {}", e);
            return ExitCode::from(e.exit_code() as u8);
        }
    };
    init_logging(&config.log_level);

    let output = run(args.mode(), &args.source, &args.dest, &config)
        .and_then(|report| report.render(config.json, config.verbose));

    match output {
        Ok(text) => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(category = e.category(), error = %e, "{} failed", args.mode().as_str());
            eprintln!("haagenti-huffman: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
