use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codetext")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Combine source files with a given suffix into one text file")]
#[command(
    long_about = "CodeText walks a directory tree and concatenates every file whose name ends \
                  with the configured suffix into a single output file, framing each one with \
                  start and end markers that name the source file."
)]
#[command(after_help = "EXAMPLES:\n  \
    codetext\n  \
    codetext ./MyApp --suffix .swift --output swift_sources.txt\n  \
    codetext . -s .rs -e target,.git\n  \
    codetext . --dry-run --output-format json")]
pub struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Output file (created or truncated)
    #[arg(short, long, help = "Output file path (default: combined_output.txt)")]
    pub output: Option<PathBuf>,

    /// File name suffix to include
    #[arg(short, long, help = "File name suffix to match, case-sensitive (default: .swift)")]
    pub suffix: Option<String>,

    /// Directories to exclude from the scan
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Maximum directory depth
    #[arg(long, help = "Maximum depth to scan (1 = only files directly in ROOT)")]
    pub max_depth: Option<usize>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for status messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (list matching files without writing)
    #[arg(long, help = "List the files that would be combined without writing the output")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_suffix(self.suffix.clone())
            .with_exclude(self.exclude.clone())
            .with_max_depth(self.max_depth)
            .with_output(self.output.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Default `tracing` filter directive for this verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbosity_level() {
            _ if self.quiet => "codetext=error",
            0 | 1 => "codetext=warn",
            2 => "codetext=debug",
            _ => "codetext=trace",
        }
    }
}
