pub mod cli;
pub mod combiner;
pub mod config;
pub mod error;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, ScanConfig};
pub use error::{CodeTextError, Result, UserFriendlyError};

// Core functionality re-exports
pub use combiner::{CombineProgress, CombineReport, Combiner};
pub use scanner::{FileFilter, SourceFile, SourceScanner};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface for CodeText functionality
pub struct CodeText {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl CodeText {
    /// Create a new CodeText instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        Ok(Self::with_shutdown(
            config,
            output_mode,
            verbose,
            quiet,
            GracefulShutdown::new()?,
        ))
    }

    /// Create a CodeText instance without installing a Ctrl+C handler
    pub fn new_for_test(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self::with_shutdown(
            config,
            output_mode,
            verbose,
            quiet,
            GracefulShutdown::new_for_test(),
        )
    }

    fn with_shutdown(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
        shutdown: GracefulShutdown,
    ) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        }
    }

    /// Create CodeText instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Self::new(
            config,
            cli_args.output_format.into(),
            cli_args.verbose,
            cli_args.quiet,
        )
    }

    /// Combine every matching file under `root` into the configured output file
    pub fn combine_tree<P: AsRef<Path>>(&self, root: P) -> Result<CombineReport> {
        let root = root.as_ref();
        let output = &self.config.output.path;

        self.shutdown.check_shutdown()?;
        self.output_formatter.start_operation(&format!(
            "Combining '{}' files from {}",
            self.config.scan.suffix,
            root.display()
        ));

        let spinner = self.progress_manager.create_spinner("Scanning...");
        let combiner = Combiner::new(&self.config.scan);

        let mut before_file = |progress: &CombineProgress| -> Result<()> {
            self.shutdown.check_shutdown()?;
            ui::progress::update_combine_progress(&spinner, progress);
            Ok(())
        };
        let result = combiner.combine_with_progress(root, output, &mut before_file);

        match result {
            Ok(report) => {
                ui::progress::finish_progress_with_summary(
                    &spinner,
                    &format!("Combined {} files", report.files_written),
                    report.duration,
                );
                Ok(report)
            }
            Err(e) => {
                spinner.abandon();
                Err(e)
            }
        }
    }

    /// List the files a run would combine, without writing anything
    pub fn plan<P: AsRef<Path>>(&self, root: P) -> Result<Vec<SourceFile>> {
        SourceScanner::new(&self.config.scan)?
            .with_skip_path(&self.config.output.path)
            .collect(root)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &CodeTextError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Combine every file under `root_dir` whose name ends with `suffix` into
/// `output_file`, one framed block per file in walk order.
///
/// The output file is truncated first. Any unreadable or non-UTF-8 file
/// aborts the run and may leave the output partially written.
pub fn combine<R, O>(root_dir: R, output_file: O, suffix: &str) -> Result<CombineReport>
where
    R: AsRef<Path>,
    O: AsRef<Path>,
{
    let scan = ScanConfig {
        suffix: suffix.to_string(),
        ..ScanConfig::default()
    };

    Combiner::new(&scan).combine(root_dir, output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(temp_dir: &TempDir, suffix: &str) -> Config {
        let mut config = Config::default();
        config.scan.suffix = suffix.to_string();
        config.output.path = temp_dir.path().join("combined.txt");
        config
    }

    #[test]
    fn test_combine_function() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("project");
        fs::create_dir_all(root.join("AR-TicTacToe")).unwrap();
        fs::write(root.join("AR-TicTacToe/Board.swift"), "struct Board {}").unwrap();
        fs::write(root.join("getcodetext.py"), "import os").unwrap();
        let output = temp_dir.path().join("combined_output.txt");

        let report = combine(&root, &output, ".swift").unwrap();

        assert_eq!(report.files_written, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "----- Start of Board.swift -----\nstruct Board {}\n----- End of Board.swift -----\n\n"
        );
    }

    #[test]
    fn test_combine_tree_writes_configured_output() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("src");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();

        let codetext = CodeText::new_for_test(config_for(&temp_dir, ".rs"), OutputMode::Plain, 0, true);
        let report = codetext.combine_tree(&root).unwrap();

        assert_eq!(report.files, vec!["main.rs"]);
        assert!(temp_dir.path().join("combined.txt").exists());
    }

    #[test]
    fn test_shutdown_before_run_cancels() {
        let temp_dir = TempDir::new().unwrap();
        let codetext = CodeText::new_for_test(config_for(&temp_dir, ".rs"), OutputMode::Plain, 0, true);

        assert!(codetext.is_running());
        codetext.request_shutdown();
        assert!(!codetext.is_running());

        let result = codetext.combine_tree(temp_dir.path());
        assert!(matches!(result, Err(CodeTextError::Cancelled)));
        assert!(!temp_dir.path().join("combined.txt").exists());
    }

    #[test]
    fn test_plan_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("src");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("lib.rs"), "").unwrap();
        fs::write(root.join("notes.md"), "").unwrap();

        let codetext = CodeText::new_for_test(config_for(&temp_dir, ".rs"), OutputMode::Plain, 0, true);
        let planned = codetext.plan(&root).unwrap();

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].file_name, "lib.rs");
        assert!(!temp_dir.path().join("combined.txt").exists());
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("codetext.toml");

        CodeText::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[scan]"));
        assert!(content.contains("[output]"));
    }
}
