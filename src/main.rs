use clap::Parser;
use codetext::{Cli, CodeText, CodeTextError, OutputFormatter, OutputMode, UserFriendlyError};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(&cli);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let codetext = match CodeText::from_cli(&cli) {
        Ok(codetext) => codetext,
        Err(e) => {
            print_startup_error(&cli, &e);
            return e.exit_code();
        }
    };

    if cli.dry_run {
        return handle_dry_run(&cli, &codetext);
    }

    match codetext.combine_tree(&cli.root) {
        Ok(report) => {
            codetext.output_formatter().print_combine_report(&report);
            0
        }
        Err(e) => {
            tracing::debug!(error = ?e, "combine failed");
            codetext.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "codetext.toml".to_string());

    match CodeText::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  codetext <root> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(cli: &Cli, codetext: &CodeText) -> i32 {
    let formatter = codetext.output_formatter();
    let config = codetext.config();

    formatter.info("DRY RUN MODE - the output file will not be written");
    formatter.info(&format!("Suffix: {}", config.scan.suffix));
    formatter.info(&format!("Output: {}", config.output.path.display()));
    if !config.scan.exclude_dirs.is_empty() {
        formatter.info(&format!(
            "Excluded directories: {}",
            config.scan.exclude_dirs.join(", ")
        ));
    }

    match codetext.plan(&cli.root) {
        Ok(files) => {
            formatter.print_file_list(&files);
            if files.is_empty() {
                formatter.warning(&format!(
                    "No files ending in '{}' found under {}",
                    config.scan.suffix,
                    cli.root.display()
                ));
            }
            0
        }
        Err(e) => {
            codetext.handle_error(&e);
            e.exit_code()
        }
    }
}

fn print_startup_error(cli: &Cli, error: &CodeTextError) {
    let formatter = OutputFormatter::new(OutputMode::from(cli.output_format), 0, false);
    formatter.print_user_friendly_error(error);
}

fn setup_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    // Stdout carries the report; diagnostics go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
