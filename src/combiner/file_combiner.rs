use crate::combiner::block;
use crate::config::ScanConfig;
use crate::error::{CodeTextError, Result};
use crate::scanner::{SourceFile, SourceScanner};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const OUTPUT_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct CombineProgress {
    pub files_processed: usize,
    pub bytes_processed: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
}

impl CombineProgress {
    pub fn new() -> Self {
        Self {
            files_processed: 0,
            bytes_processed: 0,
            current_file: None,
            start_time: Instant::now(),
        }
    }

    pub fn update_file(&mut self, file_name: String, bytes: u64) {
        self.files_processed += 1;
        self.bytes_processed += bytes;
        self.current_file = Some(file_name);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for CombineProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CombineReport {
    pub root: String,
    pub output_path: String,
    pub suffix: String,
    /// Block names in the order they were written.
    pub files: Vec<String>,
    pub files_written: usize,
    /// Source content bytes, excluding markers.
    pub bytes_written: u64,
    pub duration: Duration,
    pub completed_at: DateTime<Utc>,
}

impl CombineReport {
    pub fn is_empty(&self) -> bool {
        self.files_written == 0
    }
}

pub struct Combiner {
    config: ScanConfig,
}

impl Combiner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn combine<R, O>(&self, root: R, output: O) -> Result<CombineReport>
    where
        R: AsRef<Path>,
        O: AsRef<Path>,
    {
        self.combine_with_progress(root, output, &mut |_| Ok(()))
    }

    /// Runs the combine, calling `before_file` ahead of each matched file.
    /// An error from the callback aborts the run.
    pub fn combine_with_progress<R, O>(
        &self,
        root: R,
        output: O,
        before_file: &mut dyn FnMut(&CombineProgress) -> Result<()>,
    ) -> Result<CombineReport>
    where
        R: AsRef<Path>,
        O: AsRef<Path>,
    {
        let root = root.as_ref();
        let output = output.as_ref();
        let mut progress = CombineProgress::new();

        // Fail on a bad root before touching the output file
        let scanner = SourceScanner::new(&self.config)?;
        if !root.is_dir() {
            return Err(CodeTextError::InvalidPath {
                path: format!("{} is not a directory", root.display()),
            });
        }

        let file = File::create(output).map_err(|e| CodeTextError::io_at(output, e))?;
        let mut writer = BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, file);
        info!(
            root = %root.display(),
            output = %output.display(),
            suffix = %self.config.suffix,
            "combining source files"
        );

        let scanner = scanner.with_skip_path(output);
        let mut names = Vec::new();

        scanner.scan(root, |source| {
            before_file(&progress)?;

            let bytes = append_source(&mut writer, &source, output)?;
            debug!(file = %source.file_name, bytes, "appended block");

            names.push(source.file_name.clone());
            progress.update_file(source.file_name, bytes);
            Ok(())
        })?;

        writer.flush().map_err(|e| CodeTextError::io_at(output, e))?;

        Ok(CombineReport {
            root: root.display().to_string(),
            output_path: output.display().to_string(),
            suffix: self.config.suffix.clone(),
            files_written: names.len(),
            files: names,
            bytes_written: progress.bytes_processed,
            duration: progress.elapsed(),
            completed_at: Utc::now(),
        })
    }
}

fn append_source<W: Write>(writer: &mut W, source: &SourceFile, output: &Path) -> Result<u64> {
    let bytes = fs::read(&source.path).map_err(|e| CodeTextError::io_at(&source.path, e))?;
    let contents = String::from_utf8(bytes).map_err(|e| CodeTextError::Decode {
        path: source.path.display().to_string(),
        source: e,
    })?;

    block::write_block(writer, &source.file_name, &contents)
        .map_err(|e| CodeTextError::io_at(output, e))?;

    Ok(contents.len() as u64)
}
