use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeTextError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk {path}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("File is not valid UTF-8: {path}")]
    Decode {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

impl CodeTextError {
    pub fn io_at(path: &Path, source: std::io::Error) -> Self {
        CodeTextError::Io(std::io::Error::new(
            source.kind(),
            format!("{}: {}", path.display(), source),
        ))
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CodeTextError::Cancelled => 130, // Interrupted (SIGINT)
            CodeTextError::InvalidPath { .. } => 2,
            CodeTextError::Decode { .. } => 3,
            CodeTextError::Io(_) | CodeTextError::Walk { .. } => 4,
            CodeTextError::Config { .. } => 5,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CodeTextError {
    fn user_message(&self) -> String {
        match self {
            CodeTextError::Walk { path, source } => {
                format!("Failed to read directory entry under {}: {}", path, source)
            }
            CodeTextError::Decode { path, source } => {
                format!(
                    "Cannot decode {} as UTF-8 (invalid byte at offset {})",
                    path,
                    source.utf8_error().valid_up_to()
                )
            }
            CodeTextError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            CodeTextError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            CodeTextError::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CodeTextError::Walk { .. } => Some(
                "Check that the directory is readable, or exclude it with --exclude.".to_string(),
            ),
            CodeTextError::Decode { .. } => Some(
                "Only UTF-8 text files can be combined. Convert the file or narrow the match with --suffix.".to_string(),
            ),
            CodeTextError::InvalidPath { .. } => Some(
                "Pass an existing directory as the root to scan.".to_string(),
            ),
            CodeTextError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all values are valid.".to_string(),
            ),
            CodeTextError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => Some(
                "Ensure you have read access to the scanned files and write access to the output path.".to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for CodeTextError {
    fn from(error: toml::de::Error) -> Self {
        CodeTextError::Config {
            message: error.to_string(),
        }
    }
}

impl From<regex::Error> for CodeTextError {
    fn from(error: regex::Error) -> Self {
        CodeTextError::Config {
            message: format!("Invalid exclude pattern: {}", error),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodeTextError>;
