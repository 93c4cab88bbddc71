use crate::error::{CodeTextError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SUFFIX: &str = ".swift";
pub const DEFAULT_OUTPUT: &str = "combined_output.txt";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub suffix: String,
    pub exclude_dirs: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            exclude_dirs: Vec::new(),
            exclude_patterns: Vec::new(),
            max_depth: None, // Unbounded
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CodeTextError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CodeTextError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| CodeTextError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["codetext.toml", ".codetext.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        tracing::debug!(path = default_path, "using configuration file");
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref suffix) = cli_args.suffix {
            self.scan.suffix = suffix.clone();
        }

        if let Some(ref exclude) = cli_args.exclude {
            for dir in exclude {
                if !self.scan.exclude_dirs.contains(dir) {
                    self.scan.exclude_dirs.push(dir.clone());
                }
            }
        }

        if let Some(max_depth) = cli_args.max_depth {
            self.scan.max_depth = Some(max_depth);
        }

        if let Some(ref output) = cli_args.output {
            self.output.path = output.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| CodeTextError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| CodeTextError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.suffix.is_empty() {
            return Err(CodeTextError::Config {
                message: "File suffix must not be empty".to_string(),
            });
        }

        // Matching is done on the file name only
        if self.scan.suffix.contains('/') || self.scan.suffix.contains(std::path::MAIN_SEPARATOR) {
            return Err(CodeTextError::Config {
                message: format!(
                    "File suffix must not contain a path separator: {}",
                    self.scan.suffix
                ),
            });
        }

        if self.scan.max_depth == Some(0) {
            return Err(CodeTextError::Config {
                message: "Maximum directory depth must be greater than 0".to_string(),
            });
        }

        for pattern in &self.scan.exclude_patterns {
            Regex::new(pattern)?;
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(CodeTextError::Config {
                message: "Output path must not be empty".to_string(),
            });
        }

        if self.output.path.is_dir() {
            return Err(CodeTextError::Config {
                message: format!(
                    "Output path is a directory: {}",
                    self.output.path.display()
                ),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub suffix: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub output: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suffix(mut self, suffix: Option<String>) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn with_exclude(mut self, exclude: Option<Vec<String>>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.suffix, ".swift");
        assert_eq!(config.output.path, PathBuf::from("combined_output.txt"));
        assert!(config.scan.exclude_dirs.is_empty());
        assert!(config.scan.max_depth.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.scan.suffix.clear();
        assert!(config.validate().is_err());

        config.scan.suffix = "src/.rs".to_string();
        assert!(config.validate().is_err());

        config.scan.suffix = ".rs".to_string();
        config.scan.max_depth = Some(0);
        assert!(config.validate().is_err());

        config.scan.max_depth = Some(3);
        config.scan.exclude_patterns = vec!["[unclosed".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_directory_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.path = temp_dir.path().to_path_buf();

        assert!(matches!(
            config.validate(),
            Err(CodeTextError::Config { .. })
        ));
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.scan.suffix = ".rs".to_string();
        config.scan.max_depth = Some(4);
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.scan.suffix, ".rs");
        assert_eq!(loaded_config.scan.max_depth, Some(4));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[scan]\nsuffix = \".py\"").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.scan.suffix, ".py");
        assert_eq!(config.output.path, PathBuf::from("combined_output.txt"));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("does/not/exist.toml");
        assert!(matches!(result, Err(CodeTextError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();
        config.scan.exclude_dirs = vec![".git".to_string()];

        let overrides = CliOverrides::new()
            .with_suffix(Some(".rs".to_string()))
            .with_exclude(Some(vec![".git".to_string(), "target".to_string()]))
            .with_max_depth(Some(2))
            .with_output(Some(PathBuf::from("all.txt")));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.scan.suffix, ".rs");
        assert_eq!(config.scan.exclude_dirs, vec![".git", "target"]);
        assert_eq!(config.scan.max_depth, Some(2));
        assert_eq!(config.output.path, PathBuf::from("all.txt"));
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[scan]"));
        assert!(sample.contains("[output]"));
        assert!(sample.contains("suffix = \".swift\""));
    }
}
