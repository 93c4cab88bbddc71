use crate::config::ScanConfig;
use crate::error::Result;
use regex::Regex;
use std::path::Path;

pub struct FileFilter {
    suffix: String,
    exclude_dirs: Vec<String>,
    exclude_patterns: Vec<Regex>,
}

impl FileFilter {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            suffix: config.suffix.clone(),
            exclude_dirs: config.exclude_dirs.clone(),
            exclude_patterns,
        })
    }

    /// Exact, case-sensitive suffix test on a bare file name.
    pub fn matches_name(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix)
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.matches_name(&name.to_string_lossy()))
            .unwrap_or(false)
    }

    /// `path` is relative to the scan root, so patterns never see the
    /// root's own ancestors.
    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        if let Some(dir_name) = path.file_name().and_then(|s| s.to_str()) {
            if self.exclude_dirs.iter().any(|exclude| exclude == dir_name) {
                return false;
            }
        }

        let path_str = path.to_string_lossy();
        !self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.is_match(&path_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> ScanConfig {
        ScanConfig {
            suffix: ".swift".to_string(),
            exclude_dirs: vec!["Pods".to_string(), ".build".to_string()],
            exclude_patterns: vec![r"DerivedData".to_string()],
            max_depth: None,
        }
    }

    #[test]
    fn test_suffix_matching() {
        let filter = FileFilter::new(&create_test_config()).unwrap();

        assert!(filter.matches(Path::new("Board.swift")));
        assert!(filter.matches(Path::new("AR-TicTacToe/GameState.swift")));
        assert!(filter.matches(Path::new(".swift")));

        assert!(!filter.matches(Path::new("getcodetext.py")));
        assert!(!filter.matches(Path::new("Board.swift.orig")));
        assert!(!filter.matches(Path::new("swift")));
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        let filter = FileFilter::new(&create_test_config()).unwrap();

        assert!(!filter.matches(Path::new("Board.SWIFT")));
        assert!(!filter.matches(Path::new("Board.Swift")));
    }

    #[test]
    fn test_suffix_is_plain_string_not_extension() {
        let mut config = create_test_config();
        config.suffix = "_test.rs".to_string();
        let filter = FileFilter::new(&config).unwrap();

        assert!(filter.matches_name("parser_test.rs"));
        assert!(!filter.matches_name("parser.rs"));
    }

    #[test]
    fn test_directory_traversal_rules() {
        let filter = FileFilter::new(&create_test_config()).unwrap();

        assert!(filter.should_traverse_directory(Path::new("Sources")));
        assert!(filter.should_traverse_directory(Path::new(".git")));

        assert!(!filter.should_traverse_directory(Path::new("Pods")));
        assert!(!filter.should_traverse_directory(Path::new("app/.build")));
        assert!(!filter.should_traverse_directory(Path::new("build/DerivedData/x")));

        // Exclusion by name is exact
        assert!(filter.should_traverse_directory(Path::new("pods")));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let mut config = create_test_config();
        config.exclude_patterns = vec!["(".to_string()];
        assert!(FileFilter::new(&config).is_err());
    }
}
