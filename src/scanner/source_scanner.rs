use crate::config::ScanConfig;
use crate::error::{CodeTextError, Result};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
    /// Distance from the root; files directly under the root are at depth 1.
    pub depth: usize,
}

impl SourceFile {
    pub fn new(path: PathBuf, depth: usize) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path,
            file_name,
            depth,
        }
    }
}

/// Walks a directory tree top-down.
///
/// Each directory's files are visited in listing order before any of its
/// subdirectories, and subdirectories are descended in listing order. The
/// traversal keeps its own stack of pending directories, so tree depth is not
/// bounded by the call stack. Symlinked directories are never descended.
pub struct SourceScanner {
    filter: FileFilter,
    max_depth: Option<usize>,
    skip_path: Option<PathBuf>,
}

impl SourceScanner {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        Ok(Self {
            filter: FileFilter::new(config)?,
            max_depth: config.max_depth,
            skip_path: None,
        })
    }

    /// Never report `path` as a match, even when it lies in the tree and
    /// carries the suffix. Used for the output file.
    pub fn with_skip_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.skip_path = canonical_target(path.as_ref());
        self
    }

    pub fn scan<P, F>(&self, root: P, mut visit: F) -> Result<usize>
    where
        P: AsRef<Path>,
        F: FnMut(SourceFile) -> Result<()>,
    {
        let root_path = root.as_ref();
        validate_root(root_path)?;

        let mut matched = 0;
        let mut pending: Vec<(PathBuf, usize)> = vec![(root_path.to_path_buf(), 0)];

        while let Some((dir, depth)) = pending.pop() {
            trace!(dir = %dir.display(), depth, "entering directory");

            let mut subdirs = Vec::new();
            let listing = WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(false);

            for entry in listing {
                let entry = entry.map_err(|source| CodeTextError::Walk {
                    path: dir.display().to_string(),
                    source,
                })?;

                let file_type = entry.file_type();
                let is_dir = file_type.is_dir()
                    || (file_type.is_symlink() && entry.path().is_dir());

                if is_dir {
                    if file_type.is_dir() && self.may_descend(depth) {
                        subdirs.push(entry.into_path());
                    }
                    continue;
                }

                if !self.filter.matches(entry.path()) || self.is_skipped(entry.path()) {
                    continue;
                }

                let file = SourceFile::new(entry.into_path(), depth + 1);
                debug!(path = %file.path.display(), "matched source file");
                matched += 1;
                visit(file)?;
            }

            for subdir in subdirs.into_iter().rev() {
                let relative = subdir.strip_prefix(root_path).unwrap_or(&subdir);
                if self.filter.should_traverse_directory(relative) {
                    pending.push((subdir, depth + 1));
                } else {
                    debug!(dir = %subdir.display(), "skipping excluded directory");
                }
            }
        }

        Ok(matched)
    }

    pub fn collect<P: AsRef<Path>>(&self, root: P) -> Result<Vec<SourceFile>> {
        let mut files = Vec::new();
        self.scan(root, |file| {
            files.push(file);
            Ok(())
        })?;
        Ok(files)
    }

    // A subdirectory at depth + 1 holds files at depth + 2.
    fn may_descend(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth + 2 <= max)
    }

    fn is_skipped(&self, path: &Path) -> bool {
        let Some(ref skip) = self.skip_path else {
            return false;
        };

        // A symlink to the output carries a different name than its target.
        path.canonicalize().map(|p| &p == skip).unwrap_or(false)
    }
}

fn validate_root(root_path: &Path) -> Result<()> {
    if !root_path.exists() {
        return Err(CodeTextError::InvalidPath {
            path: format!("{} does not exist", root_path.display()),
        });
    }

    if !root_path.is_dir() {
        return Err(CodeTextError::InvalidPath {
            path: format!("{} is not a directory", root_path.display()),
        });
    }

    Ok(())
}

// The target may not exist yet; resolve its parent and re-attach the name.
fn canonical_target(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = path.canonicalize() {
        return Some(resolved);
    }

    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    parent.canonicalize().ok().map(|p| p.join(file_name))
}
