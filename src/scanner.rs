use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use jwalk::WalkDir;
use tracing::{debug, warn};

use crate::error::ScanError;

/// Information about a file found during scanning
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Glob patterns for paths that should never be scanned.
///
/// A pattern excludes a file when it matches the path relative to the scan
/// root or any single component of it, so a bare directory name prunes the
/// whole subtree.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    set: Option<GlobSet>,
}

impl Exclusions {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, globset::Error> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern.as_ref())?);
        }
        Ok(Self {
            set: Some(builder.build()?),
        })
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        let Some(set) = &self.set else {
            return false;
        };

        set.is_match(relative) || relative.components().any(|c| set.is_match(c.as_os_str()))
    }
}

/// Filters applied while walking
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Skip files smaller than this many bytes
    pub min_size: Option<u64>,
    /// Skip files larger than this many bytes
    pub max_size: Option<u64>,
    pub exclude: Exclusions,
}

/// Read exclude patterns from a file: one per line, `#` starts a comment line.
pub fn read_exclude_file(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Fail unless `root` exists and is a directory.
pub fn validate_root(root: &Path) -> Result<(), ScanError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::InvalidInput {
            path: root.to_path_buf(),
            reason: "not a directory",
        }),
        Err(_) => Err(ScanError::InvalidInput {
            path: root.to_path_buf(),
            reason: "does not exist",
        }),
    }
}

/// Scan a directory and return all regular files with their sizes.
///
/// Entries are yielded depth-first with siblings sorted by name, so the same
/// tree always produces the same order. Symlinks are not followed: a link to
/// a file is not reported and a link to a directory is not descended.
pub fn scan_directory(root: &Path, options: &WalkOptions) -> Result<Vec<FileEntry>, ScanError> {
    validate_root(root)?;

    let min = options.min_size.unwrap_or(0);
    let max = options.max_size.unwrap_or(u64::MAX);

    let files: Vec<FileEntry> = WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .into_iter()
        .filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable directory entry: {e}");
                    return None;
                }
            };
            let metadata = entry.metadata().ok()?;

            if !metadata.is_file() {
                return None;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(&path);
            if options.exclude.is_excluded(relative) {
                return None;
            }

            let size = metadata.len();
            if size < min || size > max {
                return None;
            }

            Some(FileEntry { path, size })
        })
        .collect();

    debug!("Enumerated {} files under {}", files.len(), root.display());
    Ok(files)
}
