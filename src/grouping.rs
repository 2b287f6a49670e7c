use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::ScanError;
use crate::hasher::{self, DEFAULT_BLOCK_SIZE, Fingerprint, HashAlgorithm};
use crate::scanner::{self, FileEntry, WalkOptions};
use crate::signal::CancelToken;

/// Progress callback: `(files completed, total files)`
pub type ProgressFn<'a> = &'a mut dyn FnMut(usize, usize);

/// Everything that controls one scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub walk: WalkOptions,
    pub algorithm: HashAlgorithm,
    /// Read size used while hashing; does not affect fingerprints
    pub block_size: usize,
    /// Confirm every fingerprint match with a byte-for-byte comparison
    pub verify: bool,
    pub cancel: CancelToken,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            walk: WalkOptions::default(),
            algorithm: HashAlgorithm::default(),
            block_size: DEFAULT_BLOCK_SIZE,
            verify: false,
            cancel: CancelToken::new(),
        }
    }
}

/// Files whose contents hashed to the same fingerprint. Always 2+ files.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    pub fingerprint: Fingerprint,
    /// Size of each file in this group
    pub size: u64,
    /// Paths in enumeration order
    pub files: Vec<PathBuf>,
}

/// Outcome of one scan.
///
/// Groups are ordered by where their first member appeared during the walk.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    groups: Vec<DuplicateGroup>,
    total_files: usize,
    unreadable: usize,
}

impl ScanResult {
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&DuplicateGroup> {
        self.groups.iter().find(|g| &g.fingerprint == fingerprint)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter()
    }

    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<DuplicateGroup> {
        self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of files enumerated by the walk
    pub fn total_files(&self) -> usize {
        self.total_files
    }

    /// Files that could not be read and were left out of every group
    pub fn unreadable(&self) -> usize {
        self.unreadable
    }
}

/// Walk `root` and group its files by content.
pub fn scan_for_duplicates(
    root: &Path,
    options: &ScanOptions,
    on_progress: Option<ProgressFn<'_>>,
) -> Result<ScanResult, ScanError> {
    let files = scanner::scan_directory(root, &options.walk)?;
    info!(
        "Scanning {} files for duplicates in {}",
        files.len(),
        root.display()
    );
    find_duplicates(files, options, on_progress)
}

/// Hash every file in order and keep the fingerprints shared by 2+ files.
///
/// The progress callback runs exactly once per file, including files that
/// fail to hash. Unreadable files are logged and skipped.
pub fn find_duplicates(
    files: Vec<FileEntry>,
    options: &ScanOptions,
    mut on_progress: Option<ProgressFn<'_>>,
) -> Result<ScanResult, ScanError> {
    let total = files.len();
    if total == 0 {
        return Ok(ScanResult::default());
    }

    // Insertion-ordered fingerprint -> paths map
    let mut slots: HashMap<Fingerprint, usize> = HashMap::new();
    let mut buckets: Vec<DuplicateGroup> = Vec::new();
    let mut unreadable = 0;

    for (i, entry) in files.into_iter().enumerate() {
        if options.cancel.is_cancelled() {
            warn!("Scan cancelled after {i} of {total} files");
            return Err(ScanError::Interrupted {
                completed: i,
                total,
            });
        }

        match hasher::hash_file(&entry.path, options.block_size, options.algorithm) {
            Ok(fingerprint) => match slots.entry(fingerprint) {
                Entry::Occupied(slot) => buckets[*slot.get()].files.push(entry.path),
                Entry::Vacant(slot) => {
                    slot.insert(buckets.len());
                    buckets.push(DuplicateGroup {
                        fingerprint,
                        size: entry.size,
                        files: vec![entry.path],
                    });
                }
            },
            Err(e) => {
                warn!(path = %e.path().display(), "Skipping file that could not be hashed: {e}");
                unreadable += 1;
            }
        }

        if let Some(report) = on_progress.as_deref_mut() {
            report(i + 1, total);
        }
    }

    let mut groups: Vec<DuplicateGroup> = buckets
        .into_iter()
        .filter(|g| g.files.len() >= 2)
        .collect();

    if options.verify {
        let (verified, dropped) = verify_groups(groups, options.block_size);
        groups = verified;
        unreadable += dropped;
    }

    info!(
        "Duplicate scan complete: {} groups from {} files ({} unreadable)",
        groups.len(),
        total,
        unreadable
    );

    Ok(ScanResult {
        groups,
        total_files: total,
        unreadable,
    })
}

/// Split every group into classes of byte-identical files.
///
/// The first file of each class is its representative. A file that can no
/// longer be opened is dropped; when that file is a representative, the next
/// member of its class takes over.
///
/// Returns the surviving groups and the number of files that became
/// unreadable during comparison.
fn verify_groups(groups: Vec<DuplicateGroup>, block_size: usize) -> (Vec<DuplicateGroup>, usize) {
    let mut verified = Vec::with_capacity(groups.len());
    let mut dropped = 0;

    for group in groups {
        let mut classes: Vec<Vec<PathBuf>> = Vec::new();

        'files: for path in group.files {
            if let Err(e) = File::open(&path) {
                warn!("Dropping {} from verification: {e}", path.display());
                dropped += 1;
                continue;
            }

            let mut i = 0;
            while i < classes.len() {
                match hasher::contents_equal(&classes[i][0], &path, block_size) {
                    Ok(true) => {
                        classes[i].push(path);
                        continue 'files;
                    }
                    Ok(false) => i += 1,
                    Err(e) => {
                        let representative = &classes[i][0];
                        if File::open(representative).is_ok() {
                            warn!("Dropping {} from verification: {e}", path.display());
                            dropped += 1;
                            continue 'files;
                        }
                        warn!(
                            "Dropping {} from verification: {e}",
                            representative.display()
                        );
                        dropped += 1;
                        classes[i].remove(0);
                        if classes[i].is_empty() {
                            classes.remove(i);
                        }
                    }
                }
            }
            classes.push(vec![path]);
        }

        if classes.len() > 1 {
            warn!(
                "Fingerprint collision: {} split into {} distinct contents",
                group.fingerprint,
                classes.len()
            );
        }

        verified.extend(
            classes
                .into_iter()
                .filter(|files| files.len() >= 2)
                .map(|files| DuplicateGroup {
                    fingerprint: group.fingerprint,
                    size: group.size,
                    files,
                }),
        );
    }

    (verified, dropped)
}
