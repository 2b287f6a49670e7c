use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::grouping::{DuplicateGroup, ScanResult};

/// Which member of a duplicate group survives deletion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeepPolicy {
    /// The first file found during the walk
    #[default]
    First,
    /// The file with the shortest path
    ShortestPath,
}

/// Result of a delete action
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeletionSummary {
    /// Files chosen for removal
    pub selected: Vec<PathBuf>,
    /// Number of files actually removed
    pub deleted: usize,
    pub dry_run: bool,
}

/// Select which file to keep as the "original" in a duplicate group.
fn select_original(files: &[PathBuf], policy: KeepPolicy) -> Option<&PathBuf> {
    match policy {
        KeepPolicy::First => files.first(),
        KeepPolicy::ShortestPath => files.iter().min_by_key(|p| p.as_os_str().len()),
    }
}

/// Every member of every group except the one kept by `policy`.
pub fn select_victims(groups: &[DuplicateGroup], policy: KeepPolicy) -> Vec<PathBuf> {
    let mut victims = Vec::new();

    for group in groups {
        let Some(original) = select_original(&group.files, policy) else {
            continue;
        };
        victims.extend(group.files.iter().filter(|p| *p != original).cloned());
    }

    victims
}

/// Remove each path, carrying on past individual failures.
///
/// Returns how many files were removed. A path that no longer exists is
/// logged as a warning and counts as neither success nor failure. Existence
/// follows symlinks, so a dangling link is treated as missing and left alone.
pub fn delete_files<P: AsRef<Path>>(paths: &[P]) -> usize {
    let mut deleted = 0;

    for path in paths {
        let path = path.as_ref();

        if !path.exists() {
            warn!("Attempted to delete missing file: {}", path.display());
            continue;
        }

        match fs::remove_file(path) {
            Ok(()) => {
                info!("Deleted {}", path.display());
                deleted += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Attempted to delete missing file: {}", path.display());
            }
            Err(e) => {
                error!("Failed to delete {}: {e}", path.display());
            }
        }
    }

    deleted
}

/// Delete all but one file of every group.
///
/// If `dry_run` is true, only prints what would happen without modifying files.
pub fn delete_duplicates(
    result: &ScanResult,
    policy: KeepPolicy,
    dry_run: bool,
    print_verbose_logs: bool,
) -> DeletionSummary {
    let selected = select_victims(result.groups(), policy);

    if print_verbose_logs {
        let tag = if dry_run {
            "[dry-run]".yellow()
        } else {
            "[delete]".red()
        };
        for path in &selected {
            println!("{} {}", tag, path.display());
        }
    }

    let deleted = if dry_run {
        0
    } else {
        delete_files(&selected)
    };

    if !dry_run && deleted < selected.len() {
        warn!(
            "Deleted {} of {} selected files; see log for failures",
            deleted,
            selected.len()
        );
    }

    DeletionSummary {
        selected,
        deleted,
        dry_run,
    }
}
