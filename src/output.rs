use colored::Colorize;
use serde::Serialize;

use crate::actions::DeletionSummary;
use crate::grouping::{DuplicateGroup, ScanResult};
use crate::util::{format_bytes, format_number};

/// Statistics about duplicate files found
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateStats {
    /// Total number of files scanned
    pub total_files: usize,
    /// Files skipped because they could not be read
    pub unreadable_files: usize,
    pub duplicate_groups: usize,
    /// Total number of files that are duplicates
    pub duplicate_files: usize,
    /// Total wasted space in bytes (could be reclaimed)
    pub wasted_bytes: u64,
}

/// Complete report of duplicate findings
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport {
    pub stats: DuplicateStats,
    pub groups: Vec<DuplicateGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion: Option<DeletionSummary>,
}

impl DuplicateReport {
    /// Build a report from a finished scan
    pub fn from_scan(result: ScanResult) -> Self {
        let total_files = result.total_files();
        let unreadable_files = result.unreadable();
        let groups = result.into_groups();

        let mut wasted_bytes: u64 = 0;
        let mut duplicate_files: usize = 0;

        for group in &groups {
            let file_count = group.files.len();
            duplicate_files += file_count;

            // Wasted space = size * (count - 1), since we keep one copy
            wasted_bytes += group.size * file_count.saturating_sub(1) as u64;
        }

        let stats = DuplicateStats {
            total_files,
            unreadable_files,
            duplicate_groups: groups.len(),
            duplicate_files,
            wasted_bytes,
        };

        Self {
            stats,
            groups,
            deletion: None,
        }
    }

    pub fn with_deletion(mut self, summary: DeletionSummary) -> Self {
        self.deletion = Some(summary);
        self
    }

    /// Output as human-readable colored text
    pub fn print_human(&self, verbose: bool) {
        println!("\n{}", "Duplicate Report".bold().underline());
        println!(
            "  Scanned: {} files",
            format_number(self.stats.total_files).cyan()
        );
        if self.stats.unreadable_files > 0 {
            println!(
                "  Unreadable: {} files",
                format_number(self.stats.unreadable_files).red()
            );
        }
        println!(
            "  Duplicate groups: {}",
            format_number(self.stats.duplicate_groups).cyan()
        );
        println!(
            "  Duplicate files: {}",
            format_number(self.stats.duplicate_files).cyan()
        );
        println!(
            "  Wasted space: {}",
            format_bytes(self.stats.wasted_bytes).yellow()
        );

        if self.groups.is_empty() {
            println!("\n{}", "No duplicates found.".green());
        } else if verbose {
            for (i, group) in self.groups.iter().enumerate() {
                println!(
                    "\n{} {} ({} each) {}",
                    format!("Group {}:", format_number(i + 1)).bold(),
                    format!("{} files", format_number(group.files.len())).cyan(),
                    format_bytes(group.size).yellow(),
                    group.fingerprint.to_string().dimmed()
                );

                for path in &group.files {
                    println!("  {}", path.display());
                }
            }
        }

        if let Some(deletion) = &self.deletion {
            if deletion.dry_run {
                println!(
                    "\n{} {} files would be deleted",
                    "[dry-run]".yellow(),
                    format_number(deletion.selected.len())
                );
            } else {
                println!(
                    "\nDeleted {} of {} files",
                    format_number(deletion.deleted).green(),
                    format_number(deletion.selected.len())
                );
            }
        }
    }

    /// Output as JSON
    pub fn print_json(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing to JSON: {}", e),
        }
    }
}
