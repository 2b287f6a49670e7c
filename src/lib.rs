//! Content-addressed duplicate file detection.
//!
//! [`grouping::scan_for_duplicates`] walks a directory, fingerprints every
//! regular file with [`hasher::hash_file`] and returns the groups of files
//! sharing a fingerprint. [`actions::delete_files`] removes a caller-chosen
//! selection, tolerating per-file failures.

pub mod actions;
pub mod config;
pub mod error;
pub mod grouping;
pub mod hasher;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;
pub mod util;
