use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::info;

use dupescan::actions::{self, KeepPolicy};
use dupescan::config::Config;
use dupescan::error::ScanError;
use dupescan::grouping::{self, ScanOptions, ScanResult};
use dupescan::hasher::{DEFAULT_BLOCK_SIZE, HashAlgorithm};
use dupescan::logging;
use dupescan::output::DuplicateReport;
use dupescan::progress::ScanProgress;
use dupescan::scanner::{self, Exclusions, WalkOptions};
use dupescan::signal;

/// Exit code for fatal errors (bad root, config or exclude file)
const EXIT_CODE_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "dupescan")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory to scan for duplicates
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Action to take on duplicates
    #[arg(short, long, value_enum, default_value_t = Action::Report)]
    action: Action,

    /// Which file of each group survives `--action delete`
    #[arg(long, value_enum)]
    keep: Option<KeepPolicy>,

    /// Preview changes without actually modifying files
    #[arg(long)]
    dry_run: bool,

    /// Minimum file size in bytes to consider (smaller files are skipped)
    #[arg(short = 's', long)]
    min_size: Option<u64>,

    /// Maximum file size in bytes to consider (larger files are skipped)
    #[arg(long)]
    max_size: Option<u64>,

    /// Glob pattern for paths to skip (repeatable)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// File with one exclude pattern per line
    #[arg(long)]
    exclude_file: Option<PathBuf>,

    /// Content digest used for fingerprints
    #[arg(long, value_enum)]
    algorithm: Option<HashAlgorithm>,

    /// Read size in bytes while hashing
    #[arg(long, value_parser = parse_block_size)]
    block_size: Option<usize>,

    /// Confirm fingerprint matches with a byte-for-byte comparison
    #[arg(long)]
    verify: bool,

    /// List every file of every group
    #[arg(short, long)]
    verbose: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    no_progress: bool,

    /// TOML config file
    #[arg(long, env = "DUPESCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Append log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter for stderr, e.g. `info` or `dupescan=debug`
    #[arg(long, env = "DUPESCAN_LOG")]
    log_level: Option<String>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
    /// No output
    Quiet,
}

/// What to do with found duplicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Just report duplicates (default, no file changes)
    Report,
    /// Report, and exit with code 1 if duplicates were found
    ReportExitCode,
    /// Delete all but one file of every group
    Delete,
}

fn parse_block_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("block size must be greater than zero".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// CLI flags merged over the config file
#[derive(Debug)]
struct Settings {
    scan: ScanOptions,
    keep: KeepPolicy,
    log_file: Option<PathBuf>,
    log_level: String,
}

impl Settings {
    fn resolve(cli: &Cli, config: Config) -> Result<Self> {
        let mut patterns = config.exclude;
        if let Some(path) = &cli.exclude_file {
            let from_file = scanner::read_exclude_file(path)
                .with_context(|| format!("failed to read exclude file {}", path.display()))?;
            patterns.extend(from_file);
        }
        patterns.extend(cli.exclude.iter().cloned());

        let exclude = Exclusions::new(&patterns).context("invalid exclude pattern")?;

        let scan = ScanOptions {
            walk: WalkOptions {
                min_size: cli.min_size.or(config.min_size),
                max_size: cli.max_size.or(config.max_size),
                exclude,
            },
            algorithm: cli.algorithm.or(config.algorithm).unwrap_or_default(),
            block_size: cli
                .block_size
                .or(config.block_size)
                .unwrap_or(DEFAULT_BLOCK_SIZE),
            verify: cli.verify || config.verify.unwrap_or(false),
            ..ScanOptions::default()
        };

        Ok(Self {
            scan,
            keep: cli.keep.or(config.keep).unwrap_or_default(),
            log_file: cli.log_file.clone().or(config.log_file),
            log_level: cli
                .log_level
                .clone()
                .or(config.log_level)
                .unwrap_or_else(|| logging::DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            match e.downcast_ref::<ScanError>() {
                Some(ScanError::Interrupted { .. }) => {
                    ExitCode::from(signal::EXIT_CODE_INTERRUPTED as u8)
                }
                _ => ExitCode::from(EXIT_CODE_ERROR),
            }
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;
    let mut settings = Settings::resolve(&cli, config)?;

    let _log_guard = logging::init_logging(&settings.log_level, settings.log_file.as_deref())?;
    settings.scan.cancel = signal::install_handler();

    let show_progress = !cli.no_progress && cli.format == OutputFormat::Human;
    let result = scan_with_progress(&cli.path, &settings.scan, show_progress)?;
    let has_duplicates = !result.is_empty();

    let deletion = match cli.action {
        Action::Delete => {
            let summary = actions::delete_duplicates(
                &result,
                settings.keep,
                cli.dry_run,
                cli.verbose && cli.format == OutputFormat::Human,
            );
            info!(
                "Delete action finished: {} of {} selected files removed",
                summary.deleted,
                summary.selected.len()
            );
            Some(summary)
        }
        Action::Report | Action::ReportExitCode => None,
    };

    let mut report = DuplicateReport::from_scan(result);
    if let Some(summary) = deletion {
        report = report.with_deletion(summary);
    }

    match cli.format {
        OutputFormat::Human => report.print_human(cli.verbose),
        OutputFormat::Json => report.print_json(),
        OutputFormat::Quiet => {}
    }

    if cli.action == Action::ReportExitCode && has_duplicates {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn scan_with_progress(
    root: &Path,
    options: &ScanOptions,
    show_progress: bool,
) -> Result<ScanResult> {
    let progress = ScanProgress::new(show_progress);
    let mut on_progress = |done: usize, total: usize| progress.update(done, total);

    let result = grouping::scan_for_duplicates(root, options, Some(&mut on_progress));
    progress.finish();

    Ok(result?)
}
