//! Command-line interface module

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::formatter::readme::DEFAULT_URL_BASE;
use crate::replication::{
    Destination, MissingSourcePolicy, ReplicationConfig, ReplicationObserver, ReplicationReport,
};
use crate::error::{ReplicationError, ReplicationResult, RuleError};

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "rulesync")]
#[command(about = "Mirror rule-list trees into per-platform rule sets")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Source tree holding the rule lists (default: ios_rule_script/rule/Clash)
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// File name suffix selecting rule lists (default: .list)
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Output tree and extension; repeat to add more (default: Egern=.yaml Singbox=.json)
    #[arg(long = "dest", value_name = "DIR=EXT", value_parser = Destination::parse)]
    pub destinations: Vec<Destination>,

    /// Fail when the source tree does not exist instead of treating it as empty
    #[arg(long)]
    pub strict_source: bool,

    /// Output replication statistics
    #[arg(long)]
    pub stats: bool,

    /// Statistics format
    #[arg(long, value_enum, default_value_t = StatsFormat::Text)]
    pub stats_format: StatsFormat,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output, including --stats
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Convert replicated files in place for a platform
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite rule lists as Egern YAML rule sets
    #[command(alias = "Egern")]
    Egern(ConvertArgs),
    /// Rewrite rule lists as sing-box JSON rule sets
    #[command(alias = "Singbox")]
    Singbox(ConvertArgs),
}

/// Arguments shared by the convert subcommands
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// File or directory to convert in place
    pub path: PathBuf,

    /// Prefix for download links written to readme files
    #[arg(long, default_value = DEFAULT_URL_BASE)]
    pub url_base: String,
}

/// Statistics output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsFormat {
    Text,
    Json,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    /// Set only when no subcommand is given
    pub replication_config: Option<ReplicationConfig>,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ReplicationResult<Self> {
        let replication_config = match args.command {
            None => Some(Self::create_replication_config(&args)?),
            Some(_) => None,
        };

        Ok(Self {
            args,
            replication_config,
        })
    }

    /// Create replication configuration from CLI arguments
    fn create_replication_config(args: &Args) -> ReplicationResult<ReplicationConfig> {
        let mut config = ReplicationConfig::new();

        if let Some(source) = &args.source {
            config = config.with_source_root(source);
        }
        if let Some(suffix) = &args.suffix {
            config = config.with_match_suffix(suffix);
        }
        if !args.destinations.is_empty() {
            config = config.with_destinations(args.destinations.clone());
        }
        if args.strict_source {
            config = config.with_missing_source(MissingSourcePolicy::Error);
        }

        // Validate configuration
        config.validate().map_err(ReplicationError::configuration)?;

        Ok(config)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }

    /// Requested statistics format, if any
    pub fn stats_format(&self) -> Option<StatsFormat> {
        self.args.stats.then_some(self.args.stats_format)
    }
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        let style = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb
    }

    /// Show a plain status line (if not in quiet mode)
    pub fn show_status(message: &str, quiet: bool) {
        if !quiet {
            println!("{}", message);
        }
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", style("✗").red().for_stderr(), message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("{} {}", style("⚠").yellow().for_stderr(), message);
        }
    }

    /// Show a diagnostic line (only in verbose mode)
    pub fn show_verbose(message: &str, verbose: bool) {
        if verbose {
            eprintln!("{} {}", style("·").dim().for_stderr(), message);
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        // Check if stdout is a terminal and supports color
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }

    /// Check if a progress bar can be drawn
    pub fn can_draw_progress() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    /// Render the replication report as text lines
    pub fn report_lines(report: &ReplicationReport) -> Vec<String> {
        let mut lines = vec![
            "Replication Statistics:".to_string(),
            format!("Source: {}", report.source_root.display()),
            format!("Files matched: {}", report.files_matched),
            format!("Files written: {}", report.files_written),
        ];
        for dest in &report.destinations {
            lines.push(format!(
                "  {} ({}): {} files, {}",
                dest.root.display(),
                dest.extension,
                dest.files_written,
                Self::format_file_size(dest.bytes_written)
            ));
        }
        lines.push(format!(
            "Bytes copied: {}",
            Self::format_file_size(report.bytes_copied)
        ));
        lines.push(format!(
            "Processing time: {}",
            Self::format_duration(report.elapsed())
        ));
        lines.push(format!("Completed at: {}", report.completed_at.to_rfc3339()));
        lines
    }
}

/// Reports replication progress on the terminal
pub struct ProgressReporter {
    bar: Option<indicatif::ProgressBar>,
    show_bar: bool,
    verbose: bool,
}

impl ProgressReporter {
    pub fn new(config: &CliConfig) -> Self {
        Self {
            bar: None,
            show_bar: !config.is_quiet() && !config.is_verbose() && CliUtils::can_draw_progress(),
            verbose: config.is_verbose(),
        }
    }

    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl ReplicationObserver for ProgressReporter {
    fn files_found(&mut self, count: usize) {
        CliUtils::show_verbose(&format!("Found {} rule files", count), self.verbose);
        if self.show_bar && count > 0 {
            self.bar = Some(CliUtils::create_progress_bar(count as u64));
        }
    }

    fn file_replicated(&mut self, relative: &Path) {
        CliUtils::show_verbose(&format!("Replicated {}", relative.display()), self.verbose);
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &anyhow::Error) {
    let message = if let Some(err) = error.downcast_ref::<ReplicationError>() {
        err.user_message()
    } else if let Some(err) = error.downcast_ref::<RuleError>() {
        err.to_string()
    } else {
        error.to_string()
    };
    CliUtils::show_error(&message);

    if let Some(ReplicationError::Configuration { .. }) = error.downcast_ref::<ReplicationError>() {
        eprintln!("\nTry 'rulesync --help' for usage information.");
    }
}
