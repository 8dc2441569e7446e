//! # CLI Module
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! # Downloads -> Pictures
//! photo-organize
//!
//! # Custom folders
//! photo-organize --source ~/Desktop/dump --destination /mnt/photos
//!
//! # JSON summary for scripting
//! photo-organize --output json
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_organizer::core::collision::DEFAULT_MAX_ATTEMPTS;
use photo_organizer::core::{OrganizeConfig, RunStats, ScanConfig};
use photo_organizer::error::{OrganizerError, Result};
use photo_organizer::events::{Event, EventChannel, EventReceiver, Severity};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Photo Organizer - Sort photos into year/month folders
#[derive(Parser, Debug)]
#[command(name = "photo-organize")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder to collect photos from [default: your Downloads folder]
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Folder to sort photos into [default: your Pictures folder]
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Log file [default: photo_organizer.log next to the program]
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Give up renaming a clashing file after this many `_n` attempts (0 = never give up)
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_collision_attempts: u32,

    /// Treat files and folders whose names start with a dot as candidates (default)
    #[arg(long, overrides_with = "skip_hidden")]
    include_hidden: bool,

    /// Skip files and folders whose names start with a dot
    #[arg(long, overrides_with = "include_hidden")]
    skip_hidden: bool,

    /// Follow symbolic links while walking the source
    #[arg(long)]
    follow_symlinks: bool,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON summary for scripting
    Json,
}

impl Cli {
    /// Fill in defaults for anything not given on the command line
    fn into_config(self) -> OrganizeConfig {
        let defaults = OrganizeConfig::default();
        OrganizeConfig {
            source: self.source.unwrap_or(defaults.source),
            destination: self.destination.unwrap_or(defaults.destination),
            log_file: self.log_file.unwrap_or(defaults.log_file),
            max_collision_attempts: match self.max_collision_attempts {
                0 => None,
                n => Some(n),
            },
            scan: ScanConfig {
                follow_symlinks: self.follow_symlinks,
                include_hidden: self.include_hidden || !self.skip_hidden,
                max_depth: None,
            },
        }
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = cli.output;
    let config = cli.into_config();
    let term = Term::stderr();

    // Dropping the guard flushes the log, so it lives until run() returns
    let _log_guard = match photo_organizer::init_logging(&config.log_file) {
        Ok(guard) => Some(guard),
        Err(e) => {
            term.write_line(&format!("{} {}", style("Warning:").yellow().bold(), e)).ok();
            None
        }
    };

    let request = config
        .request()
        .map_err(|e| OrganizerError::Config(format!("cannot resolve paths: {}", e)))?;

    let (sender, receiver) = EventChannel::new();
    let organizer = config.organizer(sender);

    let presenter = thread::spawn(move || present(receiver, output));

    let result = organizer.organize(&request);

    // Drop the organizer (and its sender) so the presenter sees the end of the stream
    drop(organizer);
    presenter.join().ok();

    match result {
        Ok(stats) => {
            if matches!(output, OutputFormat::Json) {
                print_json_results(&stats);
            }
        }
        Err(e) => {
            // The diagnostic was already rendered from the event stream
            tracing::debug!("run aborted: {}", e);
            if matches!(output, OutputFormat::Json) {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            }
        }
    }

    Ok(())
}

fn present(receiver: EventReceiver, output: OutputFormat) {
    if matches!(output, OutputFormat::Json) {
        // Drain so the sender never blocks on a full channel
        for _ in receiver.iter() {}
        return;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));

    for event in receiver.iter() {
        if let Event::Completed { stats } = &event {
            spinner.finish_and_clear();
            print_summary(&Term::stderr(), stats);
            continue;
        }
        if let Event::Started { .. } = &event {
            spinner.set_message("Organizing...");
        }
        spinner.println(render(&event));
    }

    spinner.finish_and_clear();
}

fn render(event: &Event) -> String {
    let message = event.message();
    match event.severity() {
        Severity::Header => style(message).bold().cyan().to_string(),
        Severity::Success => format!("{} {}", style("✓").green().bold(), message),
        Severity::Warning => format!("{} {}", style("!").yellow().bold(), style(message).yellow()),
        Severity::Error => format!("{} {}", style("✗").red().bold(), style(message).red()),
    }
}

fn print_summary(term: &Term, stats: &RunStats) {
    term.write_line("").ok();
    term.write_line(&format!(
        "{} Organizing Complete",
        style("✓").green().bold()
    ))
    .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} files processed in {:.1}s",
        style(stats.total_processed).cyan(),
        stats.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!(
        "  {} duplicates found",
        style(stats.duplicates_found).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} copied, {} renamed",
        style(stats.copied).green(),
        style(stats.renamed).green()
    ))
    .ok();

    if stats.no_date > 0 {
        term.write_line(&format!(
            "  {} left in place without a date",
            style(stats.no_date).yellow()
        ))
        .ok();
    }
    if stats.failed > 0 {
        term.write_line(&format!(
            "  {} failed (see log)",
            style(stats.failed).red()
        ))
        .ok();
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "{}",
        style("Originals were copied, not moved. Nothing was deleted.").dim()
    ))
    .ok();
}

fn print_json_results(stats: &RunStats) {
    match serde_json::to_string_pretty(stats) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize results: {}", e),
    }
}
