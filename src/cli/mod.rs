//! # CLI Module
//!
//! Command-line interface for the image scanner.
//!
//! ## Usage
//! ```bash
//! # Inspect a single photo
//! image-scan inspect photo.jpg
//!
//! # Inspect a folder, JSON output
//! image-scan inspect ~/Pictures --output json
//!
//! # Skip the slow model calls
//! image-scan inspect photo.jpg --no-text --no-caption
//!
//! # Show the effective configuration
//! image-scan config
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use image_scanner::config::ScannerConfig;
use image_scanner::core::geo::format_degrees;
use image_scanner::core::inspector::{BatchReport, ImageReport, Inspector};
use image_scanner::core::metadata::LocationStatus;
use image_scanner::core::scanner::{ImageDiscovery, WalkDirScanner};
use image_scanner::error::{ImageScanError, Result};
use image_scanner::events::{Event, EventChannel, InspectEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::thread;

/// Image Scanner - text, captions, metadata, location and provenance
#[derive(Parser, Debug)]
#[command(name = "image-scan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect image files or folders of images
    Inspect {
        /// Image files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip text recognition
        #[arg(long)]
        no_text: bool,

        /// Skip caption generation
        #[arg(long)]
        no_caption: bool,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the effective configuration as JSON
    Config {
        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// One line per image: path and verdict
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            paths,
            output,
            config,
            no_text,
            no_caption,
            include_hidden,
            verbose,
        } => {
            image_scanner::init_tracing(verbose);

            let mut config = ScannerConfig::resolve(config.as_deref())?;
            if no_text {
                config.text_recognition = None;
            }
            if no_caption {
                config.captioning = None;
            }
            config.scan.include_hidden |= include_hidden;

            run_inspect(paths, &config, output)
        }
        Commands::Config { config } => {
            let config = ScannerConfig::resolve(config.as_deref())?;
            println!("{}", to_json(&config)?);
            Ok(())
        }
    }
}

fn run_inspect(paths: Vec<PathBuf>, config: &ScannerConfig, output: OutputFormat) -> Result<()> {
    let term = Term::stderr();

    let scan = WalkDirScanner::new(config.scan.clone()).scan(&paths);
    for error in &scan.errors {
        term.write_line(&format!("{} {}", style("!").yellow().bold(), error))
            .ok();
    }

    let images: Vec<PathBuf> = scan.images.into_iter().map(|i| i.path).collect();
    let inspector = Inspector::from_config(config);

    // A single image propagates its error so the exit code reflects it
    let batch = if images.len() == 1 {
        BatchReport {
            reports: vec![inspector.inspect(&images[0])?],
            failures: Vec::new(),
        }
    } else {
        inspect_with_progress(&inspector, &images, output)
    };

    match output {
        OutputFormat::Pretty => print_pretty_results(&Term::stdout(), &batch),
        OutputFormat::Json => println!("{}", to_json(&batch)?),
        OutputFormat::Minimal => print_minimal_results(&batch),
    }

    Ok(())
}

fn inspect_with_progress(inspector: &Inspector, images: &[PathBuf], output: OutputFormat) -> BatchReport {
    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(output, OutputFormat::Pretty) && images.len() > 1 {
        let pb = ProgressBar::new(images.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Inspect(InspectEvent::StageChanged { path, stage }) => {
                    pb.set_message(format!(
                        "{}: {}",
                        path.file_name().unwrap_or_default().to_string_lossy(),
                        stage
                    ));
                }
                Event::Inspect(InspectEvent::ImageCompleted { .. })
                | Event::Inspect(InspectEvent::ImageFailed { .. }) => pb.inc(1),
                Event::Inspect(InspectEvent::Completed { .. }) => pb.finish_and_clear(),
                _ => {}
            }
        }
    });

    let batch = inspector.inspect_all_with_events(images, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    batch
}

fn print_pretty_results(term: &Term, batch: &BatchReport) {
    for report in &batch.reports {
        print_pretty_report(term, report);
    }

    for failure in &batch.failures {
        term.write_line(&format!(
            "{} {}: {}",
            style("✗").red().bold(),
            failure.path.display(),
            failure.message
        ))
        .ok();
    }

    if batch.reports.is_empty() && batch.failures.is_empty() {
        term.write_line(&format!("{}", style("No images found.").dim()))
            .ok();
    }
}

fn print_pretty_report(term: &Term, report: &ImageReport) {
    term.write_line(&format!("{}", style(report.path.display()).bold().cyan()))
        .ok();
    term.write_line("").ok();

    if let Some(ref text) = report.text {
        term.write_line(&format!("{}", style("📝 Extracted Text:").bold())).ok();
        term.write_line(text).ok();
        term.write_line("").ok();
    }

    if let Some(ref description) = report.description {
        term.write_line(&format!("{}", style("📸 Image Description:").bold())).ok();
        term.write_line(description).ok();
        term.write_line("").ok();
    }

    term.write_line(&format!("{}", style("📂 Metadata:").bold())).ok();
    for (key, value) in report.metadata.display_map().iter() {
        term.write_line(&format!("{}: {}", key, value)).ok();
    }

    if let LocationStatus::Found(ref location) = report.metadata.location {
        term.write_line("").ok();
        term.write_line(&format!("{}", style("📍 Location Info:").bold())).ok();
        term.write_line(&format!("Latitude: {}", format_degrees(location.latitude))).ok();
        term.write_line(&format!("Longitude: {}", format_degrees(location.longitude))).ok();
        term.write_line(&format!("Google Maps: {}", style(&location.maps_url).underlined()))
            .ok();
    }

    let verdict = if report.is_likely_synthetic() {
        style(report.authenticity.verdict.to_string()).yellow()
    } else {
        style(report.authenticity.verdict.to_string()).green()
    };
    term.write_line("").ok();
    term.write_line(&format!(
        "{} {} {}",
        style("🤖 AI Detection:").bold(),
        verdict,
        style(format!("({})", report.authenticity.reason)).dim()
    ))
    .ok();
    term.write_line("").ok();
}

fn print_minimal_results(batch: &BatchReport) {
    for report in &batch.reports {
        let verdict = if report.is_likely_synthetic() {
            "likely-synthetic"
        } else {
            "likely-camera-original"
        };
        println!("{}\t{}", report.path.display(), verdict);
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| ImageScanError::Output(e.to_string()))
}
