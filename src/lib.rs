//! Numclip - spoken-number corpus segmentation CLI.
//!
//! This crate turns a directory of recordings of spoken numbers into a
//! labeled corpus: one clip per number, named by its integer label.

#![warn(missing_docs)]

pub mod cli;
pub mod clipper;
pub mod config;
pub mod constants;
pub mod error;
pub mod jobs;
pub mod pipeline;
pub mod transcode;
pub mod vad;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, SegmentArgs};
use clipper::ClipExtractor;
use config::{Config, config_file_path, load_default_config, save_default_config};
use constants::ANALYSIS_SAMPLE_RATE;
use jobs::{NumberRange, Reconciler, SourceJob, order_jobs};
use pipeline::{collect_source_files, process_job};
use std::path::Path;
use tracing::{error, info};
use vad::{SileroVad, VadConfig};

pub use error::{Error, Result};

/// Main entry point for the numclip CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.segment.verbose, cli.segment.quiet);

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    let config = load_default_config()?;
    segment_sources(&cli.source_dir, &cli.segment, &config)
}

/// Segment every source recording in a directory into labeled clips.
fn segment_sources(source_dir: &Path, args: &SegmentArgs, config: &Config) -> Result<()> {
    // Fatal preconditions, all checked before any job starts.
    transcode::require_ffmpeg()?;

    let model_path = args
        .model
        .clone()
        .or_else(|| config.detector.model.clone())
        .ok_or(Error::ModelNotConfigured)?;
    if !model_path.exists() {
        return Err(Error::ModelFileNotFound { path: model_path });
    }

    let files = collect_source_files(source_dir)?;
    if files.is_empty() {
        return Err(Error::NoSourceFiles {
            path: source_dir.to_path_buf(),
        });
    }

    let mut jobs: Vec<SourceJob> = files.into_iter().map(SourceJob::from_path).collect();
    order_jobs(&mut jobs);

    let declared = jobs.iter().filter(|j| j.range.is_declared()).count();
    info!(
        "Found {} source file(s) ({declared} with declared ranges)",
        jobs.len()
    );
    for job in &jobs {
        match job.range {
            NumberRange::Declared { low, high } => {
                info!("  {} declares numbers {low}-{high}", job.file_name());
            }
            NumberRange::Undeclared => {
                info!("  {} declares no range", job.file_name());
            }
        }
    }

    let vad_config = resolve_vad_config(args, config);
    let merge_gap_ms = args.merge_gap_ms.unwrap_or(config.segmenter.merge_gap_ms);
    let merge_gap_samples = (ANALYSIS_SAMPLE_RATE as usize * merge_gap_ms as usize) / 1000;

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.dir.clone());

    info!("Loading VAD model: {}", model_path.display());
    let mut detector = SileroVad::load(&model_path, vad_config)?;
    let mut reconciler = Reconciler::new(&jobs);
    let extractor = ClipExtractor::new(output_dir)?;

    let mut produced = 0usize;
    let mut skipped = 0usize;
    let mut errors = 0usize;

    for job in &jobs {
        match process_job(
            job,
            &mut detector,
            &mut reconciler,
            &extractor,
            merge_gap_samples,
        ) {
            Ok(result) if result.clips_written == 0 => skipped += 1,
            Ok(result) => produced += result.clips_written,
            Err(e) => {
                error!("Failed to process {}: {e}", job.file_name());
                errors += 1;
                if args.fail_fast {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Done. Produced {produced} clip(s) in '{}' ({skipped} job(s) skipped, {errors} error(s))",
        extractor.output_dir().display()
    );

    Ok(())
}

/// Resolve detector settings: CLI overrides config overrides defaults.
fn resolve_vad_config(args: &SegmentArgs, config: &Config) -> VadConfig {
    let defaults = VadConfig::default();
    VadConfig {
        threshold: args.threshold.unwrap_or(config.detector.threshold),
        min_speech_ms: args.min_speech_ms.unwrap_or(config.detector.min_speech_ms),
        min_silence_ms: args
            .min_silence_ms
            .unwrap_or(config.detector.min_silence_ms),
        speech_pad_ms: args.speech_pad_ms.unwrap_or(config.detector.speech_pad_ms),
        sample_rate: defaults.sample_rate,
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT logging is suppressed at low verbosity; its session setup chatter
    // drowns the per-job warnings users actually need.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt().with_env_filter(filter).init();
}

#[allow(clippy::print_stdout)]
fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  set detector.model to your silero_vad.onnx path");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
