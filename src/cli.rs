use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::analysis::{analyze_run, AnalysisConfig};
use crate::generator::{generate_run, GeneratorOptions, PerformanceProfile};
use crate::ingest::parse_run;
use crate::models::AnalysisRecord;
use crate::log_info;
use crate::settings::{load_config, save_config};

const ENABLE_LOGS: bool = true;

/// Output format for the analyze subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Telemetry analysis for obstacle course robot runs.
#[derive(Debug, Parser)]
#[command(name = "utra-analysis", version, about = "Telemetry analysis for obstacle course robot runs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a run submission and print its analysis record
    Analyze {
        /// Path to the run submission JSON file
        run: PathBuf,
        /// Path to a JSON file overriding analysis thresholds
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "json", value_enum)]
        output: OutputFormat,
        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Generate a synthetic run submission
    Generate {
        #[arg(long, default_value = "Alpha")]
        robot_id: String,
        #[arg(long, default_value_t = 1)]
        run_number: u32,
        #[arg(long, default_value = "good", value_enum)]
        profile: PerformanceProfile,
        /// Seed for reproducible runs
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a config file listing every analysis threshold at its default
    InitConfig {
        /// Destination for the config JSON
        path: PathBuf,
    },
}

pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            run,
            config,
            output,
            compact,
        } => {
            let config = load_config(config.as_deref())?;
            let contents = fs::read_to_string(&run)
                .with_context(|| format!("Failed to read run from {}", run.display()))?;
            let parsed = parse_run(&contents)
                .with_context(|| format!("Failed to ingest run from {}", run.display()))?;
            let record = analyze_run(&parsed, &config)
                .with_context(|| format!("Failed to analyze run {}", parsed.id))?;

            match output {
                OutputFormat::Json if compact => println!("{}", serde_json::to_string(&record)?),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
                OutputFormat::Text => print!("{}", render_text(&record)),
            }
            Ok(())
        }
        Commands::Generate {
            robot_id,
            run_number,
            profile,
            seed,
            out,
        } => {
            let run = generate_run(&GeneratorOptions {
                robot_id,
                run_number,
                profile,
                seed,
            });
            let serialized = serde_json::to_string_pretty(&run)?;
            match out {
                Some(path) => fs::write(&path, serialized)
                    .with_context(|| format!("Failed to write run to {}", path.display()))?,
                None => println!("{}", serialized),
            }
            Ok(())
        }
        Commands::InitConfig { path } => {
            save_config(&path, &AnalysisConfig::default())?;
            log_info!("Wrote default analysis config to {}", path.display());
            Ok(())
        }
    }
}

/// Human readable rendering of an analysis record.
pub fn render_text(record: &AnalysisRecord) -> String {
    let mut out = String::new();

    out.push_str("Section times:\n");
    for (section, ms) in record.section_times.iter() {
        out.push_str(&format!("  {:<11} {:>8.1}s\n", section.display_name(), ms as f64 / 1000.0));
    }

    out.push_str(&format!("Checkpoint rate: {:.1}%\n", record.checkpoint_rate));
    match (record.ultrasonic_avg_cm, record.ultrasonic_min_cm) {
        (Some(avg), Some(min)) => {
            out.push_str(&format!("Ultrasonic: avg {:.1}cm, min {:.1}cm\n", avg, min))
        }
        _ => out.push_str("Ultrasonic: no readings\n"),
    }
    out.push_str(&format!("Claw changes: {}\n", record.claw_changes));

    out.push_str("Timeline:\n");
    for event in &record.timeline {
        let phase = event.phase.map(|p| p.number().to_string()).unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "  {:>8.1}s  [{}] {}\n",
            event.time_ms as f64 / 1000.0,
            phase,
            event.event
        ));
    }

    if record.issues.is_empty() {
        out.push_str("Issues: none\n");
    } else {
        out.push_str("Issues:\n");
        for issue in &record.issues {
            out.push_str(&format!("  - {}\n", issue));
        }
    }

    out
}
