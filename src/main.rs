//! hrglitch CLI
//!
//! Lists heart-rate readings, flags glitches, and exports them to CSV.

use clap::{Parser, Subcommand};
use hrglitch::{
    config::Config,
    core::{scan, scan_lossy, GlitchLevel, GlitchPolicy},
    export::{format_bpm, to_csv, write_file, CsvOptions, OutputFormat, DEFAULT_EXPORT_STEM},
    source::{spawn_fetch, FileSource, Reading, SampleQuery},
    VERSION,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hrglitch")]
#[command(version = VERSION)]
#[command(about = "Heart-rate glitch scanner and CSV exporter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List heart-rate readings from a readings file
    List {
        /// Readings file (JSON array of samples)
        #[arg(long, short)]
        input: PathBuf,

        /// Maximum number of readings to show
        #[arg(long)]
        limit: Option<usize>,

        /// Sort by end time ascending instead of descending
        #[arg(long)]
        ascending: bool,
    },

    /// Scan readings for glitches and list them
    Glitches {
        /// Readings file (JSON array of samples)
        #[arg(long, short)]
        input: PathBuf,

        /// Sensitivity level (high, medium, low)
        #[arg(long, default_value = "high")]
        level: GlitchLevel,

        /// Skip malformed readings instead of aborting
        #[arg(long)]
        skip_malformed: bool,
    },

    /// Scan readings and export the glitches to a file
    Export {
        /// Readings file (JSON array of samples)
        #[arg(long, short)]
        input: PathBuf,

        /// Sensitivity level (high, medium, low)
        #[arg(long, default_value = "high")]
        level: GlitchLevel,

        /// Output file (default: HeartRateGlitches.csv in the export directory)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(long, default_value = "csv")]
        format: OutputFormat,

        /// Skip malformed readings instead of aborting
        #[arg(long)]
        skip_malformed: bool,
    },

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            input,
            limit,
            ascending,
        } => {
            cmd_list(input, limit, ascending);
        }
        Commands::Glitches {
            input,
            level,
            skip_malformed,
        } => {
            cmd_glitches(input, level, skip_malformed);
        }
        Commands::Export {
            input,
            level,
            output,
            format,
            skip_malformed,
        } => {
            cmd_export(input, level, output, format, skip_malformed);
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

fn cmd_list(input: PathBuf, limit: Option<usize>, ascending: bool) {
    let config = load_config();
    let query = SampleQuery {
        limit: limit.or(config.fetch_limit),
        ascending,
    };
    let readings = fetch(input, query);

    for reading in &readings {
        println!("{}", describe(reading));
    }
    println!();
    println!("{} samples", readings.len());
}

fn cmd_glitches(input: PathBuf, level: GlitchLevel, skip_malformed: bool) {
    let config = load_config();
    let policy = config.levels.policy_for(level);
    let readings = fetch(input, SampleQuery::ascending(config.fetch_limit));
    let glitches = run_scan(&readings, &policy, skip_malformed);

    for glitch in &glitches {
        println!("{}", describe(glitch));
    }
    println!();
    println!("{} glitches (level: {level})", glitches.len());
}

fn cmd_export(
    input: PathBuf,
    level: GlitchLevel,
    output: Option<PathBuf>,
    format: OutputFormat,
    skip_malformed: bool,
) {
    let config = load_config();
    let policy = config.levels.policy_for(level);
    let timezone = config.export_tz().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let readings = fetch(input, SampleQuery::ascending(config.fetch_limit));
    let glitches = run_scan(&readings, &policy, skip_malformed);

    let content = match format {
        OutputFormat::Csv => to_csv(&glitches, &CsvOptions { timezone }),
    }
    .unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let path = output.unwrap_or_else(|| {
        if let Err(e) = config.ensure_directories() {
            eprintln!("Warning: Could not create export directory: {e}");
        }
        config
            .export_dir
            .join(format!("{DEFAULT_EXPORT_STEM}{}", format.file_extension()))
    });

    if let Err(e) = write_file(&path, &content) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    println!("Exported {} glitches to {}", glitches.len(), path.display());
}

fn cmd_config() {
    let config = load_config();

    println!("hrglitch v{VERSION}");
    println!();
    println!("Config file: {}", Config::config_path().display());
    println!("Export directory: {}", config.export_dir.display());
    println!("Export timezone: {}", config.export_timezone);
    println!(
        "Fetch limit: {}",
        config
            .fetch_limit
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unlimited".to_string())
    );
    println!();
    println!("Levels:");
    for level in [GlitchLevel::High, GlitchLevel::Medium, GlitchLevel::Low] {
        let policy = config.levels.policy_for(level);
        println!(
            "  {level}: threshold {} bpm, window {}s",
            policy.threshold_bpm,
            policy.window.num_seconds()
        );
    }
}

/// Load configuration, falling back to defaults on failure.
fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config: {e}");
        Config::default()
    })
}

/// Fetch readings from the file source on a background thread.
fn fetch(input: PathBuf, query: SampleQuery) -> Vec<Reading> {
    let receiver = spawn_fetch(FileSource::new(input), query);

    match receiver.recv() {
        Ok(Ok(readings)) => readings,
        Ok(Err(e)) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("Error: fetch thread terminated unexpectedly");
            std::process::exit(1);
        }
    }
}

/// Run the scan, strict or lossy per the flag.
fn run_scan(readings: &[Reading], policy: &GlitchPolicy, skip_malformed: bool) -> Vec<Reading> {
    if skip_malformed {
        let outcome = scan_lossy(readings, policy);
        for skipped in &outcome.skipped {
            eprintln!("Warning: skipped malformed reading: {skipped}");
        }
        outcome.glitches
    } else {
        scan(readings, policy).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            eprintln!("Hint: re-run with --skip-malformed to skip malformed readings");
            std::process::exit(1);
        })
    }
}

/// One-line rendering of a reading: value plus its time.
fn describe(reading: &Reading) -> String {
    if reading.is_instantaneous() {
        format!("{:>7}  {}", format_bpm(reading.value), reading.end)
    } else {
        format!(
            "{:>7}  {} ~ {}",
            format_bpm(reading.value),
            reading.start,
            reading.end
        )
    }
}
