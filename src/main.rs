//! Result analysis CLI for NoC simulation runs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use env_logger::Env;
use log::info;

use nocsim::analysis::{report, MeshSize};
use nocsim::config::AnalyzerConfig;
use nocsim::config_loader::{self, AnalyzerCliOverrides};
use nocsim::orchestrator;

#[derive(Parser, Debug)]
#[command(name = "nocsim")]
#[command(about = "Result analysis for network-on-chip simulation runs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing the simulator output files
    #[arg(short, long, global = true)]
    input_dir: Option<PathBuf>,

    /// Output directory for reports (defaults to the input directory)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Mesh size assumed when a run does not state one (e.g. 4x4)
    #[arg(long, global = true)]
    default_mesh: Option<MeshSize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse all runs and write the CSV, text and JSON reports
    Analyze {
        /// Skip the JSON report
        #[arg(long)]
        no_json: bool,
    },

    /// Parse all runs and print a summary without writing files
    Summary,
}

impl Cli {
    fn overrides(&self) -> AnalyzerCliOverrides {
        AnalyzerCliOverrides {
            input_dir: self.input_dir.clone(),
            output_dir: self.output.clone(),
            default_mesh_size: self.default_mesh,
            threads: self.threads,
            no_json: matches!(self.command, Commands::Analyze { no_json: true }),
        }
    }
}

fn load_configuration(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = config_loader::load_or_default(cli.config.as_deref())?;
    config_loader::apply_overrides(&mut config, &cli.overrides())?;
    Ok(config)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    let config = load_configuration(&cli)?;

    // Set thread pool size
    if config.general.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.general.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let run = orchestrator::run_analysis(&config)?;

    match cli.command {
        Commands::Analyze { .. } => {
            let paths = orchestrator::write_outputs(&run, &config)?;
            report::print_summary(&run.report);
            println!("CSV export: {}", paths.csv.display());
            println!("Text report: {}", paths.report.display());
            if let Some(json) = &paths.json {
                println!("JSON report: {}", json.display());
            }
        }
        Commands::Summary => {
            report::print_summary(&run.report);
        }
    }

    info!("Done");
    Ok(())
}
