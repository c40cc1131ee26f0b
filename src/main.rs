use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trafik::pipeline::{
    AssembleOptions, InspectOptions, inspect_page, run_assemble, validate_config,
};

#[derive(Parser, Debug)]
#[command(name = "trafik", about = "Street traffic-flow table scraper and assembler")]
struct Cli {
    #[arg(long, default_value = "trafik.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse every street page and write the unified dataset.
    Assemble {
        #[arg(long)]
        input_dir: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        format: Option<String>,
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Parse one street page and print its records as JSON.
    Inspect {
        file: PathBuf,
    },
    /// Check that the config file loads and validates.
    Validate,
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Assemble {
            input_dir,
            out,
            format,
            dry_run,
        } => {
            let report = run_assemble(&AssembleOptions {
                config_path: cli.config,
                input_dir,
                out_path: out,
                format,
                dry_run,
            })?;

            info!(
                discovered = report.files_discovered,
                parsed = report.files_parsed,
                skipped = report.files_skipped,
                records = report.records,
                "assemble summary"
            );
        }
        Commands::Inspect { file } => {
            let records = inspect_page(&InspectOptions {
                config_path: cli.config,
                file,
            })?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Validate => {
            let message = validate_config(&cli.config)?;
            println!("{message}");
        }
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(())
}
