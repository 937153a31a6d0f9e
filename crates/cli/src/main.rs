//! Load plan CLI

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use u_loadplan::{Config, LoadPlanResult};
use u_loadplan_cli::{format_summary, load_config, run_analyze, run_generate, PlanRequest};

#[derive(Parser)]
#[command(name = "loadplan")]
#[command(about = "Cargo load planning with center-of-gravity stability scoring")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a load plan for the cargo in a request file
    Generate {
        #[command(flatten)]
        args: CommonArgs,
    },

    /// Validate and evaluate the placements in a request file
    Analyze {
        #[command(flatten)]
        args: CommonArgs,
    },
}

#[derive(clap::Args)]
struct CommonArgs {
    /// Path to the JSON request (vehicle, cargo, placements)
    request: PathBuf,

    /// Output file for the result (JSON)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a plan summary instead of JSON
    #[arg(short, long)]
    summary: bool,

    /// JSON file overriding scoring and safety thresholds
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CommonArgs {
    fn load(&self) -> anyhow::Result<(PlanRequest, Config)> {
        let request = PlanRequest::from_file(&self.request)
            .with_context(|| format!("Failed to load request {}", self.request.display()))?;

        let config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        Ok((request, config))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => {
            let (request, config) = args.load()?;
            let result = run_generate(&request, &config).context("Plan generation failed")?;
            emit(&result, &args)?;
        }

        Commands::Analyze { args } => {
            let (request, config) = args.load()?;
            let result = run_analyze(&request, &config).context("Plan analysis failed")?;
            emit(&result, &args)?;
        }
    }

    Ok(())
}

fn emit(result: &LoadPlanResult, args: &CommonArgs) -> anyhow::Result<()> {
    let text = if args.summary {
        format_summary(result)
    } else {
        serde_json::to_string_pretty(result)?
    };

    match &args.output {
        Some(path) => {
            write_output(path, &text)?;
            println!("Result saved to: {}", path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}

fn write_output(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}
