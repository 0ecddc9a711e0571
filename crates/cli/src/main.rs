#![deny(unsafe_code)]
//! CLI binary for the linework line-art engine.
//!
//! Subcommands:
//! - `render <pipeline.json>`: run a pipeline, write SVG
//! - `list`: print available modules and their roles
//!
//! Logging goes to stderr and is filtered by `RUST_LOG`.

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use linework_core::module::ModuleRole;
use linework_modules::{ModuleKind, Pipeline, PipelineSpec};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "linework_cli=info,linework_modules=info,linework_core=info";

#[derive(Parser)]
#[command(name = "linework", about = "Procedural vector line-art CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a pipeline file and write an SVG snapshot.
    Render {
        /// Pipeline description (JSON).
        pipeline: PathBuf,

        /// Output file path.
        #[arg(short, long, default_value = "output.svg")]
        output: PathBuf,

        /// Override the pipeline's PRNG seed.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List available modules.
    List,
}

/// Reads and parses a pipeline description.
fn load_spec(path: &Path) -> Result<PipelineSpec, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let modules = ModuleKind::list_modules();
            if cli.json {
                let info: Vec<_> = modules
                    .iter()
                    .map(|(name, role)| serde_json::json!({"name": name, "role": role}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for (heading, wanted) in [
                    ("Generators:", ModuleRole::Generator),
                    ("Modifiers:", ModuleRole::Modifier),
                ] {
                    println!("{heading}");
                    for (name, _) in modules.iter().filter(|(_, role)| *role == wanted) {
                        println!("  {name}");
                    }
                }
            }
        }
        Command::Render {
            pipeline,
            output,
            seed,
        } => {
            let mut spec = load_spec(&pipeline)?;
            if let Some(seed) = seed {
                spec.seed = seed;
            }
            tracing::debug!(path = %pipeline.display(), steps = spec.steps.len(), "loaded pipeline");

            let pipeline = Pipeline::from_spec(&spec)?;
            let layers = pipeline.run();
            linework_modules::svg::write_svg(&layers, pipeline.canvas(), &output)?;

            let paths: usize = layers.iter().map(|l| l.paths.len()).sum();
            tracing::debug!(layers = layers.len(), paths, "wrote {}", output.display());
            if cli.json {
                let info = serde_json::json!({
                    "width": spec.canvas.width,
                    "height": spec.canvas.height,
                    "steps": spec.steps.len(),
                    "seed": spec.seed,
                    "layers": layers.len(),
                    "paths": paths,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} steps ({}x{}, seed {}) -> {}",
                    spec.steps.len(),
                    spec.canvas.width,
                    spec.canvas.height,
                    spec.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
