//! `lift` - command-line interface for causal-effect studies.

mod output;
mod scenario;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lift_core::config::LiftConfig;
use lift_core::errors::error_code::LiftErrorCode;
use lift_core::tracing::init_tracing;
use lift_queries::params::{self, ParamMap};
use lift_queries::registry::QueryRegistry;
use lift_queries::render::Renderer;
use lift_queries::study::Study;
use lift_warehouse::{BigQueryClient, QueryClient};

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Query templating and test design for causal-effect studies", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Project root holding lift.toml and studies/
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new study folder under studies/
    Init {
        /// Study name (lowercase, digits, `-`, `_`)
        study: String,
    },

    /// List registered queries
    List {
        /// Study whose queries/ folder to read
        #[arg(short, long)]
        study: Option<String>,
        /// Explicit queries directory (default: ./queries)
        #[arg(short, long, conflicts_with = "study")]
        dir: Option<PathBuf>,
    },

    /// Render a query template to stdout
    Render {
        /// Query name (e.g. geo/kpi_daily)
        query: String,
        #[arg(short, long)]
        study: Option<String>,
        #[arg(short, long, conflicts_with = "study")]
        dir: Option<PathBuf>,
        /// Parameters as key=value (value parsed as YAML)
        #[arg(short, long = "param")]
        params: Vec<String>,
        /// YAML file with parameters
        #[arg(long)]
        params_file: Option<PathBuf>,
    },

    /// Render a query and submit it to the warehouse
    Run {
        query: String,
        #[arg(short, long)]
        study: Option<String>,
        #[arg(short, long, conflicts_with = "study")]
        dir: Option<PathBuf>,
        #[arg(short, long = "param")]
        params: Vec<String>,
        #[arg(long)]
        params_file: Option<PathBuf>,
        /// Validate without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Dry-run every query in a study against the warehouse
    Validate {
        #[arg(short, long)]
        study: Option<String>,
        #[arg(short, long, conflicts_with = "study")]
        dir: Option<PathBuf>,
        #[arg(long)]
        params_file: Option<PathBuf>,
    },

    /// Run the candidate region scan from a scenario file
    Power {
        /// Scenario YAML (panel, candidates, design grid)
        #[arg(short, long)]
        config: PathBuf,
        /// Write results to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = LiftConfig::load(&cli.root).map_err(fail)?;

    match &cli.command {
        Commands::Init { study } => {
            let path = Study::scaffold(&cli.root, study).map_err(fail)?;
            println!("Created study at {}", path.display());
        }

        Commands::List { study, dir } => {
            let (registry, _) = open_registry(&cli, &config, study.as_deref(), dir.as_deref())?;
            output::print_query_list(&registry, cli.format)?;
        }

        Commands::Render {
            query,
            study,
            dir,
            params,
            params_file,
        } => {
            let (registry, defaults) =
                open_registry(&cli, &config, study.as_deref(), dir.as_deref())?;
            let call_params = collect_params(params, params_file.as_deref())?;
            let merged = params::merge(&defaults, &call_params);
            let sql = Renderer::new()
                .render_named(&registry, query, &merged)
                .map_err(fail)?;
            println!("{sql}");
        }

        Commands::Run {
            query,
            study,
            dir,
            params,
            params_file,
            dry_run,
        } => {
            let (registry, defaults) =
                open_registry(&cli, &config, study.as_deref(), dir.as_deref())?;
            let call_params = collect_params(params, params_file.as_deref())?;
            let merged = params::merge(&defaults, &call_params);
            let sql = Renderer::new()
                .render_named(&registry, query, &merged)
                .map_err(fail)?;

            let client = BigQueryClient::from_config(&config.warehouse).map_err(fail)?;
            if *dry_run {
                let dry = client.dry_run(&sql).await.map_err(fail)?;
                println!(
                    "{}: ok ({} bytes processed)",
                    query, dry.total_bytes_processed
                );
            } else {
                let table = client.run(&sql).await.map_err(fail)?;
                output::print_table(&table, cli.format)?;
            }
        }

        Commands::Validate {
            study,
            dir,
            params_file,
        } => {
            let (registry, defaults) =
                open_registry(&cli, &config, study.as_deref(), dir.as_deref())?;
            let call_params = collect_params(&[], params_file.as_deref())?;
            let merged = params::merge(&defaults, &call_params);

            let client = BigQueryClient::from_config(&config.warehouse).map_err(fail)?;
            let renderer = Renderer::new();
            let mut failures = 0usize;
            for name in registry.names() {
                match renderer.render_named(&registry, name, &merged) {
                    Ok(sql) => match client.dry_run(&sql).await {
                        Ok(dry) => println!(
                            "{name}: ok ({} bytes processed)",
                            dry.total_bytes_processed
                        ),
                        Err(err) => {
                            failures += 1;
                            println!("{name}: {}", err.code_string());
                        }
                    },
                    Err(err) => {
                        failures += 1;
                        println!("{name}: {}", err.code_string());
                    }
                }
            }
            if failures > 0 {
                return Err(anyhow!("{failures} queries failed validation"));
            }
        }

        Commands::Power { config: scenario_path, out } => {
            let scenario = scenario::load_scenario(scenario_path, &config.power)?;
            let outcome = scenario.run()?;
            output::write_cells(&outcome, cli.format, out.as_deref())?;
        }
    }

    Ok(())
}

/// Open the registry for a study (`--study`) or a plain queries directory
/// (`--dir`, default `<root>/queries`). Returns the registry plus default
/// parameters (the study manifest's, when there is one).
fn open_registry(
    cli: &Cli,
    config: &LiftConfig,
    study: Option<&str>,
    dir: Option<&std::path::Path>,
) -> Result<(QueryRegistry, ParamMap)> {
    if let Some(name) = study {
        let study = Study::open(&cli.root, name, &config.queries).map_err(fail)?;
        let defaults = study.manifest.params.clone();
        return Ok((study.registry, defaults));
    }

    let dir = dir
        .map(|d| cli.root.join(d))
        .unwrap_or_else(|| cli.root.join("queries"));
    let (registry, _) = QueryRegistry::from_dir(&dir, &config.queries).map_err(fail)?;
    Ok((registry, ParamMap::new()))
}

/// Combine `--param key=value` literals with an optional `--params-file`.
/// Literals win over the file.
fn collect_params(literals: &[String], file: Option<&std::path::Path>) -> Result<ParamMap> {
    let mut merged = match file {
        Some(path) => params::load_params_file(path).map_err(fail)?,
        None => ParamMap::new(),
    };
    for literal in literals {
        let (key, value) = params::parse_literal(literal).map_err(fail)?;
        merged.insert(key, value);
    }
    Ok(merged)
}

/// Convert a subsystem error into the CLI's `[CODE] message` shape.
fn fail<E: LiftErrorCode + std::fmt::Display>(err: E) -> anyhow::Error {
    anyhow!("{}", err.code_string())
}
