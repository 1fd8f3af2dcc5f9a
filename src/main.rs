use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rinf_graph_analyzer::{
    config::AnalyzerConfig,
    dataset::{DatasetLoader, DatasetSource},
    network::{DegreeAnalyzer, GraphTraversal, LineDegreeMode, TransitGraph},
    reports::{formatters, ReportGenerator},
    AnalysisError,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rinf-analyze")]
#[command(about = "Shortest paths, degree statistics and line reports for RInf rail network graphs")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use the original (unprocessed) graph document
    #[arg(long, global = true)]
    orig: bool,

    /// Graph document to read, overrides --data-dir and --orig
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Directory holding Graph.json and Graph-orig.json
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RINF_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Minimum-cost path between two stations
    ShortestPath {
        /// Start station
        from: String,

        /// Destination station
        to: String,
    },

    /// Degree histogram and junction stations of the whole network
    Degree,

    /// Degree histogram and junction stations of a single line
    DegreeOfLine {
        /// Line identifier
        line: String,

        /// Keep every network station, counting only the line's segments
        #[arg(long)]
        all_stations: bool,
    },

    /// Write the summary of every line to a file
    LineInfos {
        /// Output file path
        output: PathBuf,

        /// Output format (json, text)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Station, segment and line counts of the network
    Info,

    /// Initialize configuration file
    Init {
        /// Configuration file path
        #[arg(long, default_value = "rinf-analyze.yml")]
        config_file: PathBuf,
    },
}

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match prepare(&cli) {
        Ok(config) => config,
        Err(err) => {
            // tracing is not available yet
            eprintln!("Error: {:#}", err);
            std::process::exit(exit_code(&err));
        }
    };

    if let Err(err) = run(cli, config) {
        error!("{:#}", err);
        std::process::exit(exit_code(&err));
    }
}

/// 2 for input load failures, 3 for failed queries, 1 otherwise
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AnalysisError>() {
        Some(analysis_error) if analysis_error.is_input_load() => 2,
        Some(_) => 3,
        None => 1,
    }
}

/// Load the configuration layers and start logging
fn prepare(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = AnalyzerConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.data_dir.clone(), cli.log_level.clone());

    init_tracing(&config.log_level)?;
    Ok(config)
}

fn run(cli: Cli, config: AnalyzerConfig) -> Result<()> {
    let loader = match cli.input {
        Some(path) => DatasetLoader::new(path),
        None => DatasetLoader::for_source(&config, DatasetSource::from_flag(cli.orig)),
    };

    match cli.command {
        Commands::ShortestPath { from, to } => {
            let graph = load_network(&loader)?;
            shortest_path(&graph, &from, &to)
        }
        Commands::Degree => {
            let graph = load_network(&loader)?;
            let report = DegreeAnalyzer::analyze(&graph, config.network_degree_threshold);
            println!("{}", formatters::format_degree_report(&report));
            Ok(())
        }
        Commands::DegreeOfLine { line, all_stations } => {
            let graph = load_network(&loader)?;
            let report = DegreeAnalyzer::analyze_line(
                &graph,
                &line,
                LineDegreeMode::from_flag(all_stations),
                config.line_degree_threshold,
            );
            println!("{}", formatters::format_degree_report(&report));
            Ok(())
        }
        Commands::LineInfos {
            output,
            format,
            pretty,
        } => {
            let graph = load_network(&loader)?;
            let infos = ReportGenerator::new(config.line_degree_threshold)
                .write_report(&graph, &output, &format, pretty)?;
            println!("Wrote {} line records to {:?}", infos.len(), output);
            Ok(())
        }
        Commands::Info => {
            let graph = load_network(&loader)?;
            println!("{}", formatters::format_statistics(&graph.statistics()));
            Ok(())
        }
        Commands::Init { config_file } => init_config(&config_file),
    }
}

/// Read the document and build the graph, logging its summary
fn load_network(loader: &DatasetLoader) -> Result<TransitGraph> {
    info!("Starting analysis of {:?}", loader.input_path());
    let graph = loader.load_graph()?;

    let stats = graph.statistics();
    info!(
        "Network: {} stations, {} segments, {} lines, average degree {:.4}",
        stats.total_stations, stats.total_segments, stats.total_lines, stats.average_degree
    );
    Ok(graph)
}

/// Initialize tracing with the specified log level
fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
        .context("Failed to create env filter")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(env_filter)
        .init();

    Ok(())
}

fn shortest_path(graph: &TransitGraph, from: &str, to: &str) -> Result<()> {
    let route = GraphTraversal::shortest_path(graph, from, to)
        .with_context(|| format!("Shortest path query {} -> {} failed", from, to))?;
    println!("{}", formatters::format_route(&route));
    Ok(())
}

/// Write the default configuration file
fn init_config(config_file: &Path) -> Result<()> {
    info!("Initializing configuration file: {:?}", config_file);

    if config_file.exists() {
        warn!("Configuration file already exists: {:?}", config_file);
        print!("Overwrite existing file? (y/N): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().to_lowercase().starts_with('y') {
            info!("Configuration initialization cancelled");
            return Ok(());
        }
    }

    AnalyzerConfig::default().save_to_file(config_file)?;

    info!("Configuration file created successfully: {:?}", config_file);
    println!("Configuration file created: {:?}", config_file);
    println!("Edit this file to customize the analyzer behavior.");

    Ok(())
}
