use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use graphstate_depth::graph::random::{random_graph, seeded_rng};
use graphstate_depth::schedule::parse_corrections;
use graphstate_depth::{
    EncodingStrategy, Graph, GraphStateDecomposition, SearchMode, SynthesisConfig,
    synthesize, synthesize_decomposition, synthesize_with_deadline,
};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "gsd")]
#[command(about = "gsd - depth-optimal graph state preparation")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Log search progress (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// CLI encoding strategy selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliStrategy {
    /// One colour per edge, adjacent edges differ
    Coloring,
    /// Per-edge layer plus idle slots for non-edges
    Scheduling,
}

impl From<CliStrategy> for EncodingStrategy {
    fn from(cli: CliStrategy) -> Self {
        match cli {
            CliStrategy::Coloring => EncodingStrategy::EdgeColoring,
            CliStrategy::Scheduling => EncodingStrategy::Scheduling,
        }
    }
}

/// CLI search mode selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliSearchMode {
    /// Try each depth from the lower bound upwards
    Linear,
    /// Binary search on the depth bound
    Binary,
}

impl From<CliSearchMode> for SearchMode {
    fn from(cli: CliSearchMode) -> Self {
        match cli {
            CliSearchMode::Linear => SearchMode::Linear,
            CliSearchMode::Binary => SearchMode::Binary,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find a minimal-depth schedule for one graph
    Synth {
        /// Adjacency matrix, e.g. "[[0,1],[1,0]]"
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        graph: Option<String>,
        /// File containing an adjacency matrix
        #[arg(long)]
        file: Option<PathBuf>,

        // --- Search options ---
        /// Constraint encoding
        #[arg(long, value_enum, default_value = "coloring")]
        strategy: CliStrategy,
        /// How candidate depths are probed
        #[arg(long, value_enum, default_value = "binary")]
        search_mode: CliSearchMode,
        /// Add symmetry-breaking constraints
        #[arg(long)]
        symmetry_breaking: bool,
        /// Timeout in seconds for each solver call
        #[arg(long)]
        solver_timeout: Option<u64>,
        /// Give up after this many seconds
        #[arg(long)]
        deadline: Option<u64>,

        // --- Output options ---
        /// Local gates applied after the graph state, e.g. "0:H,1:S"
        #[arg(long)]
        corrections: Option<String>,
    },
    /// Average depth and runtime over random graphs
    Bench {
        #[arg(long, default_value = "2")]
        min_nodes: usize,
        #[arg(long, default_value = "8")]
        max_nodes: usize,
        /// Graphs per node count
        #[arg(long, default_value = "5")]
        runs: usize,
        /// Probability of each edge
        #[arg(long, default_value = "0.5")]
        density: f64,
        /// Random seed for reproducibility
        #[arg(long, default_value = "0")]
        seed: u64,
        #[arg(long, value_enum, default_value = "coloring")]
        strategy: CliStrategy,
        #[arg(long, value_enum, default_value = "binary")]
        search_mode: CliSearchMode,
        #[arg(long)]
        symmetry_breaking: bool,
    },
}

struct SynthOptions {
    config: SynthesisConfig,
    deadline: Option<Duration>,
    corrections: Option<String>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_graph(
    graph: Option<String>,
    file: Option<PathBuf>,
) -> Result<Graph, Box<dyn std::error::Error>> {
    let text = match (graph, file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?,
        (None, None) => return Err("either --graph or --file is required".into()),
    };
    Ok(text.parse()?)
}

// --- Synthesis ---

fn run_synth(graph: Graph, options: SynthOptions) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "Synthesizing {} nodes, {} edges ({}, {} search{})",
        graph.node_count(),
        graph.edge_count(),
        options.config.strategy,
        options.config.search_mode,
        if options.config.symmetry_breaking {
            ", symmetry breaking"
        } else {
            ""
        }
    );

    let corrections = match options.corrections {
        Some(text) => parse_corrections(&text)?,
        None => Vec::new(),
    };
    let decomposition = GraphStateDecomposition::new(graph, corrections)?;

    let (schedule, result) = match options.deadline {
        Some(deadline) => {
            let (schedule, result) =
                synthesize_with_deadline(decomposition.graph().clone(), options.config, deadline)?;
            (schedule.with_corrections(decomposition.corrections()), result)
        }
        None => synthesize_decomposition(&decomposition, &options.config)?,
    };

    println!("\n{}", schedule);
    print!("{}", result.format_summary());
    Ok(())
}

// --- Benchmark ---

fn run_bench(
    min_nodes: usize,
    max_nodes: usize,
    runs: usize,
    density: f64,
    seed: u64,
    config: &SynthesisConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if min_nodes == 0 || min_nodes > max_nodes {
        return Err(format!("invalid node range {}..={}", min_nodes, max_nodes).into());
    }
    if runs == 0 {
        return Err("--runs must be at least 1".into());
    }

    let mut rng = seeded_rng(seed);
    println!("{:>6} {:>10} {:>12}", "nodes", "avg depth", "avg time");
    for nodes in min_nodes..=max_nodes {
        let mut total_depth = 0;
        let mut total_time = Duration::ZERO;
        for _ in 0..runs {
            let graph = random_graph(nodes, density, &mut rng)?;
            let (_, result) = synthesize(&graph, config)?;
            total_depth += result.depth();
            total_time += result.runtime();
        }
        println!(
            "{:>6} {:>10.2} {:>12.2?}",
            nodes,
            total_depth as f64 / runs as f64,
            total_time / runs as u32
        );
    }
    Ok(())
}

// --- Main Function ---
fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Synth {
            graph,
            file,
            strategy,
            search_mode,
            symmetry_breaking,
            solver_timeout,
            deadline,
            corrections,
        } => {
            let graph = match load_graph(graph, file) {
                Ok(graph) => graph,
                Err(e) => {
                    eprintln!("Error reading graph: {}", e);
                    std::process::exit(1);
                }
            };

            let options = SynthOptions {
                config: SynthesisConfig::default()
                    .with_strategy(strategy.into())
                    .with_search_mode(search_mode.into())
                    .with_symmetry_breaking(symmetry_breaking)
                    .with_solver_timeout_option(solver_timeout.map(Duration::from_secs)),
                deadline: deadline.map(Duration::from_secs),
                corrections,
            };

            if let Err(e) = run_synth(graph, options) {
                eprintln!("Error during synthesis: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Bench {
            min_nodes,
            max_nodes,
            runs,
            density,
            seed,
            strategy,
            search_mode,
            symmetry_breaking,
        } => {
            let config = SynthesisConfig::default()
                .with_strategy(strategy.into())
                .with_search_mode(search_mode.into())
                .with_symmetry_breaking(symmetry_breaking);

            if let Err(e) = run_bench(min_nodes, max_nodes, runs, density, seed, &config) {
                eprintln!("Error during benchmark: {}", e);
                std::process::exit(1);
            }
        }
    }
}
