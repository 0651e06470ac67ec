use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use circuit_evo::{Circuit, GoalSpec, ObstacleSpec, Population, SimulationConfig, Vector2};

/// Headless driver evolving entities through the demonstration circuit.
#[derive(Parser)]
#[command(name = "circuit-evo")]
#[command(about = "Evolve entities to cross a circuit with a genetic algorithm", long_about = None)]
#[command(version)]
struct Args {
    /// JSON file with simulation parameters. Missing fields take defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of generations to run
    #[arg(short, long, default_value_t = 100)]
    generations: u32,

    /// Entities per generation (overrides the config file)
    #[arg(short, long)]
    population: Option<usize>,

    /// Per-gene mutation rate in percent, 0-100 (overrides the config file)
    #[arg(short, long)]
    mutation: Option<f32>,

    /// Target time in ticks (overrides the config file)
    #[arg(short, long)]
    target_time: Option<u32>,

    /// Lifespan in ticks (overrides the config file). Raised above the target time if needed.
    #[arg(short, long)]
    lifespan: Option<u32>,

    /// Number of threads for parallel processing
    ///
    /// Limits Rayon's thread pool size. By default, uses all available CPU cores.
    #[arg(long)]
    threads: Option<usize>,

    /// Write the retained generation summaries to this JSON file at the end
    #[arg(long)]
    history: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure rayon thread pool")?;
    }

    let config = build_config(&args)?;
    let (circuit, spawn) = demo_circuit()?;

    info!(
        population = config.population_size,
        mutation_percent = config.mutation_percent,
        target_time = config.target_time,
        lifespan = config.lifespan,
        obstacles = circuit.obstacles().len(),
        "Starting circuit evolution"
    );

    let mut population = Population::seed(config, Arc::new(circuit), spawn)?;
    for _ in 0..args.generations {
        population.run_generation()?;
    }

    let history = population.history();
    match history.best_time_record {
        Some(record) => info!(
            generations = args.generations,
            time_record = record,
            avg_best_fitness = history.avg_best_fitness(),
            "Evolution finished"
        ),
        None => warn!(
            generations = args.generations,
            "Evolution finished without any entity reaching the goal"
        ),
    }

    if let Some(path) = &args.history {
        history
            .save_to_file(path)
            .with_context(|| format!("failed to write history to {}", path.display()))?;
        info!(path = %path.display(), "Saved generation history");
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(population) = args.population {
        config.population_size = population;
    }
    if let Some(mutation) = args.mutation {
        config.mutation_percent = mutation;
    }
    if let Some(target_time) = args.target_time {
        config.target_time = target_time;
    }
    if let Some(lifespan) = args.lifespan {
        config.lifespan = lifespan;
    }

    let config = config.with_clamped_lifespan();
    config.validate()?;
    Ok(config)
}

/// A 1000x600 circuit: spawn on the left, goal on the right, three walls between.
fn demo_circuit() -> Result<(Circuit, Vector2)> {
    let goal = GoalSpec {
        center: Vector2::new(920.0, 300.0),
        width: 60.0,
        height: 60.0,
    };
    let obstacles = [
        ObstacleSpec {
            center: Vector2::new(300.0, 200.0),
            width: 30.0,
            height: 320.0,
            angle_degrees: 0.0,
        },
        ObstacleSpec {
            center: Vector2::new(550.0, 420.0),
            width: 30.0,
            height: 300.0,
            angle_degrees: 20.0,
        },
        ObstacleSpec {
            center: Vector2::new(760.0, 250.0),
            width: 200.0,
            height: 20.0,
            angle_degrees: -35.0,
        },
    ];
    let circuit = Circuit::new(goal, &obstacles)?;
    Ok((circuit, Vector2::new(60.0, 300.0)))
}
