use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scalemax::{filter_scale_maxima, take_time, CubeCoord, Strategy, Timing, Volume};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "scalemax benchmark driver (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for the filter kernels.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StrategyConfig {
    Scalar,
    Bulk,
    BulkSimd,
    Parallel,
}

impl From<StrategyConfig> for Strategy {
    fn from(value: StrategyConfig) -> Self {
        match value {
            StrategyConfig::Scalar => Strategy::Scalar,
            StrategyConfig::Bulk => Strategy::Bulk,
            StrategyConfig::BulkSimd => Strategy::BulkSimd,
            StrategyConfig::Parallel => Strategy::Parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    rows: usize,
    cols: usize,
    levels: usize,
    num_candidates: usize,
    seed: u64,
    repeats: usize,
    strategies: Vec<StrategyConfig>,
    output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 100,
            levels: 100,
            num_candidates: 1000,
            seed: 0,
            repeats: 1,
            strategies: vec![StrategyConfig::Scalar, StrategyConfig::Bulk],
            output_path: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct RunRecord {
    strategy: &'static str,
    resolved: &'static str,
    seconds: f64,
    formatted: String,
    accepted: usize,
}

#[derive(Debug, Serialize)]
struct Output {
    shape: [usize; 3],
    num_candidates: usize,
    seed: u64,
    repeats: usize,
    accepted: usize,
    runs: Vec<RunRecord>,
}

/// Uniform `[0, 1)` responses, like a dummy Laplacian-of-Gaussian cube.
fn random_volume(rng: &mut StdRng, config: &Config) -> Result<Volume, Box<dyn std::error::Error>> {
    let len = config
        .rows
        .checked_mul(config.cols)
        .and_then(|v| v.checked_mul(config.levels))
        .ok_or("volume shape overflows")?;
    let data = (0..len).map(|_| rng.random::<f64>()).collect();
    Ok(Volume::from_vec(data, config.rows, config.cols, config.levels)?)
}

/// Candidate coordinates drawn with inclusive upper bounds.
fn random_candidates(rng: &mut StdRng, config: &Config) -> Vec<CubeCoord> {
    (0..config.num_candidates)
        .map(|_| {
            CubeCoord::new(
                rng.random_range(0..=config.rows - 1),
                rng.random_range(0..=config.cols - 1),
                rng.random_range(0..=config.levels - 1),
            )
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("scalemax=info".parse()?)
                    .add_directive("scalemax_cli=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.rows == 0 || config.cols == 0 || config.levels == 0 {
        return Err("rows, cols and levels must be at least 1".into());
    }
    if config.repeats == 0 {
        return Err("repeats must be at least 1".into());
    }
    if config.strategies.is_empty() {
        return Err("at least one strategy must be listed".into());
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let volume = random_volume(&mut rng, &config)?;
    let candidates = random_candidates(&mut rng, &config);
    tracing::info!(
        rows = config.rows,
        cols = config.cols,
        levels = config.levels,
        candidates = candidates.len(),
        seed = config.seed,
        "inputs generated"
    );

    let mut reference: Option<(Strategy, Vec<CubeCoord>)> = None;
    let mut runs = Vec::with_capacity(config.strategies.len());
    for strategy in config.strategies.iter().copied().map(Strategy::from) {
        let mut best: Option<Timing> = None;
        let mut accepted = Vec::new();
        for _ in 0..config.repeats {
            let (result, timing) = take_time(strategy.name(), || {
                filter_scale_maxima(volume.view(), &candidates, strategy)
            });
            accepted = result?;
            if best.as_ref().map_or(true, |b| timing.elapsed() < b.elapsed()) {
                best = Some(timing);
            }
        }
        let timing = best.ok_or("no timed run")?;
        eprintln!("{timing}");
        tracing::info!(
            strategy = strategy.name(),
            resolved = strategy.resolved().name(),
            accepted = accepted.len(),
            seconds = timing.seconds(),
            "strategy timed"
        );

        match &reference {
            Some((first, expected)) if *expected != accepted => {
                return Err(format!(
                    "strategy {strategy} kept {} candidates but {first} kept {}",
                    accepted.len(),
                    expected.len()
                )
                .into());
            }
            Some(_) => {}
            None => reference = Some((strategy, accepted.clone())),
        }

        runs.push(RunRecord {
            strategy: strategy.name(),
            resolved: strategy.resolved().name(),
            seconds: timing.seconds(),
            formatted: timing.formatted(),
            accepted: accepted.len(),
        });
    }

    let output = Output {
        shape: [config.rows, config.cols, config.levels],
        num_candidates: candidates.len(),
        seed: config.seed,
        repeats: config.repeats,
        accepted: reference.map_or(0, |(_, kept)| kept.len()),
        runs,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
