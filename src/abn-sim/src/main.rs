//! abn-sim — A/B/N split-test simulator.
//!
//! Runs a bandit experiment over the configured experiences, then reports
//! per-variant counts and Monte Carlo win probabilities as JSON on stdout.

use abn_bandit::{policy, win_probabilities, Experience, Experiment};
use abn_core::config::SimulationConfig;
use abn_core::{AllocationStrategy, VariantSummary, WinDistribution, WinProbability};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Uniform,
    EpsilonGreedy,
}

#[derive(Parser, Debug)]
#[command(name = "abn-sim")]
#[command(about = "Simulate an A/B/N bandit experiment and estimate win probabilities")]
#[command(version)]
struct Cli {
    /// Optional TOML config file
    #[arg(long, short)]
    config: Option<String>,

    /// RNG seed (overrides config)
    #[arg(long, env = "ABN_SIM__SEED")]
    seed: Option<u64>,

    /// Number of trials to run (overrides config)
    #[arg(long, env = "ABN_SIM__TRIALS")]
    trials: Option<u64>,

    /// Posterior samples per variant (overrides config)
    #[arg(long, env = "ABN_SIM__SAMPLES_PER_VARIANT")]
    samples: Option<usize>,

    /// Allocation strategy (overrides config)
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Epsilon-greedy decay; implies --strategy epsilon-greedy
    #[arg(long)]
    decay: Option<f64>,

    /// Include the raw posterior samples in the report
    #[arg(long, default_value_t = false)]
    dump_samples: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    seed: u64,
    strategy: AllocationStrategy,
    trials: u64,
    summary: Vec<VariantSummary>,
    win_probabilities: Vec<WinProbability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    samples: Option<Vec<WinDistribution>>,
}

fn apply_overrides(config: &mut SimulationConfig, cli: &Cli) {
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(trials) = cli.trials {
        config.trials = trials;
    }
    if let Some(samples) = cli.samples {
        config.samples_per_variant = samples;
    }
    match (cli.strategy, cli.decay) {
        (Some(StrategyArg::Uniform), _) => config.strategy = AllocationStrategy::Uniform,
        (_, Some(decay)) => config.strategy = AllocationStrategy::EpsilonGreedy { decay },
        (Some(StrategyArg::EpsilonGreedy), None) => {
            if !matches!(config.strategy, AllocationStrategy::EpsilonGreedy { .. }) {
                config.strategy = AllocationStrategy::default();
            }
        }
        (None, None) => {}
    }
}

/// Load the file and environment, apply CLI overrides and validate. Any bad
/// value is reported; an explicit `--config` file that fails to load is an error.
fn resolve_config(cli: &Cli) -> anyhow::Result<SimulationConfig> {
    let mut config = SimulationConfig::load(cli.config.as_deref())?;
    apply_overrides(&mut config, cli);
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abn_sim=info,abn_bandit=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let config = resolve_config(&cli)?;

    info!(
        seed = config.seed,
        trials = config.trials,
        samples_per_variant = config.samples_per_variant,
        strategy = config.strategy.label(),
        experiences = config.experiences.len(),
        "Configuration loaded"
    );

    let experiences = config
        .experiences
        .iter()
        .map(Experience::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let policy = policy::from_strategy(&config.strategy)?;
    let mut experiment = Experiment::with_seed(experiences, policy, config.seed)?;

    experiment.run_trials(config.trials)?;
    let summary = experiment.summarize();
    let distributions = experiment.estimate_win_distributions(config.samples_per_variant)?;
    let win_probabilities = win_probabilities(&distributions)?;

    for p in &win_probabilities {
        info!(variant = %p.name, probability = p.probability, "win probability");
    }

    let report = Report {
        seed: config.seed,
        strategy: config.strategy,
        trials: experiment.total_observations(),
        summary,
        win_probabilities,
        samples: cli.dump_samples.then_some(distributions),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
