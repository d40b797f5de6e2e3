use serde::{Deserialize, Serialize};

/// Allocation strategy as it appears in configuration.
///
/// The bandit crate turns this into a concrete policy; keeping the enum here
/// lets the config layer stay free of any sampling code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AllocationStrategy {
    /// Every trial picks a variant uniformly at random.
    Uniform,
    /// Decaying epsilon-greedy: `epsilon = decay / (observations + decay)`.
    EpsilonGreedy {
        #[serde(default = "default_decay")]
        decay: f64,
    },
}

pub const DEFAULT_DECAY: f64 = 50.0;

/// Posterior draws per variant used by the reference win-probability run.
pub const DEFAULT_SAMPLES_PER_VARIANT: usize = 1000;

fn default_decay() -> f64 {
    DEFAULT_DECAY
}

impl Default for AllocationStrategy {
    fn default() -> Self {
        Self::EpsilonGreedy {
            decay: DEFAULT_DECAY,
        }
    }
}

impl AllocationStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::EpsilonGreedy { .. } => "epsilon_greedy",
        }
    }
}

/// One experience (variant) as declared in configuration: a name and the
/// hidden success rate used to simulate outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceSpec {
    pub name: String,
    pub rate: f64,
}

impl ExperienceSpec {
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }
}

/// Per-variant counts reported after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    pub name: String,
    pub trials: u64,
    pub successes: u64,
    /// `successes / trials`, or 0 when the variant was never sampled.
    pub empirical_rate: f64,
}

/// Raw posterior samples for one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinDistribution {
    pub name: String,
    pub samples: Vec<f64>,
}

/// Monte Carlo estimate of the chance a variant has the best true rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinProbability {
    pub name: String,
    pub wins: u64,
    pub probability: f64,
}
