use serde::Deserialize;

use crate::error::{AbnError, AbnResult};
use crate::types::{AllocationStrategy, ExperienceSpec, DEFAULT_SAMPLES_PER_VARIANT};

/// Environment prefix for every simulation setting, e.g. `ABN_SIM__TRIALS=10000`.
pub const ENV_PREFIX: &str = "ABN_SIM";

/// Root simulation configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `ABN_SIM__`.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the experiment's random source. Seeding is the caller's job;
    /// the same seed replays the same run.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_trials")]
    pub trials: u64,
    #[serde(default = "default_samples_per_variant")]
    pub samples_per_variant: usize,
    #[serde(default)]
    pub strategy: AllocationStrategy,
    #[serde(default = "default_experiences")]
    pub experiences: Vec<ExperienceSpec>,
}

fn default_seed() -> u64 {
    42
}
fn default_trials() -> u64 {
    5000
}
fn default_samples_per_variant() -> usize {
    DEFAULT_SAMPLES_PER_VARIANT
}
fn default_experiences() -> Vec<ExperienceSpec> {
    vec![
        ExperienceSpec::new("control", 0.05),
        ExperienceSpec::new("test", 0.08),
        ExperienceSpec::new("other", 0.06),
    ]
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            trials: default_trials(),
            samples_per_variant: default_samples_per_variant(),
            strategy: AllocationStrategy::default(),
            experiences: default_experiences(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from an optional config file and the environment.
    /// Environment values win over the file. A named file must exist and
    /// every value present must parse; nothing falls back to a default.
    pub fn load(path: Option<&str>) -> AbnResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from TOML text, without consulting the environment.
    pub fn from_toml_str(toml: &str) -> AbnResult<Self> {
        Ok(config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }

    pub fn validate(&self) -> AbnResult<()> {
        if self.experiences.is_empty() {
            return Err(AbnError::InvalidParameter(
                "at least one experience is required".to_string(),
            ));
        }
        if let AllocationStrategy::EpsilonGreedy { decay } = self.strategy {
            if !(decay.is_finite() && decay > 0.0) {
                return Err(AbnError::InvalidParameter(format!(
                    "decay must be a positive finite number, got {decay}"
                )));
            }
        }
        Ok(())
    }
}
