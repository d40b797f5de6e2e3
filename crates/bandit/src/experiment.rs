//! Experiment driver — runs trials against a fixed set of experiences and
//! turns the resulting ledger into summaries and posterior samples.

use abn_core::{AbnError, AbnResult, ExperienceSpec, VariantSummary, WinDistribution};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, trace};

use crate::bernoulli::BernoulliSource;
use crate::ledger::Ledger;
use crate::policy::AllocationPolicy;
use crate::posterior::BetaPosterior;

/// One arm of the split test. The true rate is only used to simulate
/// outcomes; policies see nothing but the ledger.
#[derive(Debug, Clone)]
pub struct Experience {
    name: String,
    source: BernoulliSource,
}

impl Experience {
    pub fn new(name: impl Into<String>, rate: f64) -> AbnResult<Self> {
        Ok(Self {
            name: name.into(),
            source: BernoulliSource::new(rate)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rate(&self) -> f64 {
        self.source.p()
    }

    pub fn source(&self) -> &BernoulliSource {
        &self.source
    }
}

impl TryFrom<&ExperienceSpec> for Experience {
    type Error = AbnError;

    fn try_from(spec: &ExperienceSpec) -> AbnResult<Self> {
        Self::new(spec.name.clone(), spec.rate)
    }
}

/// Result of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    pub index: usize,
    pub outcome: bool,
}

pub struct Experiment<R = StdRng> {
    experiences: Vec<Experience>,
    ledger: Ledger,
    policy: Box<dyn AllocationPolicy>,
    rng: R,
}

impl Experiment<StdRng> {
    pub fn with_seed(
        experiences: Vec<Experience>,
        policy: Box<dyn AllocationPolicy>,
        seed: u64,
    ) -> AbnResult<Self> {
        Self::new(experiences, policy, StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Experiment<R> {
    pub fn new(
        experiences: Vec<Experience>,
        policy: Box<dyn AllocationPolicy>,
        rng: R,
    ) -> AbnResult<Self> {
        if experiences.is_empty() {
            return Err(AbnError::InvalidParameter(
                "an experiment needs at least one experience".to_string(),
            ));
        }
        for (i, exp) in experiences.iter().enumerate() {
            if experiences[..i].iter().any(|e| e.name == exp.name) {
                return Err(AbnError::InvalidParameter(format!(
                    "duplicate experience name '{}'",
                    exp.name
                )));
            }
        }

        let ledger = Ledger::new(experiences.iter().map(|e| e.name.clone()));
        debug!(
            experiences = experiences.len(),
            policy = policy.name(),
            "experiment created"
        );
        Ok(Self {
            experiences,
            ledger,
            policy,
            rng,
        })
    }

    pub fn experiences(&self) -> &[Experience] {
        &self.experiences
    }

    pub fn nexperiences(&self) -> usize {
        self.experiences.len()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn policy(&self) -> &dyn AllocationPolicy {
        self.policy.as_ref()
    }

    pub fn total_observations(&self) -> u64 {
        self.ledger.total_observations()
    }

    /// Ask the policy for a variant, draw its outcome and record it.
    pub fn run_trial(&mut self) -> AbnResult<Trial> {
        let index = self.policy.select(&self.ledger, &mut self.rng)?;
        let experience = self
            .experiences
            .get(index)
            .ok_or_else(|| AbnError::unknown_index(index, self.experiences.len()))?;
        let outcome = experience.source.draw_one(&mut self.rng);
        self.ledger.record_at(index, outcome)?;
        trace!(variant = %experience.name, outcome, "trial recorded");
        Ok(Trial { index, outcome })
    }

    /// Run `count` trials in order. Each trial sees the ledger left by the
    /// previous one.
    pub fn run_trials(&mut self, count: u64) -> AbnResult<()> {
        for _ in 0..count {
            self.run_trial()?;
        }
        info!(
            trials = count,
            total_observations = self.ledger.total_observations(),
            policy = self.policy.name(),
            "trials complete"
        );
        Ok(())
    }

    pub fn summarize(&self) -> Vec<VariantSummary> {
        self.experiences
            .iter()
            .enumerate()
            .map(|(index, exp)| {
                let trials = self.ledger.trial_count_at(index).unwrap_or_default();
                let successes = self.ledger.success_count_at(index).unwrap_or_default();
                let empirical_rate = if trials > 0 {
                    successes as f64 / trials as f64
                } else {
                    0.0
                };
                VariantSummary {
                    name: exp.name.clone(),
                    trials,
                    successes,
                    empirical_rate,
                }
            })
            .collect()
    }

    pub fn posterior(&self, index: usize) -> AbnResult<BetaPosterior> {
        BetaPosterior::estimate_distribution(
            self.ledger.success_count_at(index)?,
            self.ledger.trial_count_at(index)?,
        )
    }

    /// Draw `samples_per_variant` values from each variant's current posterior.
    pub fn estimate_win_distributions(
        &mut self,
        samples_per_variant: usize,
    ) -> AbnResult<Vec<WinDistribution>> {
        let mut out = Vec::with_capacity(self.experiences.len());
        for index in 0..self.experiences.len() {
            let posterior = self.posterior(index)?;
            out.push(WinDistribution {
                name: self.experiences[index].name.clone(),
                samples: posterior.sample_n(samples_per_variant, &mut self.rng),
            });
        }
        debug!(samples_per_variant, "posterior samples drawn");
        Ok(out)
    }

    /// Clear the ledger so the same experiences can be run again.
    pub fn reset(&mut self) {
        self.ledger.reset();
        debug!("experiment reset");
    }
}
