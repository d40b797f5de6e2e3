//! Allocation policies — uniform N-way split and decaying epsilon-greedy.

use abn_core::{AbnError, AbnResult, AllocationStrategy};
use rand::{Rng, RngCore};
use tracing::trace;

use crate::ledger::Ledger;

/// Chooses which variant index receives the next trial.
pub trait AllocationPolicy: std::fmt::Debug {
    fn select(&self, ledger: &Ledger, rng: &mut dyn RngCore) -> AbnResult<usize>;

    fn name(&self) -> &'static str;
}

fn uniform_index(ledger: &Ledger, rng: &mut dyn RngCore) -> AbnResult<usize> {
    if ledger.is_empty() {
        return Err(AbnError::UnknownVariant(
            "no variants registered".to_string(),
        ));
    }
    Ok(rng.gen_range(0..ledger.len()))
}

/// Stateless N-way split: every variant equally likely on every trial.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSplit;

impl AllocationPolicy for UniformSplit {
    fn select(&self, ledger: &Ledger, rng: &mut dyn RngCore) -> AbnResult<usize> {
        uniform_index(ledger, rng)
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

/// Epsilon-greedy with `epsilon = decay / (N + decay)`, where `N` is the
/// total number of observations recorded so far. Higher decay means a
/// slower hand-over from exploring to harvesting.
#[derive(Debug, Clone, Copy)]
pub struct EpsilonGreedy {
    decay: f64,
}

impl EpsilonGreedy {
    pub fn new(decay: f64) -> AbnResult<Self> {
        if !(decay.is_finite() && decay > 0.0) {
            return Err(AbnError::InvalidParameter(format!(
                "decay must be a positive finite number, got {decay}"
            )));
        }
        Ok(Self { decay })
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn epsilon(&self, observations: u64) -> f64 {
        self.decay / (observations as f64 + self.decay)
    }

    /// Index of the best empirical rate among variants with at least one
    /// trial. Ties go to the lowest index. `None` if nothing was sampled yet.
    pub fn best_observed(&self, ledger: &Ledger) -> AbnResult<Option<usize>> {
        let mut best: Option<(usize, f64)> = None;
        for index in 0..ledger.len() {
            let Some(rate) = ledger.empirical_rate_at(index)? else {
                continue;
            };
            match best {
                Some((_, best_rate)) if rate <= best_rate => {}
                _ => best = Some((index, rate)),
            }
        }
        Ok(best.map(|(index, _)| index))
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self {
            decay: abn_core::types::DEFAULT_DECAY,
        }
    }
}

impl AllocationPolicy for EpsilonGreedy {
    fn select(&self, ledger: &Ledger, rng: &mut dyn RngCore) -> AbnResult<usize> {
        let epsilon = self.epsilon(ledger.total_observations());
        if rng.gen::<f64>() > epsilon {
            if let Some(index) = self.best_observed(ledger)? {
                trace!(index, epsilon, "exploit");
                return Ok(index);
            }
        }
        let index = uniform_index(ledger, rng)?;
        trace!(index, epsilon, "explore");
        Ok(index)
    }

    fn name(&self) -> &'static str {
        "epsilon_greedy"
    }
}

/// Build the policy described by a configured strategy.
pub fn from_strategy(strategy: &AllocationStrategy) -> AbnResult<Box<dyn AllocationPolicy>> {
    Ok(match *strategy {
        AllocationStrategy::Uniform => Box::new(UniformSplit),
        AllocationStrategy::EpsilonGreedy { decay } => Box::new(EpsilonGreedy::new(decay)?),
    })
}
