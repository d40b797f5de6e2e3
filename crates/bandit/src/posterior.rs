//! Beta posterior over a Bernoulli success rate.
//!
//! A uniform Beta(1, 1) prior updated with `k` successes out of `n` trials
//! gives Beta(k + 1, n - k + 1). Posteriors are cheap and rebuilt from the
//! ledger counts every time an estimate is requested.

use abn_core::{AbnError, AbnResult};
use rand::Rng;
use rand_distr::{Beta, Distribution};

pub use abn_core::types::DEFAULT_SAMPLES_PER_VARIANT;

#[derive(Debug, Clone)]
pub struct BetaPosterior {
    successes: u64,
    trials: u64,
    alpha: f64,
    beta: f64,
    dist: Beta<f64>,
}

impl BetaPosterior {
    pub fn estimate_distribution(successes: u64, trials: u64) -> AbnResult<Self> {
        if successes > trials {
            return Err(AbnError::InvalidParameter(format!(
                "successes ({successes}) exceed trials ({trials})"
            )));
        }
        let alpha = successes as f64 + 1.0;
        let beta = (trials - successes) as f64 + 1.0;
        let dist = Beta::new(alpha, beta).map_err(|e| {
            AbnError::InvalidParameter(format!("beta({alpha}, {beta}): {e}"))
        })?;
        Ok(Self {
            successes,
            trials,
            alpha,
            beta,
            dist,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Posterior mean `(k + 1) / (n + 2)`; defined even with no trials.
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Observed `k / n`, `None` before the first trial.
    pub fn empirical_rate(&self) -> Option<f64> {
        (self.trials > 0).then(|| self.successes as f64 / self.trials as f64)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.dist.sample(rng)
    }

    pub fn sample_n<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64> {
        (0..count).map(|_| self.dist.sample(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parameters_follow_laplace_smoothing() {
        let p = BetaPosterior::estimate_distribution(3, 10).unwrap();
        assert_eq!(p.alpha(), 4.0);
        assert_eq!(p.beta(), 8.0);
        assert_eq!(p.empirical_rate(), Some(0.3));
    }

    #[test]
    fn rejects_more_successes_than_trials() {
        assert!(matches!(
            BetaPosterior::estimate_distribution(11, 10),
            Err(AbnError::InvalidParameter(_))
        ));
    }

    #[test]
    fn empty_counts_give_uniform_prior() {
        let p = BetaPosterior::estimate_distribution(0, 0).unwrap();
        assert_eq!((p.alpha(), p.beta()), (1.0, 1.0));
        assert_eq!(p.mean(), 0.5);
        assert_eq!(p.empirical_rate(), None);

        let mut rng = StdRng::seed_from_u64(2024);
        let samples = p.sample_n(20_000, &mut rng);
        let mut buckets = [0usize; 10];
        for x in &samples {
            assert!((0.0..=1.0).contains(x));
            buckets[((x * 10.0) as usize).min(9)] += 1;
        }
        // Each decile should hold about 2000 draws.
        for count in buckets {
            assert!((1700..=2300).contains(&count), "bucket={count}");
        }
    }

    #[test]
    fn all_successes_concentrate_near_one() {
        let p = BetaPosterior::estimate_distribution(10, 10).unwrap();
        assert!((p.mean() - 11.0 / 12.0).abs() < 1e-12);

        let mut rng = StdRng::seed_from_u64(7);
        let samples = p.sample_n(10_000, &mut rng);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 11.0 / 12.0).abs() < 0.01, "mean={mean}");
        let above_07 = samples.iter().filter(|&&x| x > 0.7).count();
        assert!(above_07 as f64 / samples.len() as f64 > 0.95);
    }
}
