//! Bernoulli outcome source — one binary success/failure per simulated visit.

use abn_core::{AbnError, AbnResult};
use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;

/// Draws binary outcomes for a fixed success probability.
#[derive(Debug, Clone, Copy)]
pub struct BernoulliSource {
    p: f64,
    dist: Bernoulli,
}

impl BernoulliSource {
    pub fn new(p: f64) -> AbnResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(AbnError::InvalidParameter(format!(
                "success probability must be in [0, 1], got {p}"
            )));
        }
        let dist = Bernoulli::new(p).map_err(|e| AbnError::InvalidParameter(e.to_string()))?;
        Ok(Self { p, dist })
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn draw_one<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        self.dist.sample(rng)
    }

    pub fn draw_many<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<bool> {
        (0..n).map(|_| self.dist.sample(rng)).collect()
    }
}

/// Single draw from Bernoulli(`p`).
pub fn draw_one<R: Rng + ?Sized>(p: f64, rng: &mut R) -> AbnResult<bool> {
    Ok(BernoulliSource::new(p)?.draw_one(rng))
}

/// `n` independent draws from Bernoulli(`p`).
pub fn draw_many<R: Rng + ?Sized>(p: f64, n: usize, rng: &mut R) -> AbnResult<Vec<bool>> {
    Ok(BernoulliSource::new(p)?.draw_many(n, rng))
}
