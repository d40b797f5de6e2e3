//! Monte Carlo win-probability from per-variant posterior samples.
//!
//! Round `i` compares the `i`-th sample of every variant; the highest draw
//! wins the round (ties to the earlier variant). A variant's win probability
//! is its share of rounds won.

use abn_core::{AbnError, AbnResult, WinDistribution, WinProbability};

pub fn win_probabilities(distributions: &[WinDistribution]) -> AbnResult<Vec<WinProbability>> {
    let rounds = distributions.first().map_or(0, |d| d.samples.len());
    if let Some(bad) = distributions.iter().find(|d| d.samples.len() != rounds) {
        return Err(AbnError::InvalidParameter(format!(
            "variant '{}' has {} samples, expected {rounds}",
            bad.name,
            bad.samples.len()
        )));
    }

    let mut wins = vec![0u64; distributions.len()];
    for round in 0..rounds {
        let mut best = 0;
        for (i, d) in distributions.iter().enumerate().skip(1) {
            if d.samples[round] > distributions[best].samples[round] {
                best = i;
            }
        }
        wins[best] += 1;
    }

    Ok(distributions
        .iter()
        .zip(wins)
        .map(|(d, wins)| WinProbability {
            name: d.name.clone(),
            wins,
            probability: if rounds > 0 {
                wins as f64 / rounds as f64
            } else {
                0.0
            },
        })
        .collect())
}
