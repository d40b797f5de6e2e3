//! Split-test bandit engine — Bernoulli outcome simulation, an append-only
//! outcome ledger, uniform and epsilon-greedy allocation, Beta posteriors and
//! Monte Carlo win-probability estimation.

pub mod bernoulli;
pub mod experiment;
pub mod ledger;
pub mod policy;
pub mod posterior;
pub mod tournament;

pub use bernoulli::BernoulliSource;
pub use experiment::{Experience, Experiment, Trial};
pub use ledger::Ledger;
pub use policy::{AllocationPolicy, EpsilonGreedy, UniformSplit};
pub use posterior::{BetaPosterior, DEFAULT_SAMPLES_PER_VARIANT};
pub use tournament::win_probabilities;
