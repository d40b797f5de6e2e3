//! Shared types, error taxonomy and configuration for the A/B/N split-test
//! simulator.

pub mod config;
pub mod error;
pub mod types;

pub use config::SimulationConfig;
pub use error::{AbnError, AbnResult};
pub use types::{
    AllocationStrategy, ExperienceSpec, VariantSummary, WinDistribution, WinProbability,
};
