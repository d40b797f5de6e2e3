//! Outcome ledger — append-only per-variant record of binary outcomes.
//!
//! Entries are sized once, at construction, and addressed by the variant's
//! registration index; name lookups resolve against the registered names.

use abn_core::{AbnError, AbnResult};

#[derive(Debug, Clone, Default)]
struct LedgerEntry {
    outcomes: Vec<bool>,
    successes: u64,
}

impl LedgerEntry {
    fn push(&mut self, outcome: bool) {
        self.outcomes.push(outcome);
        if outcome {
            self.successes += 1;
        }
    }

    fn trials(&self) -> u64 {
        self.outcomes.len() as u64
    }
}

#[derive(Debug, Clone)]
pub struct Ledger {
    names: Vec<String>,
    entries: Vec<LedgerEntry>,
    total: u64,
}

impl Ledger {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let entries = vec![LedgerEntry::default(); names.len()];
        Self {
            names,
            entries,
            total: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn index_of(&self, name: &str) -> AbnResult<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| AbnError::UnknownVariant(name.to_string()))
    }

    fn entry(&self, index: usize) -> AbnResult<&LedgerEntry> {
        self.entries
            .get(index)
            .ok_or_else(|| AbnError::unknown_index(index, self.entries.len()))
    }

    pub fn record(&mut self, name: &str, outcome: bool) -> AbnResult<()> {
        let index = self.index_of(name)?;
        self.record_at(index, outcome)
    }

    pub fn record_at(&mut self, index: usize, outcome: bool) -> AbnResult<()> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| AbnError::unknown_index(index, len))?;
        entry.push(outcome);
        self.total += 1;
        Ok(())
    }

    pub fn trial_count(&self, name: &str) -> AbnResult<u64> {
        self.trial_count_at(self.index_of(name)?)
    }

    pub fn trial_count_at(&self, index: usize) -> AbnResult<u64> {
        Ok(self.entry(index)?.trials())
    }

    pub fn success_count(&self, name: &str) -> AbnResult<u64> {
        self.success_count_at(self.index_of(name)?)
    }

    pub fn success_count_at(&self, index: usize) -> AbnResult<u64> {
        Ok(self.entry(index)?.successes)
    }

    pub fn outcomes(&self, name: &str) -> AbnResult<&[bool]> {
        let index = self.index_of(name)?;
        Ok(&self.entry(index)?.outcomes)
    }

    pub fn total_observations(&self) -> u64 {
        self.total
    }

    /// `successes / trials`, or `None` when the variant has not been sampled.
    pub fn empirical_rate_at(&self, index: usize) -> AbnResult<Option<f64>> {
        let entry = self.entry(index)?;
        Ok(match entry.trials() {
            0 => None,
            n => Some(entry.successes as f64 / n as f64),
        })
    }

    /// Like [`Ledger::empirical_rate_at`], but a zero-trial variant is an error.
    pub fn require_rate_at(&self, index: usize) -> AbnResult<f64> {
        self.empirical_rate_at(index)?.ok_or_else(|| {
            AbnError::DivisionUndefined(format!(
                "variant '{}' has no recorded trials",
                self.names[index]
            ))
        })
    }

    /// Clear every entry, keeping all registrations.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.outcomes.clear();
            entry.successes = 0;
        }
        self.total = 0;
    }
}
