//! Run Configuration
//!
//! Options for a mutation run. Crate-wide switches (parallel variant
//! generation) are Cargo features instead.

use crate::select::{clock_seed, RandomSelector};

/// Whether spam operations edit the loaded tree or a copy of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationMode {
    /// Edit the holder's tree; successive rounds compound
    #[default]
    InPlace,
    /// Edit a fresh copy of the holder's tree; the loaded document is untouched
    Copy,
}

/// Options for `XmlHolder::run` and `generate_variants`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutatorConfig {
    /// RNG seed; None seeds from the system clock
    pub seed: Option<u64>,
    /// In-place or copy mutation
    pub mode: MutationMode,
    /// Spam operations applied per run (or per variant)
    pub rounds: usize,
    /// Number of independent variants for batch generation
    pub variants: usize,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        MutatorConfig {
            seed: None,
            mode: MutationMode::InPlace,
            rounds: 1,
            variants: 1,
        }
    }
}

impl MutatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the RNG seed for reproducible runs
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn mode(mut self, mode: MutationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn variants(mut self, variants: usize) -> Self {
        self.variants = variants;
        self
    }

    /// The configured seed, or one drawn from the clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }

    /// Selector for this configuration
    pub fn selector(&self) -> RandomSelector {
        RandomSelector::seeded(self.resolve_seed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MutatorConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.mode, MutationMode::InPlace);
        assert_eq!(config.rounds, 1);
        assert_eq!(config.variants, 1);
    }

    #[test]
    fn test_builder_chain() {
        let config = MutatorConfig::new()
            .seed(42)
            .mode(MutationMode::Copy)
            .rounds(5)
            .variants(3);
        assert_eq!(config.resolve_seed(), 42);
        assert_eq!(config.mode, MutationMode::Copy);
        assert_eq!(config.rounds, 5);
        assert_eq!(config.variants, 3);
    }

    #[test]
    fn test_seeded_selectors_agree() {
        use crate::dom::XmlTree;
        use crate::index::ElementIndex;

        let tree = XmlTree::parse(b"<a><b/><c/><d/></a>").unwrap();
        let index = ElementIndex::build(&tree);
        let config = MutatorConfig::new().seed(9);

        let mut first = config.selector();
        let mut second = config.selector();
        for _ in 0..10 {
            assert_eq!(first.select(&index).unwrap(), second.select(&index).unwrap());
        }
    }
}
