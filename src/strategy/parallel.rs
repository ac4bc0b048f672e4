//! Parallel Variant Generation
//!
//! Uses Rayon to produce several independently mutated copies of one tree.
//! Every worker owns its copy, its index snapshot and its RNG, so no
//! mutable state is shared between workers.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::MutatorConfig;
use crate::dom::XmlTree;
use crate::error::Result;
use crate::mutator::spam_rounds;
use crate::select::RandomSelector;

/// Build `config.variants` mutated copies of `tree`
///
/// Variant `n` applies `config.rounds` spam operations with an RNG seeded
/// from `seed + n`, so the output for a fixed seed does not depend on
/// scheduling. Variants are returned in order of `n`.
pub fn generate_variants(tree: &XmlTree, config: &MutatorConfig) -> Result<Vec<XmlTree>> {
    let seed = config.resolve_seed();
    let rounds = config.rounds;

    let build = |n: usize| -> Result<XmlTree> {
        let mut variant = tree.clone();
        let mut selector = RandomSelector::seeded(seed.wrapping_add(n as u64));
        spam_rounds(&mut variant, rounds, &mut selector)?;
        Ok(variant)
    };

    tracing::debug!(
        "Generating {} variants with {} rounds each (seed {})",
        config.variants,
        rounds,
        seed
    );

    #[cfg(feature = "parallel")]
    let variants = (0..config.variants).into_par_iter().map(build).collect();
    #[cfg(not(feature = "parallel"))]
    let variants = (0..config.variants).map(build).collect();
    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutator::SPAM_CLONES;

    #[test]
    fn test_generate_variants() {
        let tree = XmlTree::parse(b"<root><a/><b/><c/></root>").unwrap();
        let config = MutatorConfig::new().seed(10).rounds(2).variants(4);

        let variants = generate_variants(&tree, &config).unwrap();
        assert_eq!(variants.len(), 4);
        for variant in &variants {
            assert_eq!(variant.len(), 4 + 2 * SPAM_CLONES);
        }
        // Source tree is untouched
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.revision(), 0);
    }

    #[test]
    fn test_variants_are_deterministic() {
        let tree = XmlTree::parse(b"<root><a x=\"1\"/><b>t</b></root>").unwrap();
        let config = MutatorConfig::new().seed(123).rounds(3).variants(6);

        let first = generate_variants(&tree, &config).unwrap();
        let second = generate_variants(&tree, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_variant_matches_sequential_run() {
        let tree = XmlTree::parse(b"<root><a/><b/></root>").unwrap();
        let config = MutatorConfig::new().seed(50).rounds(2).variants(3);
        let variants = generate_variants(&tree, &config).unwrap();

        // Variant 2 uses seed 52
        let mut expected = tree.clone();
        spam_rounds(&mut expected, 2, &mut RandomSelector::seeded(52)).unwrap();
        assert_eq!(variants[2], expected);
    }

    #[test]
    fn test_zero_variants() {
        let tree = XmlTree::parse(b"<root/>").unwrap();
        let config = MutatorConfig::new().seed(1).variants(0);
        assert!(generate_variants(&tree, &config).unwrap().is_empty());
    }
}
