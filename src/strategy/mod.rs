//! Mutation Strategy Module
//!
//! Drivers that apply the spam mutation at scale:
//! - Parallel variants: many independent mutated copies of one document

pub mod parallel;

pub use parallel::generate_variants;
