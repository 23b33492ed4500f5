// src/pipeline/mod.rs

//! Pipeline entry points for catalog generation.
//!
//! - `SitemapGenerator`: providers → shards → storage writes → index write
//! - `DiffCalculator`: what changed between two catalog states
//! - `IncrementalCoordinator`: change-log-driven regeneration on top of both

pub mod diff;
pub mod generate;
pub mod incremental;

pub use diff::{DiffCalculator, DiffResult, calculate_diff};
pub use generate::{GenerationSummary, SitemapGenerator};
pub use incremental::{IncrementalCoordinator, IncrementalOutcome};
