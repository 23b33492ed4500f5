// src/models/mod.rs

//! Domain models for the sitemap generator.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod change;
mod entry;
mod index;

// Re-export all public types
pub use change::{ChangeKind, ChangeRecord};
pub use entry::{Alternate, ChangeFrequency, Entry, Image, NewsMetadata, Video};
pub use index::IndexEntry;
