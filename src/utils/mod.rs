// src/utils/mod.rs

//! Shared utility functions.

pub mod url;

pub use url::resolve;
