// src/lib.rs

//! Sitemapper Library
//!
//! Generates size-bounded sitemap shards plus an index document from
//! arbitrary URL providers, and keeps the catalog current through a
//! change-log-driven incremental pipeline.

pub mod changelog;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod serializer;
pub mod service;
pub mod storage;
pub mod utils;
