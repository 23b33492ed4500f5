// src/pipeline/incremental.rs

//! Change-log-driven regeneration on top of the catalog generator.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::changelog::ChangeLog;
use crate::error::Result;
use crate::models::ChangeRecord;
use crate::pipeline::diff::{DiffCalculator, DiffResult};
use crate::pipeline::generate::{GenerationSummary, SitemapGenerator};

/// Result of an incremental regeneration call.
#[derive(Debug, Clone)]
pub enum IncrementalOutcome {
    /// The change log had no records since the given time; nothing was
    /// regenerated and nothing was written.
    NoChanges,
    /// The catalog was regenerated. The computed diff is exposed for
    /// callers that want it (notifications, reporting).
    Regenerated {
        diff: DiffResult,
        summary: GenerationSummary,
    },
}

impl IncrementalOutcome {
    /// Whether this outcome performed a regeneration pass.
    pub fn regenerated(&self) -> bool {
        matches!(self, Self::Regenerated { .. })
    }
}

/// Decides between full and incremental regeneration and keeps the change
/// log consistent with generation passes.
///
/// The coordinator takes no locks; callers that can trigger concurrent
/// passes must serialize calls themselves.
pub struct IncrementalCoordinator {
    generator: SitemapGenerator,
    change_log: Arc<dyn ChangeLog>,
    auto_track: bool,
}

impl IncrementalCoordinator {
    /// Create a coordinator over a generator and a change log.
    pub fn new(generator: SitemapGenerator, change_log: Arc<dyn ChangeLog>) -> Self {
        Self {
            generator,
            change_log,
            auto_track: false,
        }
    }

    /// Seed the change log with one add record per entry after each full
    /// pass, giving subsequent incremental calls a baseline.
    pub fn with_auto_track(mut self, auto_track: bool) -> Self {
        self.auto_track = auto_track;
        self
    }

    /// The underlying generator.
    pub fn generator(&self) -> &SitemapGenerator {
        &self.generator
    }

    /// Run a full generation pass.
    pub async fn generate_full(&self) -> Result<GenerationSummary> {
        let summary = self.generator.generate().await?;

        if self.auto_track {
            let now = Utc::now();
            let mut seeded = 0usize;
            for provider in self.generator.providers() {
                let mut source = provider.entries().await?;
                while let Some(entry) = source.next().await {
                    self.change_log
                        .track(ChangeRecord::add(entry?, now))
                        .await?;
                    seeded += 1;
                }
            }
            log::info!("Seeded change log with {} add records", seeded);
        }

        Ok(summary)
    }

    /// Regenerate if the change log has records with `timestamp >= since`.
    ///
    /// No records means no-op: nothing is regenerated or written. With
    /// records, the current provider output is materialized as the base
    /// state (there is no persisted snapshot of the catalog as of `since`),
    /// the diff is computed by replaying the change log, and a full
    /// regeneration pass runs regardless of diff contents. Partial shard
    /// rewrites are not performed; the diff is returned for inspection.
    pub async fn generate_incremental(&self, since: DateTime<Utc>) -> Result<IncrementalOutcome> {
        let changes = self.change_log.changes_since(Some(since)).await?;
        if changes.is_empty() {
            log::info!("No changes since {}, skipping regeneration", since);
            return Ok(IncrementalOutcome::NoChanges);
        }

        let mut base = Vec::new();
        for provider in self.generator.providers() {
            let mut source = provider.entries().await?;
            while let Some(entry) = source.next().await {
                base.push(entry?);
            }
        }

        let diff = DiffCalculator::new().calculate_from_changes(&base, &changes);
        log::info!(
            "Changes since {}: {} added, {} updated, {} removed",
            since,
            diff.added.len(),
            diff.updated.len(),
            diff.removed.len()
        );

        let summary = self.generator.generate().await?;
        Ok(IncrementalOutcome::Regenerated { diff, summary })
    }

    /// Record a domain change event directly.
    pub async fn track_change(&self, change: ChangeRecord) -> Result<()> {
        self.change_log.track(change).await
    }

    /// Fetch change records, optionally bounded by a start time.
    pub async fn changes_since(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ChangeRecord>> {
        self.change_log.changes_since(since).await
    }
}
