//! Locally unique identifiers for journal entries.
//!
//! The sequential strategy combines an epoch captured once at construction
//! with a monotonic counter, so two entries minted in the same millisecond
//! still get distinct ids. The random strategy uses UUID v4.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// How identifiers are minted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `<epoch-millis-hex>-<counter>`. Unique within one process only: two
    /// processes that start in the same millisecond mint the same ids. Use
    /// [`IdGenerator::resume_after`] when continuing a saved sequence.
    #[default]
    Sequential,
    /// UUID v4 (128-bit random)
    Random,
}

/// Shared identifier source. Clones hand out ids from the same counter.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,
    epoch_ms: i64,
    counter: Arc<AtomicU64>,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            epoch_ms: chrono::Utc::now().timestamp_millis(),
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn sequential() -> Self {
        Self::new(IdStrategy::Sequential)
    }

    pub fn random() -> Self {
        Self::new(IdStrategy::Random)
    }

    /// Sequential generator with a fixed epoch (for deterministic ids in tests).
    pub fn with_epoch(epoch_ms: i64) -> Self {
        Self {
            strategy: IdStrategy::Sequential,
            epoch_ms,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Generator whose sequential epoch is later than every sequential id
    /// in `existing`, so a new process never repeats a saved id even if it
    /// starts in the same millisecond or the clock went backwards.
    pub fn resume_after<'a>(
        strategy: IdStrategy,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut ids = Self::new(strategy);
        if let Some(last) = existing.into_iter().filter_map(sequential_epoch).max() {
            ids.epoch_ms = ids.epoch_ms.max(last + 1);
        }
        ids
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Mint the next identifier.
    pub fn next_id(&self) -> String {
        match self.strategy {
            IdStrategy::Sequential => {
                let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
                format!("{:x}-{}", self.epoch_ms, n)
            }
            IdStrategy::Random => uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Epoch part of an id minted by the sequential strategy.
fn sequential_epoch(id: &str) -> Option<i64> {
    let (epoch, counter) = id.split_once('-')?;
    counter.parse::<u64>().ok()?;
    i64::from_str_radix(epoch, 16).ok()
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::sequential()
    }
}
