//! Trailing debounce for value commits, keyed by field id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

/// Default quiescence window for coalescing value commits.
pub const DEFAULT_QUIESCENCE_WINDOW: Duration = Duration::from_millis(300);

/// Sink receiving the coalesced commits.
pub type CommitSink = Arc<dyn Fn(&str, Value) + Send + Sync>;

/// Coalesces rapid successive writes to the same field id so that a burst
/// of edits produces exactly one committed write, of the last value, after
/// the burst goes quiet. Commits for different field ids are independent.
///
/// Requires a running tokio runtime; each submission arms a timer task and
/// a newer submission for the same field supersedes the older one via a
/// per-field generation counter.
pub struct DebouncedCommitter {
    window: Duration,
    // Generations come from one monotonic counter shared across fields so
    // a number is never reused after its map entry is removed on commit.
    next_generation: AtomicU64,
    generations: Arc<Mutex<HashMap<String, u64>>>,
    sink: CommitSink,
}

impl DebouncedCommitter {
    pub fn new(window: Duration, sink: CommitSink) -> Self {
        Self {
            window,
            next_generation: AtomicU64::new(1),
            generations: Arc::new(Mutex::new(HashMap::new())),
            sink,
        }
    }

    /// Schedules `value` for commit after the quiescence window. If another
    /// submission for the same field arrives before the window elapses,
    /// this one is dropped (last write wins).
    pub fn submit(&self, field_id: &str, value: Value) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        self.generations
            .lock()
            .expect("debounce state lock")
            .insert(field_id.to_string(), generation);

        let window = self.window;
        let generations = Arc::clone(&self.generations);
        let sink = Arc::clone(&self.sink);
        let field = field_id.to_string();

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let current = {
                let mut guard = generations.lock().expect("debounce state lock");
                match guard.get(&field) {
                    Some(&latest) if latest == generation => {
                        guard.remove(&field);
                        true
                    }
                    _ => false,
                }
            };
            if current {
                debug!(%field, "committing debounced value");
                sink(&field, value);
            }
        });
    }

    /// True while at least one commit is pending.
    pub fn has_pending(&self) -> bool {
        !self.generations.lock().expect("debounce state lock").is_empty()
    }
}
