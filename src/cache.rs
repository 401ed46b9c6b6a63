//! Read-through graph cache keyed by matrix content

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;

use crate::config::Config;
use crate::data::BinaryMatrix;
use crate::engine::build_group_graph;
use crate::error::Result;
use crate::graph::GraphPayload;

/// Per-key slot; its mutex serializes builds of one key
type Slot = Arc<Mutex<Option<Arc<GraphPayload>>>>;

/// Caches payloads per (matrix, config) fingerprint.
///
/// Concurrent callers with the same input compute it at most once. The map
/// shard is only locked long enough to fetch the key's slot, so a build never
/// runs under a shard lock. A build holds its slot mutex, so when the caller
/// is itself a rayon worker the build runs the sequential scans: a worker
/// blocked in a parallel scan could otherwise steal a task that waits on the
/// mutex it holds. Failed builds are not stored.
#[derive(Debug)]
pub struct GraphCache {
    config: Config,
    entries: DashMap<u64, Slot>,
}

impl GraphCache {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            entries: DashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return the cached payload for this matrix, building it on first use
    pub fn get_or_build(&self, matrix: &BinaryMatrix) -> Result<Arc<GraphPayload>> {
        let key = self.fingerprint(matrix);

        // Clone the slot out so the shard guard is dropped before building
        let slot: Slot = Arc::clone(self.entries.entry(key).or_default().value());

        let mut guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(hit) = guard.as_ref() {
            log::debug!("Graph cache hit for {:016x}", key);
            return Ok(Arc::clone(hit));
        }

        log::debug!("Graph cache miss for {:016x}", key);
        match build_group_graph(matrix, &self.build_config()) {
            Ok(payload) => {
                let payload = Arc::new(payload);
                *guard = Some(Arc::clone(&payload));
                drop(guard);
                // A failed build may have evicted this slot meanwhile
                self.entries.entry(key).or_insert_with(|| Arc::clone(&slot));
                Ok(payload)
            }
            Err(e) => {
                drop(guard);
                self.entries.remove_if(&key, |_, current| Arc::ptr_eq(current, &slot));
                Err(e)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    fn build_config(&self) -> Config {
        let mut config = self.config.clone();
        if rayon::current_thread_index().is_some() {
            config.parallel_threshold = usize::MAX;
        }
        config
    }

    fn fingerprint(&self, matrix: &BinaryMatrix) -> u64 {
        let mut hasher = DefaultHasher::new();
        matrix.fingerprint(&mut hasher);
        self.config.hash(&mut hasher);
        hasher.finish()
    }
}
