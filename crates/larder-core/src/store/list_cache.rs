// ── Ordered item list ──
//
// Insertion-ordered `Vec` behind a `watch` channel. Every real change
// publishes a fresh `Arc` snapshot and bumps a version counter; no-op
// calls publish nothing.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::model::{Item, ItemId};
use crate::stream::ItemStream;

/// The local authoritative view of all known items.
///
/// Holds at most one item per id as long as appended items carry fresh
/// server-assigned ids. Mutators never issue remote calls and return the
/// snapshot they produced.
pub struct ListCache {
    snapshot: watch::Sender<Arc<Vec<Item>>>,
    version: watch::Sender<u64>,
}

impl ListCache {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(items));
        let (version, _) = watch::channel(0u64);
        Self { snapshot, version }
    }

    /// Full overwrite, not a merge.
    pub fn replace_all(&self, items: Vec<Item>) -> Arc<Vec<Item>> {
        self.snapshot.send_replace(Arc::new(items));
        self.bump_version();
        self.snapshot()
    }

    /// Add to the end. Does not deduplicate.
    pub fn append(&self, item: Item) -> Arc<Vec<Item>> {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot
            .send_modify(|snap| Arc::make_mut(snap).push(item));
        self.bump_version();
        self.snapshot()
    }

    /// Substitute the first item with the same id, keeping its position.
    /// No match leaves the list untouched.
    pub fn replace_by_id(&self, item: Item) -> Arc<Vec<Item>> {
        let id = item.id;
        let modified = self.snapshot.send_if_modified(|snap| {
            let Some(pos) = snap.iter().position(|i| i.id == item.id) else {
                return false;
            };
            match Arc::make_mut(snap).get_mut(pos) {
                Some(slot) => {
                    *slot = item;
                    true
                }
                None => false,
            }
        });

        if modified {
            self.bump_version();
        } else {
            debug!(id = %id, "replace skipped: item not cached");
        }
        self.snapshot()
    }

    /// Drop every item with this id without reordering the rest.
    /// No match leaves the list untouched.
    pub fn remove_by_id(&self, id: ItemId) -> Arc<Vec<Item>> {
        let modified = self.snapshot.send_if_modified(|snap| {
            if !snap.iter().any(|i| i.id == id) {
                return false;
            }
            Arc::make_mut(snap).retain(|i| i.id != id);
            true
        });

        if modified {
            self.bump_version();
        } else {
            debug!(id = %id, "remove skipped: item not cached");
        }
        self.snapshot()
    }

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Item>> {
        self.snapshot.borrow().clone()
    }

    pub fn get(&self, id: ItemId) -> Option<Item> {
        self.snapshot.borrow().iter().find(|i| i.id == id).cloned()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.snapshot.borrow().iter().any(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }

    /// Number of changes applied so far.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub fn subscribe(&self) -> ItemStream {
        ItemStream::new(self.snapshot.subscribe())
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

impl Default for ListCache {
    fn default() -> Self {
        Self::new()
    }
}
