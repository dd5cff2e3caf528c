// ── Edit focus ──
//
// Zero or one item under edit. `None` is "nothing focused" and is never
// represented by a placeholder record.

use tokio::sync::watch;

use crate::model::{Item, ItemId};

/// The single item currently targeted for an update, if any.
pub struct EditFocus {
    current: watch::Sender<Option<Item>>,
}

impl EditFocus {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self { current }
    }

    /// Focus `item`, silently abandoning any previous focus.
    pub fn set(&self, item: Item) {
        self.current.send_replace(Some(item));
    }

    /// Drop the focus, returning what was focused.
    pub fn clear(&self) -> Option<Item> {
        let mut previous = None;
        self.current.send_if_modified(|cur| {
            previous = cur.take();
            previous.is_some()
        });
        previous
    }

    pub fn current(&self) -> Option<Item> {
        self.current.borrow().clone()
    }

    /// Clear only if the focus targets `id`. Returns whether it did.
    pub fn clear_if(&self, id: ItemId) -> bool {
        self.current.send_if_modified(|cur| {
            if cur.as_ref().is_some_and(|item| item.id == id) {
                *cur = None;
                true
            } else {
                false
            }
        })
    }

    /// Swap in a newer version of the focused item, only if the focus
    /// still targets its id. Returns whether it did.
    pub fn refresh_if(&self, item: Item) -> bool {
        self.current.send_if_modified(|cur| match cur {
            Some(focused) if focused.id == item.id => {
                *focused = item;
                true
            }
            _ => false,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Item>> {
        self.current.subscribe()
    }
}

impl Default for EditFocus {
    fn default() -> Self {
        Self::new()
    }
}
