// ── List subscriptions ──
//
// Handed out by `ListCache::subscribe` so presentation code can redraw
// whenever a remote-confirmed change lands in the list.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::Item;

/// A subscription to the item list.
///
/// `seen` is the snapshot this subscriber last rendered; `latest()` peeks
/// at whatever the cache holds now without marking it seen.
pub struct ItemStream {
    seen: Arc<Vec<Item>>,
    rx: watch::Receiver<Arc<Vec<Item>>>,
}

impl ItemStream {
    pub(crate) fn new(rx: watch::Receiver<Arc<Vec<Item>>>) -> Self {
        let seen = Arc::clone(&rx.borrow());
        Self { seen, rx }
    }

    pub fn current(&self) -> &Arc<Vec<Item>> {
        &self.seen
    }

    pub fn latest(&self) -> Arc<Vec<Item>> {
        Arc::clone(&self.rx.borrow())
    }

    /// Suspend until the list changes and mark the new snapshot seen.
    /// `None` once the cache is gone.
    pub async fn changed(&mut self) -> Option<Arc<Vec<Item>>> {
        self.rx.changed().await.ok()?;
        self.seen = Arc::clone(&self.rx.borrow_and_update());
        Some(Arc::clone(&self.seen))
    }

    /// Adapt into a `Stream` of snapshots.
    pub fn into_stream(self) -> ItemWatchStream {
        ItemWatchStream {
            inner: WatchStream::new(self.rx),
        }
    }
}

/// Snapshot stream: the list as it is on first poll, then one snapshot
/// per change. Changes made between polls coalesce into the newest one.
pub struct ItemWatchStream {
    inner: WatchStream<Arc<Vec<Item>>>,
}

impl Stream for ItemWatchStream {
    type Item = Arc<Vec<Item>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
