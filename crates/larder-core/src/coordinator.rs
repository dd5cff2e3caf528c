// ── Mutation coordinator ──
//
// Orchestrates gateway calls and applies their results to the list
// cache, edit focus, and modal state. Every remote-backed operation is
// remote-first: the gateway call is awaited before any local write, and
// a failed call writes nothing.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::config::{CoordinatorConfig, EditFocusPolicy, FocusAfterUpdate};
use crate::error::CoreError;
use crate::gateway::{HttpGateway, ItemGateway};
use crate::model::{Item, ItemDraft, ItemId, ItemPatch, NewItem};
use crate::store::{EditFocus, ListCache, ModalState, ModalVisibility};
use crate::stream::ItemStream;

const FAILURE_CHANNEL_SIZE: usize = 64;

// ── Failure events ───────────────────────────────────────────────

/// The remote-backed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum MutationKind {
    LoadAll,
    Create,
    Update,
    Remove,
}

/// A transport failure, as published on the failure channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationFailure {
    pub kind: MutationKind,
    /// The targeted item, for update and remove.
    pub item_id: Option<ItemId>,
    pub message: String,
}

// ── MutationCoordinator ──────────────────────────────────────────

/// The entry point for presentation code.
///
/// Cheaply cloneable via `Arc<CoordinatorInner>`. Clones share state, so
/// operations may be issued concurrently; each applies its local change
/// when its own remote call resolves, in resolution order.
pub struct MutationCoordinator<G: ItemGateway> {
    inner: Arc<CoordinatorInner<G>>,
}

struct CoordinatorInner<G> {
    gateway: G,
    policy: EditFocusPolicy,
    cache: ListCache,
    focus: EditFocus,
    modals: ModalState,
    failure_tx: broadcast::Sender<Arc<MutationFailure>>,
}

impl<G: ItemGateway> Clone for MutationCoordinator<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl MutationCoordinator<HttpGateway> {
    /// Build a coordinator talking HTTP. Does NOT fetch anything --
    /// call [`load_all()`](Self::load_all) to populate the list.
    pub fn from_config(config: &CoordinatorConfig) -> Result<Self, CoreError> {
        let gateway = HttpGateway::new(&config.gateway)?;
        Ok(Self::new(gateway, config.focus))
    }
}

impl<G: ItemGateway> MutationCoordinator<G> {
    pub fn new(gateway: G, policy: EditFocusPolicy) -> Self {
        let (failure_tx, _) = broadcast::channel(FAILURE_CHANNEL_SIZE);

        Self {
            inner: Arc::new(CoordinatorInner {
                gateway,
                policy,
                cache: ListCache::new(),
                focus: EditFocus::new(),
                modals: ModalState::new(),
                failure_tx,
            }),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.inner.gateway
    }

    pub fn policy(&self) -> EditFocusPolicy {
        self.inner.policy
    }

    // ── Remote-backed operations ─────────────────────────────────

    /// Fetch the whole collection and overwrite the list with it.
    ///
    /// On failure the list keeps its previous contents.
    pub async fn load_all(&self) -> Result<Arc<Vec<Item>>, CoreError> {
        debug!("loading item list");

        let items = self
            .inner
            .gateway
            .fetch_all()
            .await
            .map_err(|e| self.report(MutationKind::LoadAll, None, e))?;

        let snapshot = self.inner.cache.replace_all(items);
        info!(count = snapshot.len(), "item list loaded");
        Ok(snapshot)
    }

    /// Create an item from `draft`. New items are always available.
    ///
    /// The server-returned item (with its assigned id) is appended.
    pub async fn create(&self, draft: ItemDraft) -> Result<Item, CoreError> {
        let payload = NewItem::from(draft);
        debug!(name = %payload.name, "creating item");

        let created = self
            .inner
            .gateway
            .create(&payload)
            .await
            .map_err(|e| self.report(MutationKind::Create, None, e))?;

        self.inner.cache.append(created.clone());
        info!(id = %created.id, "item created");
        Ok(created)
    }

    /// Focus `item` for editing and open the edit dialog. Purely local.
    pub fn request_edit(&self, item: Item) {
        debug!(id = %item.id, "edit requested");
        self.inner.focus.set(item);
        self.inner.modals.open_edit();
    }

    /// Update the focused item with `patch`.
    ///
    /// Fields absent from the patch keep the focused item's values. The
    /// list is updated with the item the server returns, not with the
    /// merged payload. Fails with [`CoreError::NoEditTarget`] when
    /// nothing is focused. On a transport failure the focus stays set so
    /// the edit can be retried.
    pub async fn update(&self, patch: ItemPatch) -> Result<Item, CoreError> {
        let Some(target) = self.inner.focus.current() else {
            error!("update called with no item focused for editing");
            return Err(CoreError::NoEditTarget {
                operation: "update",
            });
        };

        let merged = target.merged_with(&patch);
        debug!(id = %target.id, "updating item");

        let updated = self
            .inner
            .gateway
            .update(target.id, &merged)
            .await
            .map_err(|e| self.report(MutationKind::Update, Some(target.id), e))?;

        self.inner.cache.replace_by_id(updated.clone());
        self.apply_focus_after_update(target.id, &updated);
        info!(id = %updated.id, "item updated");
        Ok(updated)
    }

    /// Delete the item with `id`.
    pub async fn remove(&self, id: ItemId) -> Result<(), CoreError> {
        debug!(id = %id, "removing item");

        self.inner
            .gateway
            .delete(id)
            .await
            .map_err(|e| self.report(MutationKind::Remove, Some(id), e))?;

        self.inner.cache.remove_by_id(id);
        if self.inner.policy.clear_on_remove && self.inner.focus.clear_if(id) {
            self.inner.modals.close_edit();
            debug!(id = %id, "edit focus cleared after remove");
        }
        info!(id = %id, "item removed");
        Ok(())
    }

    // ── Local operations ─────────────────────────────────────────

    /// Drop the edit focus and close the edit dialog.
    pub fn clear_edit_focus(&self) -> Option<Item> {
        self.inner.modals.close_edit();
        self.inner.focus.clear()
    }

    pub fn toggle_add_modal(&self) -> bool {
        self.inner.modals.toggle_add()
    }

    pub fn toggle_edit_modal(&self) -> bool {
        self.inner.modals.toggle_edit()
    }

    // ── Read accessors ───────────────────────────────────────────

    pub fn list_snapshot(&self) -> Arc<Vec<Item>> {
        self.inner.cache.snapshot()
    }

    pub fn current_edit_focus(&self) -> Option<Item> {
        self.inner.focus.current()
    }

    pub fn modal_visibility(&self) -> ModalVisibility {
        self.inner.modals.current()
    }

    /// Number of list changes applied so far.
    pub fn list_version(&self) -> u64 {
        self.inner.cache.version()
    }

    /// Subscribe to list snapshots.
    pub fn items(&self) -> ItemStream {
        self.inner.cache.subscribe()
    }

    pub fn edit_focus(&self) -> watch::Receiver<Option<Item>> {
        self.inner.focus.subscribe()
    }

    pub fn modals(&self) -> watch::Receiver<ModalVisibility> {
        self.inner.modals.subscribe()
    }

    /// Subscribe to transport failures of all operations.
    pub fn failures(&self) -> broadcast::Receiver<Arc<MutationFailure>> {
        self.inner.failure_tx.subscribe()
    }

    // ── Private helpers ──────────────────────────────────────────

    fn apply_focus_after_update(&self, target: ItemId, updated: &Item) {
        match self.inner.policy.after_update {
            FocusAfterUpdate::Retain => {}
            FocusAfterUpdate::Refresh => {
                if updated.id == target {
                    self.inner.focus.refresh_if(updated.clone());
                }
            }
            FocusAfterUpdate::Clear => {
                if self.inner.focus.clear_if(target) {
                    self.inner.modals.close_edit();
                }
            }
        }
    }

    /// Log a failed remote call and publish it. Returns the error for `?`.
    fn report(&self, kind: MutationKind, item_id: Option<ItemId>, err: CoreError) -> CoreError {
        warn!(operation = %kind, item_id = ?item_id.map(ItemId::get), error = %err, "remote call failed");
        let failure = Arc::new(MutationFailure {
            kind,
            item_id,
            message: err.to_string(),
        });
        match self.inner.failure_tx.send(failure) {
            Ok(receivers) => debug!(receivers, "failure published"),
            Err(_) => debug!(operation = %kind, "failure not published: no subscribers"),
        }
        err
    }
}
