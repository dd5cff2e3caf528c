//! State-synchronization core between `larder-api` and UI consumers.
//!
//! This crate owns the domain model and the local state that mirrors a
//! remote item collection:
//!
//! - **[`MutationCoordinator`]**: Central facade. Every mutation is
//!   *remote-first*: the [`ItemGateway`] call is awaited before the local
//!   [`ListCache`] or [`EditFocus`] changes, so unconfirmed data is never
//!   presented as authoritative. Transport failures are returned to the
//!   caller and published on [`failures()`](MutationCoordinator::failures).
//!
//! - **[`ListCache`]**: Ordered item list published through a
//!   `tokio::sync::watch` channel. Mutators return the new snapshot.
//!
//! - **[`EditFocus`]** / **[`ModalState`]**: The single item under edit
//!   and the open/closed state of the add and edit modals.
//!
//! - **[`ItemStream`]**: Subscription handle for reactive rendering,
//!   exposing `current()` / `latest()` / `changed()`.
//!
//! - **[`ItemGateway`]**: Seam to the remote resource. [`HttpGateway`]
//!   adapts [`larder_api::ItemsClient`]; tests substitute their own.

pub mod config;
pub mod convert;
pub mod coordinator;
pub mod error;
pub mod gateway;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CoordinatorConfig, EditFocusPolicy, FocusAfterUpdate, GatewayConfig};
pub use coordinator::{MutationCoordinator, MutationFailure, MutationKind};
pub use error::CoreError;
pub use gateway::{HttpGateway, ItemGateway};
pub use model::{Item, ItemDraft, ItemId, ItemPatch, NewItem};
pub use store::{EditFocus, ListCache, ModalState, ModalVisibility};
pub use stream::ItemStream;
