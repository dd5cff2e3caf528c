// ── Runtime coordinator configuration ──
//
// These types describe *where* the item server lives and *how* the edit
// focus reacts to successful mutations. They never touch disk; the
// `larder-config` crate builds a `CoordinatorConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Resource name used when none is configured.
pub const DEFAULT_RESOURCE: &str = larder_api::items::client::DEFAULT_RESOURCE;

/// Connection settings for the HTTP gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server base URL (e.g., `http://localhost:3333`).
    pub base_url: Url,
    /// Collection name appended to the base URL.
    pub resource: String,
    /// Sent as `X-API-KEY` when present.
    pub api_key: Option<SecretString>,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            resource: DEFAULT_RESOURCE.into(),
            api_key: None,
            timeout: None,
        }
    }
}

/// What happens to the edit focus after a successful update of the
/// focused item.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FocusAfterUpdate {
    /// Keep the pre-update item as the target.
    Retain,
    /// Point the focus at the server-returned item.
    #[default]
    Refresh,
    /// Drop the focus and close the edit modal.
    Clear,
}

/// Edit focus reactions to successful remote mutations.
///
/// Only applied while the focus still targets the mutated id, so a late
/// result never clobbers a newer edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditFocusPolicy {
    pub after_update: FocusAfterUpdate,
    /// Clear the focus when the focused item is deleted. `false` leaves a
    /// focus pointing at an item that is no longer cached.
    pub clear_on_remove: bool,
}

impl Default for EditFocusPolicy {
    fn default() -> Self {
        Self {
            after_update: FocusAfterUpdate::Refresh,
            clear_on_remove: true,
        }
    }
}

/// Everything needed to build a coordinator against an HTTP server.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub gateway: GatewayConfig,
    pub focus: EditFocusPolicy,
}

impl CoordinatorConfig {
    pub fn new(gateway: GatewayConfig) -> Self {
        Self {
            gateway,
            focus: EditFocusPolicy::default(),
        }
    }
}
