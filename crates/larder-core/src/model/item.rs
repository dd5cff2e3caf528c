// ── Item records ──
//
// `Item` is the server-persisted record. `ItemDraft` is what a user
// authors before creation, `NewItem` is the create payload, and
// `ItemPatch` is a partial edit merged over an existing item.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── ItemId ──────────────────────────────────────────────────────────

/// Server-assigned item identifier. Unique and immutable after creation;
/// the equality key for every reconciliation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

// ── Item ────────────────────────────────────────────────────────────

/// An item as the server knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    /// Decimal-formatted text, kept verbatim.
    pub price: String,
    pub available: bool,
    /// Image URI.
    pub image: String,
}

impl Item {
    /// Shallow field-by-field merge: fields present in `patch` win,
    /// absent fields keep this item's value. `id` and `available` are
    /// never touched.
    pub fn merged_with(&self, patch: &ItemPatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            price: patch.price.clone().unwrap_or_else(|| self.price.clone()),
            available: self.available,
            image: patch.image.clone().unwrap_or_else(|| self.image.clone()),
        }
    }
}

// ── ItemDraft ───────────────────────────────────────────────────────

/// User-authored fields for an item that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

// ── NewItem ─────────────────────────────────────────────────────────

/// Create payload: a draft with `available` decided by the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image: String,
}

impl From<ItemDraft> for NewItem {
    /// New items always start out available.
    fn from(draft: ItemDraft) -> Self {
        Self {
            name: draft.name,
            description: draft.description,
            price: draft.price,
            available: true,
            image: draft.image,
        }
    }
}

// ── ItemPatch ───────────────────────────────────────────────────────

/// A partial edit. `None` means "keep the target's current value",
/// never "clear the field".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
    }
}

impl From<ItemDraft> for ItemPatch {
    /// A full draft overwrites every editable field.
    fn from(draft: ItemDraft) -> Self {
        Self {
            name: Some(draft.name),
            description: Some(draft.description),
            price: Some(draft.price),
            image: Some(draft.image),
        }
    }
}
