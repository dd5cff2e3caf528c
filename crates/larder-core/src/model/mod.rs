// ── Domain model ──
//
// Canonical item types shared by the store, the gateway, and consumers.

pub mod item;

pub use item::{Item, ItemDraft, ItemId, ItemPatch, NewItem};
