// ── Local session state ──
//
// The item list, the edit focus, and modal visibility. Each is an
// explicit object backed by a `watch` channel: writes are synchronous,
// readers take cheap snapshots or subscribe.

mod edit_focus;
mod list_cache;
mod modals;

pub use edit_focus::EditFocus;
pub use list_cache::ListCache;
pub use modals::{ModalState, ModalVisibility};
