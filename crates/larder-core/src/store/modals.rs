// ── Modal visibility ──
//
// Open/closed flags for the "add item" and "edit item" dialogs.

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalVisibility {
    pub add_open: bool,
    pub edit_open: bool,
}

pub struct ModalState {
    state: watch::Sender<ModalVisibility>,
}

impl ModalState {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ModalVisibility::default());
        Self { state }
    }

    pub fn current(&self) -> ModalVisibility {
        *self.state.borrow()
    }

    /// Flip the add dialog; returns the new value.
    pub fn toggle_add(&self) -> bool {
        let mut open = false;
        self.state.send_modify(|s| {
            s.add_open = !s.add_open;
            open = s.add_open;
        });
        open
    }

    /// Flip the edit dialog; returns the new value.
    pub fn toggle_edit(&self) -> bool {
        let mut open = false;
        self.state.send_modify(|s| {
            s.edit_open = !s.edit_open;
            open = s.edit_open;
        });
        open
    }

    pub fn open_edit(&self) {
        self.set_edit(true);
    }

    pub fn close_edit(&self) {
        self.set_edit(false);
    }

    pub fn subscribe(&self) -> watch::Receiver<ModalVisibility> {
        self.state.subscribe()
    }

    fn set_edit(&self, open: bool) {
        self.state.send_if_modified(|s| {
            let changed = s.edit_open != open;
            s.edit_open = open;
            changed
        });
    }
}

impl Default for ModalState {
    fn default() -> Self {
        Self::new()
    }
}
