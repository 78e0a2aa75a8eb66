//! Transient notices ("toasts") shown after session events.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

/// How long a notice stays on screen.
pub const NOTICE_TTL_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

/// Notices currently on screen, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    pub items: Vec<(u64, Notice)>,
    next_id: u64,
}

impl NoticeState {
    /// Append `notice` and return its id for later dismissal.
    pub fn push(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push((id, notice));
        id
    }

    /// Remove the notice with `id`. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|(item_id, _)| *item_id != id);
    }
}
