//! User-visible notices (toasts).
//!
//! DESIGN
//! ======
//! Session and page logic report outcomes through the [`Notifier`] seam; the
//! toast component renders whatever accumulates in [`NoticeState`].

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

impl NoticeLevel {
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Error => "toast--error",
            Self::Info => "toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }
}

/// Receives notices emitted by session and page logic.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Upper bound on toasts kept on screen; older ones fall off.
pub const MAX_VISIBLE_NOTICES: usize = 4;

/// Toast queue rendered by `components::toasts`.
#[derive(Clone, Debug, Default)]
pub struct NoticeState {
    pub items: Vec<(u64, Notice)>,
    next_id: u64,
}

impl NoticeState {
    /// Append a notice and return its id.
    pub fn push(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push((id, notice));
        if self.items.len() > MAX_VISIBLE_NOTICES {
            let overflow = self.items.len() - MAX_VISIBLE_NOTICES;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|(item_id, _)| *item_id != id);
    }

    #[must_use]
    pub fn last(&self) -> Option<&Notice> {
        self.items.last().map(|(_, notice)| notice)
    }
}
