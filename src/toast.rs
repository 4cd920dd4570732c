//! Toast Notifications
//!
//! Transient messages shown after a mutation settles. The queue is plain
//! data; `AppContext::notify` schedules the auto-dismiss.

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub duration_ms: u32,
}

impl Toast {
    pub fn success(title: &str, description: &str, duration_ms: u32) -> Self {
        Self {
            id: 0,
            title: title.to_string(),
            description: description.to_string(),
            variant: ToastVariant::Default,
            duration_ms,
        }
    }

    /// Destructive toast carrying the error's message
    pub fn error(title: &str, err: &ApiError, duration_ms: u32) -> Self {
        Self {
            id: 0,
            title: title.to_string(),
            description: err.to_string(),
            variant: ToastVariant::Destructive,
            duration_ms,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u32,
}

impl ToastQueue {
    /// Enqueue and return the assigned id
    pub fn push(&mut self, mut toast: Toast) -> u32 {
        self.next_id += 1;
        toast.id = self.next_id;
        self.toasts.push(toast);
        self.next_id
    }

    pub fn dismiss(&mut self, id: u32) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }
}
