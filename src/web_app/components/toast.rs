// web_app/components/toast.rs - Transient notifications
//
// Toasts are short messages that dismiss themselves once their life has
// elapsed. The queue is plain data; the renderer only needs `active()`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default time a toast stays on screen
pub const DEFAULT_TOAST_LIFE_MS: u64 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
    pub life: Duration,
}

impl Toast {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + self.life
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// Ordered queue of toasts, oldest first
#[derive(Clone, Debug)]
pub struct ToastQueue {
    life: Duration,
    toasts: Vec<Toast>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(std::time::Duration::from_millis(DEFAULT_TOAST_LIFE_MS))
    }
}

impl ToastQueue {
    pub fn new(life: std::time::Duration) -> Self {
        let life = Duration::from_std(life)
            .unwrap_or_else(|_| Duration::milliseconds(DEFAULT_TOAST_LIFE_MS as i64));
        Self { life, toasts: Vec::new() }
    }

    /// Add a toast created now and return its id
    pub fn push(&mut self, severity: Severity, detail: impl Into<String>) -> Uuid {
        self.push_at(severity, detail, Utc::now())
    }

    pub fn push_at(&mut self, severity: Severity, detail: impl Into<String>, now: DateTime<Utc>) -> Uuid {
        let summary = match severity {
            Severity::Success => "Successful",
            Severity::Info => "Info",
            Severity::Warn => "Warning",
            Severity::Error => "Error",
        };

        let toast = Toast {
            id: Uuid::new_v4(),
            severity,
            summary: summary.to_string(),
            detail: detail.into(),
            created_at: now,
            life: self.life,
        };
        let id = toast.id;
        tracing::debug!("Toast {} [{}]: {}", id, severity, toast.detail);
        self.toasts.push(toast);
        id
    }

    pub fn success(&mut self, detail: impl Into<String>) -> Uuid {
        self.push(Severity::Success, detail)
    }

    pub fn error(&mut self, detail: impl Into<String>) -> Uuid {
        self.push(Severity::Error, detail)
    }

    /// Toasts still visible at `now`
    pub fn active(&self, now: DateTime<Utc>) -> Vec<Toast> {
        self.toasts
            .iter()
            .filter(|t| !t.is_expired(now))
            .cloned()
            .collect()
    }

    /// Drop expired toasts, returning how many were removed
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        before - self.toasts.len()
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        before != self.toasts.len()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
