// SPDX-License-Identifier: MPL-2.0
//! Toast identity, severity, and the builder used to describe one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::Instant;

/// Unique identifier for a queued toast.
///
/// Ids are allocated from a process-wide counter and are never reused, so
/// an expiry racing a dismissal for the same slot can never target a
/// different toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl ToastId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Severity of a toast, used by frontends to pick styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
    Warning,
    Info,
}

/// Describes a toast before it is queued.
///
/// Built fluently and handed to [`ToastManager::push`]. Without an
/// explicit [`ttl`](Toast::ttl) the manager applies its configured
/// default duration.
///
/// [`ToastManager::push`]: super::ToastManager::push
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    kind: ToastKind,
    title: String,
    message: Option<String>,
    ttl: Option<Duration>,
    sticky: bool,
}

impl Toast {
    /// Creates a toast of the given kind.
    #[must_use]
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: None,
            ttl: None,
            sticky: false,
        }
    }

    /// Creates a success toast.
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    /// Creates an error toast.
    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    /// Creates a warning toast.
    #[must_use]
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, title)
    }

    /// Creates an info toast.
    #[must_use]
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title)
    }

    /// Attaches a longer body below the title.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Overrides the manager's default display duration.
    ///
    /// A zero duration expires on the next timer turn; the toast still
    /// shows up in at least one queue snapshot before it goes.
    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Keeps the toast up until it is dismissed explicitly.
    ///
    /// Takes precedence over [`ttl`](Self::ttl).
    #[must_use]
    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn requested_ttl(&self) -> Option<Duration> {
        self.ttl
    }

    #[must_use]
    pub fn is_sticky(&self) -> bool {
        self.sticky
    }
}

/// A toast that has been queued, with its identity and resolved timing.
///
/// `ttl` here is the effective display duration after the manager applied
/// defaults and the sticky flag; `None` means the entry never expires on
/// its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastEntry {
    id: ToastId,
    kind: ToastKind,
    title: String,
    message: Option<String>,
    created_at: Instant,
    ttl: Option<Duration>,
}

impl ToastEntry {
    pub(crate) fn new(id: ToastId, toast: Toast, ttl: Option<Duration>) -> Self {
        Self {
            id,
            kind: toast.kind,
            title: toast.title,
            message: toast.message,
            created_at: Instant::now(),
            ttl,
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// When the entry was queued.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Effective display duration; `None` for sticky entries.
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// How long the entry has been queued.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    #[must_use]
    pub fn is_sticky(&self) -> bool {
        self.ttl.is_none()
    }
}
