// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `ToastStore` keeps the visible toasts in display order (oldest first)
//! and retires each one a fixed time after it was added. Every toast gets
//! its own entry in a [`TimerQueue`]; the host calls [`ToastStore::tick`]
//! (or routes [`Message::Tick`]) to fire whatever is due.

use super::notification::{Toast, ToastId, ToastKind};
use super::scheduler::{Clock, SystemClock, TimerQueue};
use crate::diagnostics::{DiagnosticEvent, DiagnosticEventKind, DiagnosticsHandle, DismissReason};
use std::time::{Duration, Instant};

/// How long every toast stays visible.
pub const TOAST_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Messages for toast state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific toast by ID.
    Dismiss(ToastId),
    /// Tick for firing due auto-dismiss timers.
    Tick,
}

/// Owns the visible toasts and their auto-dismiss timers.
#[derive(Debug)]
pub struct ToastStore<C: Clock = SystemClock> {
    /// Visible toasts, oldest first.
    toasts: Vec<Toast>,
    /// One pending dismissal per toast ever added (not cancelled on manual dismiss).
    timers: TimerQueue<ToastId>,
    clock: C,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Default for ToastStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastStore<SystemClock> {
    /// Creates an empty store on the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> ToastStore<C> {
    /// Creates an empty store driven by `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            toasts: Vec::new(),
            timers: TimerQueue::new(),
            clock,
            diagnostics: None,
        }
    }

    /// Sets the diagnostics handle for recording toast activity.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Appends a toast and schedules its automatic dismissal.
    ///
    /// Warnings and errors are also recorded in diagnostics as such.
    pub fn add_toast(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        kind: ToastKind,
    ) -> ToastId {
        let now = self.clock.now();
        let toast = Toast::new(kind, title, description, now);
        let id = toast.id();

        self.record(
            DiagnosticEventKind::ToastShown {
                kind,
                title: toast.title().to_string(),
            },
            now,
        );
        let message = toast.title().to_string();
        match kind {
            ToastKind::Warning => self.record(DiagnosticEventKind::Warning { message }, now),
            ToastKind::Error => self.record(DiagnosticEventKind::Error { message }, now),
            ToastKind::Success | ToastKind::Info => {}
        }

        tracing::debug!(id = %id, kind = %kind, title = toast.title(), "toast added");
        self.toasts.push(toast);
        self.timers.schedule(now + TOAST_TIMEOUT, id);
        id
    }

    /// Adds a success toast.
    pub fn success(&mut self, title: impl Into<String>, description: Option<String>) -> ToastId {
        self.add_toast(title, description, ToastKind::Success)
    }

    /// Adds an error toast.
    pub fn error(&mut self, title: impl Into<String>, description: Option<String>) -> ToastId {
        self.add_toast(title, description, ToastKind::Error)
    }

    /// Adds a warning toast.
    pub fn warning(&mut self, title: impl Into<String>, description: Option<String>) -> ToastId {
        self.add_toast(title, description, ToastKind::Warning)
    }

    /// Adds an info toast.
    pub fn info(&mut self, title: impl Into<String>, description: Option<String>) -> ToastId {
        self.add_toast(title, description, ToastKind::Info)
    }

    /// Dismisses a toast by its ID.
    ///
    /// Returns `true` if the toast was found and removed. Unknown or already
    /// dismissed IDs are ignored.
    pub fn dismiss_toast(&mut self, id: ToastId) -> bool {
        self.remove(id, DismissReason::Manual)
    }

    /// Fires every auto-dismiss timer that is due.
    ///
    /// Returns the IDs that were actually removed; timers whose toast was
    /// already dismissed fire as no-ops.
    pub fn tick(&mut self) -> Vec<ToastId> {
        let now = self.clock.now();
        self.timers
            .pop_due(now)
            .into_iter()
            .filter(|id| self.remove(*id, DismissReason::Expired))
            .collect()
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss_toast(*id);
            }
            Message::Tick => {
                self.tick();
            }
        }
    }

    /// Returns the earliest pending auto-dismiss deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Returns the visible toasts, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Looks up a visible toast.
    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Removes every toast and pending timer.
    pub fn clear(&mut self) {
        self.toasts.clear();
        self.timers.clear();
    }

    fn remove(&mut self, id: ToastId, reason: DismissReason) -> bool {
        let Some(pos) = self.toasts.iter().position(|t| t.id() == id) else {
            return false;
        };
        self.toasts.remove(pos);
        self.record(DiagnosticEventKind::ToastDismissed { reason }, self.clock.now());
        tracing::debug!(id = %id, ?reason, "toast dismissed");
        true
    }

    /// Sends an event stamped with the store's clock.
    fn record(&self, kind: DiagnosticEventKind, at: Instant) {
        if let Some(handle) = &self.diagnostics {
            handle.send(DiagnosticEvent::with_timestamp(kind, at));
        }
    }
}
