// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.
//!
//! This module defines the events captured while the console runs, so a
//! report can show what the user was doing when something went wrong.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::ui::notifications::ToastKind;

/// User-initiated actions that can be captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum UserAction {
    /// A user logged in.
    Login,
    /// The current user logged out.
    Logout,
    /// A card payment form was submitted for validation.
    SubmitPaymentForm {
        /// Whether every field passed.
        valid: bool,
    },
}

/// Why a toast left the screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// The user closed it.
    Manual,
    /// Its auto-dismiss timer fired.
    Expired,
}

/// A timestamped diagnostic event.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    /// Creates a new diagnostic event with a specific timestamp.
    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A user action.
    UserAction {
        /// What the user did.
        action: UserAction,
    },
    /// A toast was shown.
    ToastShown {
        /// Toast category.
        kind: ToastKind,
        /// Toast title.
        title: String,
    },
    /// A toast was removed.
    ToastDismissed {
        /// Why it went away.
        reason: DismissReason,
    },
    /// A recoverable problem.
    Warning {
        /// Human-readable message.
        message: String,
    },
    /// A failure shown to the user.
    Error {
        /// Human-readable message.
        message: String,
    },
}
