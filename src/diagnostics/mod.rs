// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting activity reports.
//!
//! Events (toasts shown and dismissed, warnings, errors, user actions) are
//! captured during a session, kept in a memory-bounded queue, and can be
//! exported as JSON for troubleshooting.
//!
//! # Architecture
//!
//! - [`DiagnosticEvent`]: Timestamped event with a [`DiagnosticEventKind`]
//! - [`DiagnosticsCollector`]: Owns the bounded queue; hands out [`DiagnosticsHandle`]s

mod collector;
mod events;

pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, DismissReason, UserAction};
