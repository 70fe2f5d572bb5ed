// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! This module provides the central collector that receives events from
//! various parts of the application and keeps the most recent ones.

use std::collections::VecDeque;
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{DiagnosticEvent, DiagnosticEventKind, UserAction};
use crate::config::{
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, MAX_DIAGNOSTICS_BUFFER_CAPACITY,
    MIN_DIAGNOSTICS_BUFFER_CAPACITY,
};

/// Channel capacity between handles and the collector.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Events are sent via a bounded channel so callers never block.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Sends an event stamped now, dropping it if the channel is full.
    pub fn log(&self, kind: DiagnosticEventKind) {
        self.send(DiagnosticEvent::new(kind));
    }

    /// Sends a pre-stamped event, dropping it if the channel is full.
    pub fn send(&self, event: DiagnosticEvent) {
        let _ = self.event_tx.try_send(event);
    }

    /// Logs a user action event.
    pub fn log_action(&self, action: UserAction) {
        self.log(DiagnosticEventKind::UserAction { action });
    }

    /// Logs a warning message.
    pub fn log_warning(&self, message: impl Into<String>) {
        self.log(DiagnosticEventKind::Warning {
            message: message.into(),
        });
    }

    /// Logs an error message.
    pub fn log_error(&self, message: impl Into<String>) {
        self.log(DiagnosticEventKind::Error {
            message: message.into(),
        });
    }
}

/// One event in an exported report.
#[derive(Debug, Serialize)]
struct SerializableEvent<'a> {
    /// Milliseconds since collection started.
    elapsed_ms: u64,
    #[serde(flatten)]
    kind: &'a DiagnosticEventKind,
}

/// Exported report layout.
#[derive(Debug, Serialize)]
struct Report<'a> {
    collection_started_at: DateTime<Utc>,
    event_count: usize,
    events: Vec<SerializableEvent<'a>>,
}

/// Owns the event buffer and the receiving end of the event channel.
///
/// Once `capacity` events are stored, each new event evicts the oldest.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    events: VecDeque<DiagnosticEvent>,
    capacity: usize,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    collection_started_at: Instant,
    collection_started_at_utc: DateTime<Utc>,
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
    }
}

impl DiagnosticsCollector {
    /// Creates a collector holding at most `capacity` events.
    ///
    /// The capacity is clamped to the configured bounds.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity =
            capacity.clamp(MIN_DIAGNOSTICS_BUFFER_CAPACITY, MAX_DIAGNOSTICS_BUFFER_CAPACITY);
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Processes all pending events from the channel.
    ///
    /// Call this periodically (e.g., on each UI tick) to drain the
    /// event channel and store events in the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.store(event);
        }
    }

    /// Stores an event directly, bypassing the channel.
    pub fn log(&mut self, kind: DiagnosticEventKind) {
        self.store(DiagnosticEvent::new(kind));
    }

    fn store(&mut self, event: DiagnosticEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Returns stored events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.events.iter()
    }

    /// Maximum number of events kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops all stored events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Drains pending events and renders the buffer as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&mut self) -> serde_json::Result<String> {
        self.process_pending();
        let started = self.collection_started_at;
        let events: Vec<_> = self
            .events
            .iter()
            .map(|event| SerializableEvent {
                elapsed_ms: u64::try_from(
                    event.timestamp.saturating_duration_since(started).as_millis(),
                )
                .unwrap_or(u64::MAX),
                kind: &event.kind,
            })
            .collect();
        let report = Report {
            collection_started_at: self.collection_started_at_utc,
            event_count: events.len(),
            events,
        };
        serde_json::to_string_pretty(&report)
    }
}
