// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` struct and `ToastKind` enum
//! used throughout the notification system.

use crate::domain::ui::StatusVariant;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Unique identifier for a toast.
///
/// Drawn from a process-wide counter, so two toasts never share an id.
/// Displayed in base 36.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut buf = [0u8; 13];
        let mut pos = buf.len();
        let mut n = self.0;
        loop {
            pos -= 1;
            buf[pos] = DIGITS[(n % 36) as usize];
            n /= 36;
            if n == 0 {
                break;
            }
        }
        // Only ASCII digits and letters were written
        f.write_str(std::str::from_utf8(&buf[pos..]).map_err(|_| fmt::Error)?)
    }
}

/// Category of a toast; drives styling in the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Error,
    /// Something needs attention but nothing failed.
    Warning,
    /// Neutral information.
    #[default]
    Info,
}

impl ToastKind {
    /// Returns the lowercase kind name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a string that is not one of the four kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToastKind(pub String);

impl fmt::Display for UnknownToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown toast kind: {:?}", self.0)
    }
}

impl std::error::Error for UnknownToastKind {}

impl FromStr for ToastKind {
    type Err = UnknownToastKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(ToastKind::Success),
            "error" => Ok(ToastKind::Error),
            "warning" => Ok(ToastKind::Warning),
            "info" => Ok(ToastKind::Info),
            other => Err(UnknownToastKind(other.to_string())),
        }
    }
}

impl From<StatusVariant> for ToastKind {
    fn from(variant: StatusVariant) -> Self {
        match variant {
            StatusVariant::Success => ToastKind::Success,
            StatusVariant::Warning => ToastKind::Warning,
            StatusVariant::Error => ToastKind::Error,
            StatusVariant::Info => ToastKind::Info,
        }
    }
}

/// A toast to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    kind: ToastKind,
    title: String,
    description: Option<String>,
    created_at: Instant,
}

impl Toast {
    /// Creates a new toast stamped with `created_at`.
    pub fn new(
        kind: ToastKind,
        title: impl Into<String>,
        description: Option<String>,
        created_at: Instant,
    ) -> Self {
        Self {
            id: ToastId::new(),
            kind,
            title: title.into(),
            description,
            created_at,
        }
    }

    /// Returns the toast's unique ID.
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
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns when this toast was created.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_ids_are_unique() {
        let now = Instant::now();
        let t1 = Toast::new(ToastKind::Success, "a", None, now);
        let t2 = Toast::new(ToastKind::Success, "a", None, now);
        assert_ne!(t1.id(), t2.id());
        assert!(t2.id() > t1.id());
    }

    #[test]
    fn toast_id_displays_in_base36() {
        assert_eq!(ToastId(0).to_string(), "0");
        assert_eq!(ToastId(35).to_string(), "z");
        assert_eq!(ToastId(36).to_string(), "10");
        assert_eq!(ToastId(u64::MAX).to_string(), "3w5e11264sgsf");
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [
            ToastKind::Success,
            ToastKind::Error,
            ToastKind::Warning,
            ToastKind::Info,
        ] {
            assert_eq!(kind.as_str().parse::<ToastKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            "Success".parse::<ToastKind>(),
            Err(UnknownToastKind("Success".to_string()))
        );
        assert!("danger".parse::<ToastKind>().is_err());
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&ToastKind::Warning).expect("serialize");
        assert_eq!(json, "\"warning\"");
    }

    #[test]
    fn status_variant_maps_to_kind() {
        assert_eq!(ToastKind::from(StatusVariant::Error), ToastKind::Error);
        assert_eq!(ToastKind::from(StatusVariant::Info), ToastKind::Info);
    }

    #[test]
    fn toast_accessors() {
        let now = Instant::now();
        let toast = Toast::new(
            ToastKind::Warning,
            "Low stock",
            Some("3 items left".to_string()),
            now,
        );
        assert_eq!(toast.kind(), ToastKind::Warning);
        assert_eq!(toast.title(), "Low stock");
        assert_eq!(toast.description(), Some("3 items left"));
        assert_eq!(toast.created_at(), now);
    }
}
