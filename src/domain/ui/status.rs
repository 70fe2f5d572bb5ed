// SPDX-License-Identifier: MPL-2.0
//! Status badge classification.
//!
//! Record tables across the console (inventory, payroll, staff, lab orders)
//! show a free-text status in a colored badge. [`StatusVariant::classify`]
//! maps a status onto a closed set of badge variants using an explicit
//! table; anything outside the table is reported as [`UnknownStatus`]
//! instead of being guessed from substrings.

use std::fmt;
use std::str::FromStr;

/// Visual category of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusVariant {
    /// Finished or healthy state (green).
    Success,
    /// Needs attention soon (orange).
    Warning,
    /// Failed, blocked or inactive (red).
    Error,
    /// Neutral information (blue).
    Info,
}

/// Known statuses and their badge variant. Keys are normalized
/// (lowercase, single spaces).
const STATUS_TABLE: &[(&str, StatusVariant)] = &[
    ("active", StatusVariant::Success),
    ("approved", StatusVariant::Success),
    ("completed", StatusVariant::Success),
    ("delivered", StatusVariant::Success),
    ("in stock", StatusVariant::Success),
    ("paid", StatusVariant::Success),
    ("present", StatusVariant::Success),
    ("verified", StatusVariant::Success),
    ("awaiting results", StatusVariant::Warning),
    ("in progress", StatusVariant::Warning),
    ("late", StatusVariant::Warning),
    ("low stock", StatusVariant::Warning),
    ("on leave", StatusVariant::Warning),
    ("pending", StatusVariant::Warning),
    ("processing", StatusVariant::Warning),
    ("absent", StatusVariant::Error),
    ("cancelled", StatusVariant::Error),
    ("failed", StatusVariant::Error),
    ("inactive", StatusVariant::Error),
    ("out of stock", StatusVariant::Error),
    ("overdue", StatusVariant::Error),
    ("rejected", StatusVariant::Error),
    ("unpaid", StatusVariant::Error),
    ("draft", StatusVariant::Info),
    ("new", StatusVariant::Info),
    ("scheduled", StatusVariant::Info),
];

/// A status string that is not in the classification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status: {:?}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl StatusVariant {
    /// Classifies a status string.
    ///
    /// Matching ignores case, surrounding whitespace, repeated inner
    /// whitespace, and `-`/`_` separators (`"Out_of-stock"` matches
    /// `"out of stock"`). Partial matches are not accepted.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownStatus`] if the status is not a known one.
    pub fn classify(status: &str) -> Result<Self, UnknownStatus> {
        let key = normalize(status);
        STATUS_TABLE
            .iter()
            .find(|(known, _)| *known == key)
            .map(|(_, variant)| *variant)
            .ok_or_else(|| UnknownStatus(status.to_string()))
    }

    /// Classifies a status, falling back to [`StatusVariant::Info`].
    ///
    /// Unknown statuses are logged so they can be added to the table.
    #[must_use]
    pub fn classify_or_info(status: &str) -> Self {
        Self::classify(status).unwrap_or_else(|err| {
            tracing::warn!(status = %err.0, "unrecognized status, showing info badge");
            StatusVariant::Info
        })
    }

    /// Returns the lowercase variant name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusVariant::Success => "success",
            StatusVariant::Warning => "warning",
            StatusVariant::Error => "error",
            StatusVariant::Info => "info",
        }
    }
}

impl FromStr for StatusVariant {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::classify(s)
    }
}

impl fmt::Display for StatusVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(status: &str) -> String {
    status
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
