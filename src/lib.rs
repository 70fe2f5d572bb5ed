// SPDX-License-Identifier: MPL-2.0
//! `bizdesk` is the headless core of a small business admin console.
//!
//! It provides auto-dismissing toast notifications, card payment validation
//! (brand detection, Luhn, expiry, whole-form checks), status badge
//! classification, a persisted login gate, Fluent localization and
//! user preference management.

#![doc(html_root_url = "https://docs.rs/bizdesk/0.3.0")]

pub mod app;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod ui;
