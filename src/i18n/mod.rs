// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent `.ftl` files embedded at compile time. The active
//! locale comes from the CLI, then the config file, then the OS, and falls
//! back to `en-US`. Messages missing from the active locale fall back to
//! `en-US` before being reported as `MISSING: <key>`.

pub mod fluent;

pub use fluent::{resolve_locale, I18n, DEFAULT_LOCALE};
