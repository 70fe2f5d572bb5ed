// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Toasts are short-lived messages that inform users about actions (record
//! saved, payment failed, session expired) without blocking interaction.
//! Rendering belongs to the host UI; this module owns the list and the
//! timing.
//!
//! # Components
//!
//! - [`notification`] - Core `Toast` struct with its `ToastKind`
//! - [`manager`] - `ToastStore` for ordering and lifecycle management
//! - [`scheduler`] - Timer queue and clocks behind auto-dismiss
//!
//! # Usage
//!
//! ```
//! use bizdesk::ui::notifications::{ManualClock, ToastStore};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut toasts = ToastStore::with_clock(clock.clone());
//!
//! toasts.success("Invoice saved", None);
//! assert_eq!(toasts.len(), 1);
//!
//! clock.advance(Duration::from_secs(5));
//! toasts.tick();
//! assert!(toasts.is_empty());
//! ```
//!
//! # Design Considerations
//!
//! - Every toast lives for exactly [`TOAST_TIMEOUT`] (5 seconds)
//! - Display order is insertion order, oldest first
//! - Dismissing early leaves the timer in place; it later fires as a no-op

mod manager;
mod notification;
pub mod scheduler;

pub use manager::{Message as NotificationMessage, ToastStore, TOAST_TIMEOUT};
pub use notification::{Toast, ToastId, ToastKind, UnknownToastKind};
pub use scheduler::{Clock, ManualClock, SystemClock, TimerId, TimerQueue};
