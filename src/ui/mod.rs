// SPDX-License-Identifier: MPL-2.0
//! Framework-independent UI state shared with the host.

pub mod notifications;
