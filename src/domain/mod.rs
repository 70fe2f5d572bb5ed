// SPDX-License-Identifier: MPL-2.0
//! Domain layer - core business rules without I/O.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Nothing here touches the filesystem, the clock of the host UI, or any
//! presentation framework, which keeps it trivially testable.
//!
//! # Modules
//!
//! - [`payment`]: Card validation ([`CardBrand`](payment::CardBrand),
//!   [`CardPaymentForm`](payment::CardPaymentForm), Luhn checksum, expiry dates)
//! - [`ui`]: UI value objects ([`StatusVariant`](ui::StatusVariant))

pub mod payment;
pub mod ui;
