// SPDX-License-Identifier: MPL-2.0
//! Payment card validation.
//!
//! Pure, stateless helpers for card payment input:
//!
//! - [`card`]: brand detection, Luhn checksum, display grouping
//! - [`expiry`]: expiry month checks with calendar rollover
//! - [`form`]: aggregate form schema with per-field errors

pub mod card;
pub mod expiry;
pub mod form;

pub use card::{digits_only, format_card_number, luhn_check, validate_card, CardBrand};
pub use expiry::{expiry_month_start, validate_expiry_date, validate_expiry_date_at};
pub use form::{CardField, CardPaymentForm, FieldError, ValidationErrors};
