// SPDX-License-Identifier: MPL-2.0
//! Card payment form schema.
//!
//! Each field has its own rule and every rule runs, so a single call reports
//! all problems at once. Expiry is only checked for length here; whether the
//! date lies in the future is a separate question answered by
//! [`CardPaymentForm::is_expiry_in_future`].

use super::card::{digits_only, luhn_check};
use super::expiry::validate_expiry_date;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card number length bounds, counted in digits.
pub mod card_number_bounds {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 16;
    /// Maximum number of digits.
    pub const MAX_DIGITS: usize = 19;
}

/// Raw card payment input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentForm {
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
    pub cardholder_name: String,
}

/// Form fields, used to attach errors to inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    CardNumber,
    ExpiryMonth,
    ExpiryYear,
    Cvv,
    CardholderName,
}

impl CardField {
    /// Returns the wire name of the field (as used by the host form).
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CardField::CardNumber => "cardNumber",
            CardField::ExpiryMonth => "expiryMonth",
            CardField::ExpiryYear => "expiryYear",
            CardField::Cvv => "cvv",
            CardField::CardholderName => "cardholderName",
        }
    }
}

/// A single rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Card number does not have 16–19 digits.
    CardNumberLength,
    /// Card number fails the Luhn checksum.
    CardNumberChecksum,
    /// Expiry month is not 1–2 characters.
    ExpiryMonthLength,
    /// Expiry year is not exactly 2 characters.
    ExpiryYearLength,
    /// CVV is not 3–4 characters.
    CvvLength,
    /// Cardholder name has fewer than 2 characters.
    CardholderNameTooShort,
}

impl FieldError {
    /// Returns the field this error belongs to.
    #[must_use]
    pub fn field(&self) -> CardField {
        match self {
            FieldError::CardNumberLength | FieldError::CardNumberChecksum => CardField::CardNumber,
            FieldError::ExpiryMonthLength => CardField::ExpiryMonth,
            FieldError::ExpiryYearLength => CardField::ExpiryYear,
            FieldError::CvvLength => CardField::Cvv,
            FieldError::CardholderNameTooShort => CardField::CardholderName,
        }
    }

    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            FieldError::CardNumberLength => "error-card-number-length",
            FieldError::CardNumberChecksum => "error-card-number-checksum",
            FieldError::ExpiryMonthLength => "error-expiry-month-length",
            FieldError::ExpiryYearLength => "error-expiry-year-length",
            FieldError::CvvLength => "error-cvv-length",
            FieldError::CardholderNameTooShort => "error-cardholder-name-short",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FieldError::CardNumberLength => "Card number must be 16 to 19 digits",
            FieldError::CardNumberChecksum => "Invalid card number",
            FieldError::ExpiryMonthLength => "Invalid month",
            FieldError::ExpiryYearLength => "Invalid year",
            FieldError::CvvLength => "CVV must be 3 or 4 digits",
            FieldError::CardholderNameTooShort => "Cardholder name is required",
        };
        f.write_str(message)
    }
}

/// All rule violations found in one form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Returns every error.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the errors attached to one field.
    pub fn for_field(&self, field: CardField) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.field() == field)
    }

    /// Returns whether the field has at least one error.
    #[must_use]
    pub fn has_field(&self, field: CardField) -> bool {
        self.for_field(field).next().is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn push_if(&mut self, failed: bool, error: FieldError) {
        if failed {
            self.errors.push(error);
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field().name(), error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl CardPaymentForm {
    /// Validates every field and collects all failures.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each failed rule.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let digit_count = digits_only(&self.card_number).len();
        errors.push_if(
            !(card_number_bounds::MIN_DIGITS..=card_number_bounds::MAX_DIGITS)
                .contains(&digit_count),
            FieldError::CardNumberLength,
        );
        errors.push_if(!luhn_check(&self.card_number), FieldError::CardNumberChecksum);
        errors.push_if(
            !(1..=2).contains(&char_len(&self.expiry_month)),
            FieldError::ExpiryMonthLength,
        );
        errors.push_if(
            char_len(&self.expiry_year) != 2,
            FieldError::ExpiryYearLength,
        );
        errors.push_if(!(3..=4).contains(&char_len(&self.cvv)), FieldError::CvvLength);
        errors.push_if(
            char_len(&self.cardholder_name) < 2,
            FieldError::CardholderNameTooShort,
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Returns whether the expiry month starts after the current time.
    ///
    /// Not part of [`validate`](Self::validate).
    #[must_use]
    pub fn is_expiry_in_future(&self) -> bool {
        validate_expiry_date(&self.expiry_month, &self.expiry_year)
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}
