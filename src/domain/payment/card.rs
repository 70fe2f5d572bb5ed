// SPDX-License-Identifier: MPL-2.0
//! Card number helpers: brand detection, Luhn checksum and display grouping.
//!
//! Every function first strips all non-digit characters, so user input such
//! as `"4111 1111-1111 1111"` is handled the same as the bare digits.

use std::fmt;

/// Number of digits per display group.
const GROUP_SIZE: usize = 4;

/// Payment networks recognized from the card number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardBrand {
    /// Starts with `4`.
    Visa,
    /// Starts with `51` through `55`.
    Mastercard,
    /// Starts with `5060` or `5061`.
    Verve,
}

impl CardBrand {
    /// Returns the lowercase brand name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Mastercard => "mastercard",
            CardBrand::Verve => "verve",
        }
    }

    fn matches(self, digits: &str) -> bool {
        match self {
            CardBrand::Visa => digits.starts_with('4'),
            CardBrand::Mastercard => ["51", "52", "53", "54", "55"]
                .iter()
                .any(|prefix| digits.starts_with(prefix)),
            CardBrand::Verve => digits.starts_with("5060") || digits.starts_with("5061"),
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Brands in evaluation order. The prefixes are disjoint, so the order only
/// matters for readability.
const BRANDS: [CardBrand; 3] = [CardBrand::Visa, CardBrand::Mastercard, CardBrand::Verve];

/// Returns only the ASCII digits of `input`, in order.
#[must_use]
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Detects the card brand from the number prefix.
///
/// Returns `None` when no known prefix matches.
///
/// # Example
///
/// ```
/// use bizdesk::domain::payment::{validate_card, CardBrand};
///
/// assert_eq!(validate_card("4111 1111 1111 1111"), Some(CardBrand::Visa));
/// assert_eq!(validate_card("9999999999999999"), None);
/// ```
#[must_use]
pub fn validate_card(number: &str) -> Option<CardBrand> {
    let digits = digits_only(number);
    BRANDS.into_iter().find(|brand| brand.matches(&digits))
}

/// Checks the Luhn checksum of a card number.
///
/// Starting from the rightmost digit, every second digit (the second from
/// last, fourth from last, ...) is doubled and reduced by 9 when the result
/// exceeds 9. The number is valid when the total is divisible by 10.
///
/// Input without any digit sums to zero and is therefore reported valid.
/// Callers that need a real number must check the length separately.
#[must_use]
pub fn luhn_check(number: &str) -> bool {
    // Reduce as we go so arbitrarily long input cannot overflow.
    let checksum = digits_only(number)
        .bytes()
        .rev()
        .map(|b| b - b'0')
        .enumerate()
        .fold(0u8, |acc, (i, digit)| {
            let digit = if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            };
            (acc + digit) % 10
        });
    checksum == 0
}

/// Groups the digits of a card number in blocks of four separated by spaces.
///
/// A trailing partial block is kept as-is: `"41111"` becomes `"4111 1"`.
#[must_use]
pub fn format_card_number(number: &str) -> String {
    let digits = digits_only(number);
    let mut formatted = String::with_capacity(digits.len() + digits.len() / GROUP_SIZE);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            formatted.push(' ');
        }
        formatted.push(ch);
    }
    formatted
}
