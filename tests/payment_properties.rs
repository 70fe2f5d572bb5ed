// SPDX-License-Identifier: MPL-2.0
//! Property tests for card number handling.

use bizdesk::domain::payment::{
    digits_only, format_card_number, luhn_check, validate_card, CardBrand,
};
use proptest::prelude::*;

/// Appends the digit that makes `payload` pass the Luhn check.
fn with_check_digit(payload: &str) -> String {
    let sum: u32 = payload
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    format!("{}{}", payload, (10 - sum % 10) % 10)
}

proptest! {
    #[test]
    fn generated_numbers_pass_luhn(payload in "[0-9]{11,18}") {
        prop_assert!(luhn_check(&with_check_digit(&payload)));
    }

    #[test]
    fn changing_one_digit_breaks_luhn(
        payload in "[0-9]{15}",
        position in 0usize..16,
        delta in 1u32..10,
    ) {
        let valid = with_check_digit(&payload);
        let mut digits: Vec<u32> = valid.chars().filter_map(|c| c.to_digit(10)).collect();
        digits[position] = (digits[position] + delta) % 10;
        let mutated: String = digits.iter().map(|d| char::from(b'0' + *d as u8)).collect();
        prop_assert!(!luhn_check(&mutated));
    }

    #[test]
    fn formatting_keeps_digits_in_groups_of_four(number in "[0-9 ]{0,30}") {
        let formatted = format_card_number(&number);
        prop_assert_eq!(digits_only(&formatted), digits_only(&number));
        let groups: Vec<&str> = formatted.split(' ').filter(|g| !g.is_empty()).collect();
        if let Some((last, rest)) = groups.split_last() {
            prop_assert!(rest.iter().all(|g| g.len() == 4));
            prop_assert!(last.len() <= 4);
        }
    }

    #[test]
    fn separators_do_not_change_the_verdict(payload in "[0-9]{15}") {
        let plain = with_check_digit(&payload);
        let spaced = format_card_number(&plain);
        prop_assert_eq!(luhn_check(&plain), luhn_check(&spaced));
        prop_assert_eq!(validate_card(&plain), validate_card(&spaced));
    }

    #[test]
    fn leading_four_is_always_visa(rest in "[0-9]{0,18}") {
        prop_assert_eq!(validate_card(&format!("4{}", rest)), Some(CardBrand::Visa));
    }
}
