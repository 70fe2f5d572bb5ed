// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for card payment validation.
//!
//! Measures the performance of:
//! - Brand detection and the Luhn checksum on raw input
//! - Grouping a number for display
//! - Validating a whole payment form

use bizdesk::domain::payment::{format_card_number, luhn_check, validate_card, CardPaymentForm};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const NUMBERS: [&str; 4] = [
    "4111 1111 1111 1111",
    "5500-0000-0000-0004",
    "5060990580000217499",
    "not a card number",
];

fn bench_card_number(c: &mut Criterion) {
    let mut group = c.benchmark_group("card_number");

    group.bench_function("validate_card", |b| {
        b.iter(|| {
            for number in NUMBERS {
                black_box(validate_card(black_box(number)));
            }
        });
    });

    group.bench_function("luhn_check", |b| {
        b.iter(|| {
            for number in NUMBERS {
                black_box(luhn_check(black_box(number)));
            }
        });
    });

    group.bench_function("format_card_number", |b| {
        b.iter(|| {
            for number in NUMBERS {
                black_box(format_card_number(black_box(number)));
            }
        });
    });

    group.finish();
}

fn bench_payment_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("payment_form");

    let valid = CardPaymentForm {
        card_number: "4111 1111 1111 1111".to_string(),
        expiry_month: "12".to_string(),
        expiry_year: "30".to_string(),
        cvv: "123".to_string(),
        cardholder_name: "Ada Lovelace".to_string(),
    };
    let invalid = CardPaymentForm {
        card_number: "1234".to_string(),
        expiry_month: "123".to_string(),
        expiry_year: "2030".to_string(),
        cvv: "1".to_string(),
        cardholder_name: String::new(),
    };

    group.bench_function("validate_valid", |b| {
        b.iter(|| black_box(black_box(&valid).validate()));
    });

    group.bench_function("validate_invalid", |b| {
        b.iter(|| black_box(black_box(&invalid).validate()));
    });

    group.finish();
}

criterion_group!(benches, bench_card_number, bench_payment_form);
criterion_main!(benches);
