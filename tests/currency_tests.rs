// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use nmoney::currency::{RateTable, cache_file, cached_rates, convert, store_rates};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tempfile::tempdir;

fn table(code: &str, fetched_on: NaiveDate) -> RateTable {
    let mut rates = HashMap::new();
    rates.insert("EUR".to_string(), Decimal::new(90, 2));
    rates.insert("INR".to_string(), Decimal::new(83, 0));
    RateTable {
        base_code: code.to_string(),
        fetched_on,
        rates,
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn same_day_cache_is_served() {
    let dir = tempdir().unwrap();
    let today = d(2025, 8, 25);
    store_rates(dir.path(), &table("USD", today)).unwrap();
    assert!(cache_file(dir.path(), "USD").exists());

    let cached = cached_rates(dir.path(), "USD", today).unwrap();
    assert_eq!(cached.base_code, "USD");
    assert_eq!(cached.rates["INR"], Decimal::new(83, 0));
}

#[test]
fn stale_cache_expires_daily() {
    let dir = tempdir().unwrap();
    let yesterday = d(2025, 8, 24);
    store_rates(dir.path(), &table("USD", yesterday)).unwrap();
    assert!(cached_rates(dir.path(), "USD", d(2025, 8, 25)).is_none());
}

#[test]
fn cache_files_are_per_currency() {
    let dir = tempdir().unwrap();
    let today = d(2025, 8, 25);
    store_rates(dir.path(), &table("USD", today)).unwrap();
    assert!(cached_rates(dir.path(), "EUR", today).is_none());
    assert_eq!(
        cache_file(dir.path(), "EUR").file_name().unwrap(),
        "currency_EUR.json"
    );
}

#[test]
fn convert_multiplies_by_the_quote_rate() {
    let t = table("USD", d(2025, 8, 25));
    let res = convert(&t, Decimal::new(100, 0), "eur").unwrap();
    assert_eq!(res, Decimal::new(9000, 2));

    assert!(convert(&t, Decimal::ONE, "XXX").is_err());
}

#[test]
fn corrupt_cache_reads_as_a_miss() {
    let dir = tempdir().unwrap();
    std::fs::write(cache_file(dir.path(), "USD"), "not json").unwrap();
    assert!(cached_rates(dir.path(), "USD", d(2025, 8, 25)).is_none());
}
