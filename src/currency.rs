// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::cache_dir;
use crate::utils::http_client;
use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Conversion rates for one base currency, as cached on disk.
/// `fetched_on` drives the daily expiry check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    pub base_code: String,
    pub fetched_on: NaiveDate,
    pub rates: HashMap<String, Decimal>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    result: String,
    base_code: String,
    rates: HashMap<String, f64>,
}

/// Rates for `code`, from the same-day cache if present, otherwise fetched
/// from open.er-api.com and cached. One attempt, no retry.
pub fn get_rates(code: &str) -> Result<RateTable> {
    let code = code.to_uppercase();
    let dir = cache_dir()?;
    let today = Utc::now().date_naive();
    if let Some(cached) = cached_rates(&dir, &code, today) {
        return Ok(cached);
    }
    let table = fetch_rates(&code, today)?;
    store_rates(&dir, &table)?;
    Ok(table)
}

pub fn cache_file(dir: &Path, code: &str) -> std::path::PathBuf {
    dir.join(format!("currency_{}.json", code))
}

/// A cached table counts only if it was fetched today.
pub fn cached_rates(dir: &Path, code: &str, today: NaiveDate) -> Option<RateTable> {
    let s = fs::read_to_string(cache_file(dir, code)).ok()?;
    let table: RateTable = serde_json::from_str(&s).ok()?;
    (table.fetched_on == today && table.base_code == code).then_some(table)
}

pub fn store_rates(dir: &Path, table: &RateTable) -> Result<()> {
    let path = cache_file(dir, &table.base_code);
    fs::write(&path, serde_json::to_string_pretty(table)?)
        .with_context(|| format!("Write rate cache at {}", path.display()))?;
    Ok(())
}

fn fetch_rates(code: &str, today: NaiveDate) -> Result<RateTable> {
    let url = format!("https://open.er-api.com/v6/latest/{code}");
    let client = http_client()?;
    let resp = client.get(url).send()?.error_for_status()?;
    let body: ApiResponse = resp.json()?;
    if body.result != "success" {
        bail!("Rate service returned '{}' for {}", body.result, code);
    }
    let mut rates = HashMap::new();
    for (quote, rate) in body.rates {
        if let Some(d) = Decimal::from_f64(rate) {
            rates.insert(quote, d);
        }
    }
    Ok(RateTable {
        base_code: body.base_code,
        fetched_on: today,
        rates,
    })
}

/// Convert `amount` of the table's base currency into `to`.
pub fn convert(table: &RateTable, amount: Decimal, to: &str) -> Result<Decimal> {
    let to = to.to_uppercase();
    let rate = table
        .rates
        .get(&to)
        .with_context(|| format!("No rate for {} in {} table", to, table.base_code))?;
    Ok(amount * rate)
}
