// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::{convert, get_rates};
use crate::utils::parse_decimal;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("fetch", sub)) => {
            let code = sub.get_one::<String>("currency").unwrap().to_uppercase();
            let table = get_rates(&code)?;
            println!(
                "Rates for {} cached ({} currencies, as of {})",
                table.base_code,
                table.rates.len(),
                table.fetched_on
            );
        }
        Some(("convert", sub)) => {
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let from = sub.get_one::<String>("from").unwrap().to_uppercase();
            let to = sub.get_one::<String>("to").unwrap().to_uppercase();
            let table = get_rates(&from)?;
            let res = convert(&table, amount, &to)?;
            println!("{} {} -> {} {}", amount, from, res.round_dp(4), to);
        }
        _ => {}
    }
    Ok(())
}
