// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::account::Account;
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(sub),
        _ => Ok(()),
    }
}

fn export_transactions(sub: &clap::ArgMatches) -> Result<()> {
    let repo = super::open_account(sub)?;
    let account = Account::load(&repo)?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let txs = account.sorted_transactions();
    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "description", "type", "amount", "group", "repeat", "color",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.to_string(),
                    t.description.clone(),
                    t.kind.as_str().to_string(),
                    t.amount.to_string(),
                    account
                        .groups
                        .get(&t.group_id)
                        .map(|g| g.name.clone())
                        .unwrap_or_default(),
                    t.repeat.as_str().to_string(),
                    t.color.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<serde_json::Value> = txs
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date.to_string(),
                        "description": t.description,
                        "type": t.kind.as_str(),
                        "amount": t.amount.to_string(),
                        "group": account
                            .groups
                            .get(&t.group_id)
                            .map(|g| g.name.clone())
                            .unwrap_or_default(),
                        "repeat": t.repeat.as_str(),
                        "color": t.color,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown export format '{}'", other),
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
