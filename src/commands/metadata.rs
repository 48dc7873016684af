// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::account::Account;
use crate::models::{AccountType, SortBy, TransactionType};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, bail};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(sub)?,
        Some(("set", sub)) => set(sub)?,
        _ => {}
    }
    Ok(())
}

fn show(sub: &clap::ArgMatches) -> Result<()> {
    let repo = super::open_account(sub)?;
    let account = Account::load(&repo)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &account.metadata)? {
        let md = &account.metadata;
        let rows = vec![
            vec!["Name".to_string(), md.name.clone()],
            vec!["Type".to_string(), md.account_type.as_str().to_string()],
            vec![
                "Default transaction type".to_string(),
                md.default_transaction_type.as_str().to_string(),
            ],
            vec![
                "Custom currency".to_string(),
                if md.use_custom_currency {
                    format!(
                        "{} ({})",
                        md.custom_symbol.clone().unwrap_or_default(),
                        md.custom_code.clone().unwrap_or_default()
                    )
                } else {
                    "no".to_string()
                },
            ],
            vec![
                "Show groups".to_string(),
                md.show_groups.to_string(),
            ],
            vec![
                "Sort first to last".to_string(),
                md.sort_first_to_last.to_string(),
            ],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}

fn set(sub: &clap::ArgMatches) -> Result<()> {
    let repo = super::open_account(sub)?;
    let mut md = Account::load(&repo)?.metadata;

    if let Some(name) = sub.get_one::<String>("name") {
        md.name = name.clone();
    }
    if let Some(s) = sub.get_one::<String>("type") {
        md.account_type = match AccountType::parse(s) {
            Some(t) => t,
            None => bail!("Invalid account type '{}'", s),
        };
    }
    if let Some(s) = sub.get_one::<String>("default-type") {
        md.default_transaction_type = match TransactionType::parse(s) {
            Some(t) => t,
            None => bail!("Invalid transaction type '{}'", s),
        };
    }
    if let Some(s) = sub.get_one::<String>("sort-by") {
        md.sort_by = match SortBy::parse(s) {
            Some(s) => s,
            None => bail!("Invalid sort key '{}'", s),
        };
    }
    if let Some(v) = sub.get_one::<bool>("sort-first-to-last") {
        md.sort_first_to_last = *v;
    }
    if let Some(v) = sub.get_one::<bool>("show-groups") {
        md.show_groups = *v;
    }
    if let Some(v) = sub.get_one::<bool>("use-custom-currency") {
        md.use_custom_currency = *v;
    }
    if let Some(s) = sub.get_one::<String>("symbol") {
        md.custom_symbol = Some(s.clone());
    }
    if let Some(s) = sub.get_one::<String>("code") {
        md.custom_code = Some(s.to_uppercase());
    }

    repo.update_metadata(&md)?;
    println!("Metadata updated");
    Ok(())
}
