// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::account::Account;
use crate::models::{AccountMetadata, AccountType};
use crate::repository::AccountRepository;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("new", sub)) => new(sub)?,
        Some(("info", sub)) => info(sub)?,
        _ => {}
    }
    Ok(())
}

fn new(sub: &clap::ArgMatches) -> Result<()> {
    let path = super::account_file(sub)?;
    if path.exists() {
        bail!("Account file {} already exists", path.display());
    }
    let password = super::account_password(sub);
    let Some(repo) = AccountRepository::open(&path, &password)? else {
        bail!("Unable to login to account");
    };
    let name = sub
        .get_one::<String>("name")
        .cloned()
        .or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "Account".to_string());
    let account_type = sub.get_one::<String>("type").unwrap();
    let Some(account_type) = AccountType::parse(account_type) else {
        bail!("Invalid account type '{}'", account_type);
    };
    repo.update_metadata(&AccountMetadata::new(&name, account_type))?;

    let mut config = crate::config::Configuration::load();
    config.add_recent_account(repo.path());
    let _ = config.save();

    println!(
        "Created {} account '{}' at {}{}",
        account_type.as_str(),
        name,
        path.display(),
        if repo.is_encrypted() { " (encrypted)" } else { "" }
    );
    Ok(())
}

fn info(sub: &clap::ArgMatches) -> Result<()> {
    let repo = super::open_account(sub)?;
    let account = Account::load(&repo)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let summary = json!({
        "name": account.metadata.name,
        "type": account.metadata.account_type.as_str(),
        "encrypted": repo.is_encrypted(),
        "total": account.total(),
        "income": account.income(),
        "expense": account.expense(),
        "groups": account.groups.len(),
        "transactions": account.transactions.len(),
    });
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let rows = vec![
            vec!["Name".to_string(), account.metadata.name.clone()],
            vec![
                "Type".to_string(),
                account.metadata.account_type.as_str().to_string(),
            ],
            vec![
                "Encrypted".to_string(),
                if repo.is_encrypted() { "yes" } else { "no" }.to_string(),
            ],
            vec!["Total".to_string(), fmt_amount(&account.total())],
            vec!["Income".to_string(), fmt_amount(&account.income())],
            vec!["Expense".to_string(), fmt_amount(&account.expense())],
            vec!["Groups".to_string(), account.groups.len().to_string()],
            vec![
                "Transactions".to_string(),
                account.transactions.len().to_string(),
            ],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}
