// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::account::Account;
use crate::models::{RepeatInterval, Transaction, TransactionType, UNGROUPED};
use crate::utils::{
    in_month, maybe_print_json, parse_color, parse_date, parse_positive_amount, pretty_table,
};
use anyhow::{Context, Result, bail};
use base64::Engine;
use chrono::Local;
use serde::Serialize;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(sub)?,
        Some(("update", sub)) => update(sub)?,
        Some(("rm", sub)) => rm(sub)?,
        Some(("list", sub)) => list(sub)?,
        _ => {}
    }
    Ok(())
}

fn add(sub: &clap::ArgMatches) -> Result<()> {
    let repo = super::open_account(sub)?;
    let account = Account::load(&repo)?;

    let amount = parse_positive_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let kind = match sub.get_one::<String>("type") {
        Some(s) => match TransactionType::parse(s) {
            Some(k) => k,
            None => bail!("Invalid transaction type '{}'", s),
        },
        None => account.metadata.default_transaction_type,
    };
    let repeat_str = sub.get_one::<String>("repeat").unwrap();
    let Some(repeat) = RepeatInterval::parse(repeat_str) else {
        bail!("Invalid repeat interval '{}'", repeat_str);
    };
    let repeat_end_date = sub
        .get_one::<String>("repeat-end")
        .map(|s| parse_date(s))
        .transpose()?;
    let group_id = match sub.get_one::<String>("group") {
        Some(name) => match account.group_by_name(name) {
            Some(g) => g.id,
            None => bail!("Group '{}' not found", name),
        },
        None => UNGROUPED,
    };
    let color = match sub.get_one::<String>("color") {
        Some(c) => parse_color(c)?,
        None => crate::config::Configuration::load().transaction_default_color,
    };
    let receipt = sub
        .get_one::<String>("receipt")
        .map(|p| read_receipt(p))
        .transpose()?;

    let t = Transaction {
        id: account.next_transaction_id(),
        date,
        description: sub.get_one::<String>("description").unwrap().clone(),
        kind,
        repeat,
        amount,
        group_id,
        color,
        receipt,
        repeat_from: -1,
        repeat_end_date,
    };
    repo.add_transaction(&t)?;
    println!(
        "Recorded {} {} on {} (id {})",
        kind.as_str(),
        amount,
        date,
        t.id
    );
    Ok(())
}

fn update(sub: &clap::ArgMatches) -> Result<()> {
    let repo = super::open_account(sub)?;
    let account = Account::load(&repo)?;

    let id = *sub.get_one::<i64>("id").unwrap();
    let Some(existing) = account.transactions.get(&id) else {
        bail!("Transaction {} not found", id);
    };
    let mut t = existing.clone();

    if let Some(s) = sub.get_one::<String>("amount") {
        t.amount = parse_positive_amount(s)?;
    }
    if let Some(s) = sub.get_one::<String>("description") {
        t.description = s.clone();
    }
    if let Some(s) = sub.get_one::<String>("date") {
        t.date = parse_date(s)?;
    }
    if let Some(s) = sub.get_one::<String>("type") {
        t.kind = match TransactionType::parse(s) {
            Some(k) => k,
            None => bail!("Invalid transaction type '{}'", s),
        };
    }
    if let Some(s) = sub.get_one::<String>("repeat") {
        t.repeat = match RepeatInterval::parse(s) {
            Some(r) => r,
            None => bail!("Invalid repeat interval '{}'", s),
        };
    }
    if let Some(s) = sub.get_one::<String>("repeat-end") {
        t.repeat_end_date = Some(parse_date(s)?);
    }
    if let Some(name) = sub.get_one::<String>("group") {
        t.group_id = match account.group_by_name(name) {
            Some(g) => g.id,
            None => bail!("Group '{}' not found", name),
        };
    }
    if let Some(c) = sub.get_one::<String>("color") {
        t.color = parse_color(c)?;
    }
    if let Some(p) = sub.get_one::<String>("receipt") {
        t.receipt = Some(read_receipt(p)?);
    }

    repo.update_transaction(&t)?;
    println!("Updated transaction {}", id);
    Ok(())
}

/// Receipts live inside the account file, base64-encoded, so an account
/// stays a single portable (and encryptable) file.
fn read_receipt(path: &str) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Read receipt '{}'", path))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

fn rm(sub: &clap::ArgMatches) -> Result<()> {
    let repo = super::open_account(sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    repo.delete_transaction(id)?;
    println!("Deleted transaction {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub kind: String,
    pub amount: String,
    pub group: String,
    pub repeat: String,
}

/// Newest first, then highest id; filters and limit applied in memory since
/// the whole file is already loaded.
pub fn query_rows(account: &Account, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = sub
        .get_one::<String>("month")
        .map(|s| crate::utils::parse_month(s))
        .transpose()?;
    let group_id = match sub.get_one::<String>("group") {
        Some(name) => match account.group_by_name(name) {
            Some(g) => Some(g.id),
            None => bail!("Group '{}' not found", name),
        },
        None => None,
    };

    let limit = sub.get_one::<usize>("limit").copied();
    let mut txs = account.sorted_transactions();
    txs.reverse();
    let mut rows = Vec::new();
    for t in txs {
        if limit.is_some_and(|l| rows.len() >= l) {
            break;
        }
        if let Some(m) = &month {
            if !in_month(t.date, m) {
                continue;
            }
        }
        if let Some(gid) = group_id {
            if t.group_id != gid {
                continue;
            }
        }
        rows.push(TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            description: t.description.clone(),
            kind: t.kind.as_str().to_string(),
            amount: t.amount.to_string(),
            group: account
                .groups
                .get(&t.group_id)
                .map(|g| g.name.clone())
                .unwrap_or_default(),
            repeat: t.repeat.as_str().to_string(),
        });
    }
    Ok(rows)
}

fn list(sub: &clap::ArgMatches) -> Result<()> {
    let repo = super::open_account(sub)?;
    let account = Account::load(&repo)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(&account, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.group.clone(),
                    r.repeat.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Type", "Amount", "Group", "Repeat"],
                rows,
            )
        );
    }
    Ok(())
}
