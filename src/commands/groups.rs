// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::account::Account;
use crate::models::Group;
use crate::utils::{maybe_print_json, parse_color, pretty_table};
use anyhow::{Result, bail};
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
    let name = sub.get_one::<String>("name").unwrap();
    if account.group_by_name(name).is_some() {
        bail!("Group '{}' already exists", name);
    }
    let color = match sub.get_one::<String>("color") {
        Some(c) => parse_color(c)?,
        None => crate::config::Configuration::load().group_default_color,
    };
    let g = Group {
        id: account.next_group_id(),
        name: name.clone(),
        description: sub.get_one::<String>("description").unwrap().clone(),
        color,
    };
    repo.add_group(&g)?;
    println!("Added group '{}' (id {})", g.name, g.id);
    Ok(())
}

fn update(sub: &clap::ArgMatches) -> Result<()> {
    let repo = super::open_account(sub)?;
    let account = Account::load(&repo)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let Some(existing) = account.groups.get(&id) else {
        bail!("Group {} not found", id);
    };
    let mut g = existing.clone();
    if let Some(name) = sub.get_one::<String>("name") {
        g.name = name.clone();
    }
    if let Some(desc) = sub.get_one::<String>("description") {
        g.description = desc.clone();
    }
    if let Some(c) = sub.get_one::<String>("color") {
        g.color = parse_color(c)?;
    }
    repo.update_group(&g)?;
    println!("Updated group {}", id);
    Ok(())
}

fn rm(sub: &clap::ArgMatches) -> Result<()> {
    let repo = super::open_account(sub)?;
    let account = Account::load(&repo)?;
    let name = sub.get_one::<String>("name").unwrap();
    let Some(g) = account.group_by_name(name) else {
        bail!("Group '{}' not found", name);
    };
    repo.delete_group(g.id)?;
    println!("Removed group '{}'; its transactions are now ungrouped", name);
    Ok(())
}

#[derive(Serialize)]
pub struct GroupRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub balance: String,
}

pub fn query_rows(account: &Account) -> Vec<GroupRow> {
    let mut rows: Vec<GroupRow> = account
        .sorted_groups()
        .into_iter()
        .map(|g| GroupRow {
            id: g.id,
            name: g.name.clone(),
            description: g.description.clone(),
            balance: account.group_balance(g.id).round_dp(2).to_string(),
        })
        .collect();
    // Ungrouped shown last, as a pseudo-row.
    rows.push(GroupRow {
        id: crate::models::UNGROUPED,
        name: "(ungrouped)".to_string(),
        description: String::new(),
        balance: account.ungrouped_balance().round_dp(2).to_string(),
    });
    rows
}

fn list(sub: &clap::ArgMatches) -> Result<()> {
    let repo = super::open_account(sub)?;
    let account = Account::load(&repo)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(&account);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.description.clone(),
                    r.balance.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Description", "Balance"], rows)
        );
    }
    Ok(())
}
