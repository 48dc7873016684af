// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use nmoney::models::{
    AccountMetadata, AccountType, Group, RepeatInterval, Transaction, TransactionType, UNGROUPED,
};
use nmoney::repository::AccountRepository;
use nmoney::{cli, commands::exporter};
use rust_decimal::Decimal;
use std::path::Path;
use tempfile::tempdir;

fn seed(path: &Path) {
    let repo = AccountRepository::open(path, "").unwrap().unwrap();
    repo.update_metadata(&AccountMetadata::new("Export", AccountType::Checking))
        .unwrap();
    repo.add_group(&Group {
        id: 1,
        name: "Rent".to_string(),
        description: String::new(),
        color: String::new(),
    })
    .unwrap();
    repo.add_transaction(&Transaction {
        id: 1,
        date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        description: "January rent".to_string(),
        kind: TransactionType::Expense,
        repeat: RepeatInterval::Monthly,
        amount: Decimal::new(85000, 2),
        group_id: 1,
        color: "#3584e4".to_string(),
        receipt: None,
        repeat_from: -1,
        // Ended repeat: stays listed as monthly but never materializes again.
        repeat_end_date: NaiveDate::from_ymd_opt(2025, 2, 1),
    })
    .unwrap();
    repo.add_transaction(&Transaction {
        id: 2,
        date: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        description: "salary".to_string(),
        kind: TransactionType::Income,
        repeat: RepeatInterval::Never,
        amount: Decimal::new(2500, 0),
        group_id: UNGROUPED,
        color: String::new(),
        receipt: None,
        repeat_from: -1,
        repeat_end_date: None,
    })
    .unwrap();
}

fn export(file: &Path, format: &str, out: &Path) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "nmoney",
        "export",
        "transactions",
        "--file",
        file.to_str().unwrap(),
        "--format",
        format,
        "--out",
        out.to_str().unwrap(),
    ]);
    let Some(("export", sub)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    exporter::handle(sub)
}

#[test]
fn csv_export_includes_header_and_group_names() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("export.nmoney");
    let out = dir.path().join("txs.csv");
    seed(&file);

    export(&file, "csv", &out).unwrap();

    let body = std::fs::read_to_string(&out).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,date,description,type,amount,group,repeat,color"
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("1,2025-01-02,January rent,expense,850.00,Rent,monthly"));
    let second = lines.next().unwrap();
    assert!(second.starts_with("2,2025-01-03,salary,income,2500,,never"));
    assert!(lines.next().is_none());
}

#[test]
fn json_export_is_an_array_of_objects() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("export.nmoney");
    let out = dir.path().join("txs.json");
    seed(&file);

    export(&file, "json", &out).unwrap();

    let body = std::fs::read_to_string(&out).unwrap();
    let items: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["group"], "Rent");
    assert_eq!(items[0]["amount"], "850.00");
    assert_eq!(items[1]["type"], "income");
}

#[test]
fn unknown_format_is_an_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("export.nmoney");
    let out = dir.path().join("txs.xml");
    seed(&file);
    assert!(export(&file, "xml", &out).is_err());
}
