// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use nmoney::account::Account;
use nmoney::models::{
    AccountMetadata, AccountType, Group, RepeatInterval, Transaction, TransactionType, UNGROUPED,
};
use nmoney::repository::AccountRepository;
use base64::Engine;
use nmoney::{cli, commands::transactions};
use rust_decimal::Decimal;
use tempfile::TempDir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn setup() -> (TempDir, AccountRepository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = AccountRepository::open(&dir.path().join("list.nmoney"), "")
        .unwrap()
        .unwrap();
    repo.update_metadata(&AccountMetadata::new("List", AccountType::Checking))
        .unwrap();
    repo.add_group(&Group {
        id: 1,
        name: "Bills".to_string(),
        description: String::new(),
        color: String::new(),
    })
    .unwrap();
    for i in 1..=3 {
        repo.add_transaction(&Transaction {
            id: i,
            date: d(2025, 1, i as u32),
            description: format!("P{}", i),
            kind: TransactionType::Expense,
            repeat: RepeatInterval::Never,
            amount: Decimal::new(10, 0),
            group_id: if i == 2 { 1 } else { UNGROUPED },
            color: String::new(),
            receipt: None,
            repeat_from: -1,
            repeat_end_date: None,
        })
        .unwrap();
    }
    repo.add_transaction(&Transaction {
        id: 4,
        date: d(2025, 2, 1),
        description: "P4".to_string(),
        kind: TransactionType::Income,
        repeat: RepeatInterval::Never,
        amount: Decimal::new(55, 0),
        group_id: UNGROUPED,
        color: String::new(),
        receipt: None,
        repeat_from: -1,
        repeat_end_date: None,
    })
    .unwrap();
    (dir, repo)
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["nmoney", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected_newest_first() {
    let (_dir, repo) = setup();
    let account = Account::load_as_of(&repo, d(2025, 2, 2)).unwrap();
    let rows = transactions::query_rows(&account, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-02-01");
    assert_eq!(rows[1].date, "2025-01-03");
}

#[test]
fn list_limit_zero_returns_nothing() {
    let (_dir, repo) = setup();
    let account = Account::load_as_of(&repo, d(2025, 2, 2)).unwrap();
    let rows = transactions::query_rows(&account, &list_matches(&["--limit", "0"])).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn list_month_filter() {
    let (_dir, repo) = setup();
    let account = Account::load_as_of(&repo, d(2025, 2, 2)).unwrap();
    let rows = transactions::query_rows(&account, &list_matches(&["--month", "2025-01"])).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.date.starts_with("2025-01")));
}

#[test]
fn list_month_filter_accepts_non_padded_input() {
    let (_dir, repo) = setup();
    let account = Account::load_as_of(&repo, d(2025, 2, 2)).unwrap();
    let rows = transactions::query_rows(&account, &list_matches(&["--month", "2025-1"])).unwrap();
    assert_eq!(rows.len(), 3);

    let err = transactions::query_rows(&account, &list_matches(&["--month", "2025-13"]));
    assert!(err.is_err());
}

#[test]
fn list_group_filter_resolves_name() {
    let (_dir, repo) = setup();
    let account = Account::load_as_of(&repo, d(2025, 2, 2)).unwrap();
    let rows = transactions::query_rows(&account, &list_matches(&["--group", "Bills"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 2);
    assert_eq!(rows[0].group, "Bills");

    let err = transactions::query_rows(&account, &list_matches(&["--group", "Nope"]));
    assert!(err.is_err());
}

#[test]
fn add_command_validates_and_persists() {
    let (dir, repo) = setup();
    let path = dir.path().join("list.nmoney");
    drop(repo);

    let matches = cli::build_cli().get_matches_from([
        "nmoney",
        "tx",
        "add",
        "--file",
        path.to_str().unwrap(),
        "--amount",
        "12.50",
        "--description",
        "coffee",
        "--type",
        "expense",
        "--date",
        "2025-03-01",
        "--group",
        "Bills",
    ]);
    let Some(("tx", sub)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(sub).unwrap();

    let repo = AccountRepository::open(&path, "").unwrap().unwrap();
    let txs = repo.transactions().unwrap();
    let added = txs.iter().find(|t| t.description == "coffee").unwrap();
    assert_eq!(added.id, 5);
    assert_eq!(added.amount, Decimal::new(1250, 2));
    assert_eq!(added.kind, TransactionType::Expense);
    assert_eq!(added.group_id, 1);
}

#[test]
fn add_command_attaches_receipt_base64() {
    let (dir, repo) = setup();
    let path = dir.path().join("list.nmoney");
    drop(repo);

    let image = dir.path().join("receipt.png");
    std::fs::write(&image, b"\x89PNG fake bytes").unwrap();

    let matches = cli::build_cli().get_matches_from([
        "nmoney",
        "tx",
        "add",
        "--file",
        path.to_str().unwrap(),
        "--amount",
        "9.99",
        "--description",
        "with receipt",
        "--receipt",
        image.to_str().unwrap(),
    ]);
    let Some(("tx", sub)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(sub).unwrap();

    let repo = AccountRepository::open(&path, "").unwrap().unwrap();
    let txs = repo.transactions().unwrap();
    let added = txs.iter().find(|t| t.description == "with receipt").unwrap();
    let stored = added.receipt.as_deref().unwrap();
    assert_eq!(
        stored,
        base64::engine::general_purpose::STANDARD.encode(b"\x89PNG fake bytes")
    );
}

#[test]
fn add_command_rejects_non_positive_amounts() {
    let (dir, repo) = setup();
    let path = dir.path().join("list.nmoney");
    drop(repo);

    for bad in ["0", "-3"] {
        let matches = cli::build_cli().get_matches_from([
            "nmoney",
            "tx",
            "add",
            "--file",
            path.to_str().unwrap(),
            "--amount",
            bad,
        ]);
        let Some(("tx", sub)) = matches.subcommand() else {
            panic!("no tx subcommand");
        };
        assert!(transactions::handle(sub).is_err());
    }

    let repo = AccountRepository::open(&path, "").unwrap().unwrap();
    assert_eq!(repo.transactions().unwrap().len(), 4);
}
