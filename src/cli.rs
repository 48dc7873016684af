// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("nmoney")
        .version(crate_version!())
        .about("Encrypted personal ledger files (.nmoney): groups, transactions, repeats, currency rates")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .global(true)
                .help("Path to the .nmoney account file"),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .global(true)
                .help("Password for an encrypted account file"),
        )
        .subcommand(
            Command::new("account")
                .about("Create and inspect account files")
                .subcommand_required(true)
                .subcommand(
                    Command::new("new")
                        .about("Create a new account file (encrypted when --password is given)")
                        .arg(Arg::new("name").long("name").help("Account name; defaults to the file stem"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("checking")
                                .help("checking | savings | investment"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("info").about("Show metadata, totals, and counts"),
                )),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_negative_numbers(true)
                                .help("Positive amount"),
                        )
                        .arg(Arg::new("description").long("description").default_value(""))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD; defaults to today"))
                        .arg(Arg::new("type").long("type").help("income | expense; defaults to the account's preference"))
                        .arg(Arg::new("group").long("group").help("Group name"))
                        .arg(
                            Arg::new("repeat")
                                .long("repeat")
                                .default_value("never")
                                .help("never | daily | weekly | monthly | quarterly | yearly | biyearly"),
                        )
                        .arg(Arg::new("repeat-end").long("repeat-end").help("YYYY-MM-DD; no catch-up past this date"))
                        .arg(Arg::new("color").long("color").help("#RRGGBB"))
                        .arg(Arg::new("receipt").long("receipt").help("Path to a receipt image to attach")),
                )
                .subcommand(
                    Command::new("update")
                        .about("Update fields of one transaction")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("group").long("group"))
                        .arg(Arg::new("repeat").long("repeat"))
                        .arg(Arg::new("repeat-end").long("repeat-end"))
                        .arg(Arg::new("color").long("color"))
                        .arg(Arg::new("receipt").long("receipt").help("Path to a receipt image to attach")),
                )
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month").help("Filter to YYYY-MM"))
                        .arg(Arg::new("group").long("group").help("Filter to a group name"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("group")
                .about("Manage transaction groups")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add a group")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("description").long("description").default_value(""))
                        .arg(Arg::new("color").long("color").help("#RRGGBB")),
                )
                .subcommand(
                    Command::new("update")
                        .about("Rename or recolor a group")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a group; its transactions become ungrouped")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List groups with balances"),
                )),
        )
        .subcommand(
            Command::new("password")
                .about("Set, change, or remove the account password")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set").about("Set or change the password").arg(
                        Arg::new("new-password")
                            .long("new-password")
                            .required(true)
                            .help("The new password"),
                    ),
                )
                .subcommand(Command::new("remove").about("Decrypt the account file")),
        )
        .subcommand(
            Command::new("metadata")
                .about("Show or change the account's singleton metadata row")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("show").about("Show metadata")))
                .subcommand(
                    Command::new("set")
                        .about("Update metadata fields")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("type").long("type").help("checking | savings | investment"))
                        .arg(Arg::new("default-type").long("default-type").help("income | expense"))
                        .arg(Arg::new("sort-by").long("sort-by").help("id | date | amount"))
                        .arg(
                            Arg::new("sort-first-to-last")
                                .long("sort-first-to-last")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("show-groups")
                                .long("show-groups")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("use-custom-currency")
                                .long("use-custom-currency")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(Arg::new("symbol").long("symbol").help("Custom currency symbol"))
                        .arg(Arg::new("code").long("code").help("Custom currency code")),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export account data")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .about("Export all transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out").required(true).help("Output path")),
                ),
        )
        .subcommand(
            Command::new("rates")
                .about("Currency conversion rates (cached daily)")
                .subcommand_required(true)
                .subcommand(
                    Command::new("fetch").about("Fetch and cache rates for a currency").arg(
                        Arg::new("currency")
                            .long("currency")
                            .required(true)
                            .help("Base currency code, e.g. USD"),
                    ),
                )
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount between currencies")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                ),
        )
}
