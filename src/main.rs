// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use nmoney::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("account", sub)) => commands::accounts::handle(sub)?,
        Some(("tx", sub)) => commands::transactions::handle(sub)?,
        Some(("group", sub)) => commands::groups::handle(sub)?,
        Some(("password", sub)) => commands::password::handle(sub)?,
        Some(("metadata", sub)) => commands::metadata::handle(sub)?,
        Some(("export", sub)) => commands::exporter::handle(sub)?,
        Some(("rates", sub)) => commands::rates::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
