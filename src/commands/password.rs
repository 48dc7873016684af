// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let mut repo = super::open_account(sub)?;
            let new_password = sub.get_one::<String>("new-password").unwrap();
            let was_encrypted = repo.is_encrypted();
            repo.set_password(new_password)?;
            if was_encrypted {
                println!("Password changed");
            } else {
                println!("Password set; account file is now encrypted");
            }
        }
        Some(("remove", sub)) => {
            let mut repo = super::open_account(sub)?;
            if !repo.is_encrypted() {
                println!("Account file is not encrypted");
                return Ok(());
            }
            repo.set_password("")?;
            println!("Password removed; account file is now unencrypted");
        }
        _ => {}
    }
    Ok(())
}
