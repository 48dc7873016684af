// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod exporter;
pub mod groups;
pub mod metadata;
pub mod password;
pub mod rates;
pub mod transactions;

use crate::config::Configuration;
use crate::repository::AccountRepository;
use anyhow::{Context, Result, bail};
use std::path::PathBuf;

pub fn account_file(m: &clap::ArgMatches) -> Result<PathBuf> {
    let f = m
        .get_one::<String>("file")
        .context("--file <ACCOUNT> is required for this command")?;
    Ok(PathBuf::from(f))
}

pub fn account_password(m: &clap::ArgMatches) -> String {
    m.get_one::<String>("password").cloned().unwrap_or_default()
}

/// Open an existing account and bump it in the recent list. Login failure
/// (wrong or missing password) is reported in the controller-layer wording,
/// not as a backtrace.
pub fn open_account(m: &clap::ArgMatches) -> Result<AccountRepository> {
    let path = account_file(m)?;
    let password = account_password(m);
    let Some(repo) = AccountRepository::open(&path, &password)? else {
        bail!("Unable to login to account");
    };
    let mut config = Configuration::load();
    config.add_recent_account(repo.path());
    let _ = config.save();
    Ok(repo)
}
