// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use nmoney::config::{Configuration, RECENT_SLOTS, Theme};
use std::path::Path;

#[test]
fn recent_accounts_is_a_three_slot_mru() {
    let mut c = Configuration::default();
    c.add_recent_account(Path::new("/tmp/a.nmoney"));
    c.add_recent_account(Path::new("/tmp/b.nmoney"));
    c.add_recent_account(Path::new("/tmp/c.nmoney"));
    c.add_recent_account(Path::new("/tmp/d.nmoney"));
    assert_eq!(c.recent_accounts.len(), RECENT_SLOTS);
    assert_eq!(c.recent_accounts[0], Path::new("/tmp/d.nmoney"));
    // Oldest entry fell off.
    assert!(!c.recent_accounts.contains(&"/tmp/a.nmoney".into()));

    // Re-opening an existing entry moves it to the front without duplicating.
    c.add_recent_account(Path::new("/tmp/b.nmoney"));
    assert_eq!(c.recent_accounts.len(), RECENT_SLOTS);
    assert_eq!(c.recent_accounts[0], Path::new("/tmp/b.nmoney"));
    assert_eq!(
        c.recent_accounts
            .iter()
            .filter(|p| *p == Path::new("/tmp/b.nmoney"))
            .count(),
        1
    );
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let c: Configuration = serde_json::from_str("{}").unwrap();
    assert_eq!(c.theme, Theme::System);
    assert!(c.recent_accounts.is_empty());
    assert!(!c.transaction_default_color.is_empty());

    let c: Configuration = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
    assert_eq!(c.theme, Theme::Dark);
}

#[test]
fn round_trips_through_json() {
    let mut c = Configuration::default();
    c.theme = Theme::Light;
    c.add_recent_account(Path::new("/home/u/ledger.nmoney"));
    let s = serde_json::to_string_pretty(&c).unwrap();
    let back: Configuration = serde_json::from_str(&s).unwrap();
    assert_eq!(back.theme, Theme::Light);
    assert_eq!(back.recent_accounts, c.recent_accounts);
}
