// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AccountMetadata, AccountType, Group, RepeatInterval, Transaction, UNGROUPED};
use crate::repository::{AccountRepository, Result};
use chrono::{Days, Local, Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// In-memory aggregate of one open account file: the singleton metadata row
/// plus every group and transaction, with derived totals.
///
/// Loading performs the repeat catch-up pass, so the maps always reflect the
/// post-materialization state of the file.
pub struct Account {
    pub metadata: AccountMetadata,
    pub groups: HashMap<i64, Group>,
    pub transactions: HashMap<i64, Transaction>,
}

impl Account {
    pub fn load(repo: &AccountRepository) -> Result<Self> {
        Self::load_as_of(repo, Local::now().date_naive())
    }

    /// Load with an explicit "today" for the repeat catch-up check.
    pub fn load_as_of(repo: &AccountRepository, today: NaiveDate) -> Result<Self> {
        let metadata = repo
            .metadata()?
            .unwrap_or_else(|| AccountMetadata::new("Account", AccountType::Checking));
        let groups: HashMap<i64, Group> = repo.groups()?.into_iter().map(|g| (g.id, g)).collect();
        let mut account = Self {
            metadata,
            groups,
            transactions: repo
                .transactions()?
                .into_iter()
                .map(|t| (t.id, t))
                .collect(),
        };
        account.materialize_repeats(repo, today)?;
        Ok(account)
    }

    /// One-shot catch-up, not a recurrence engine: each transaction whose
    /// interval has elapsed gets exactly one copy dated `today`, carrying the
    /// interval forward, and the source flips to Never. Nothing is emitted
    /// past the repeat end date.
    fn materialize_repeats(&mut self, repo: &AccountRepository, today: NaiveDate) -> Result<()> {
        let mut due: Vec<i64> = self
            .transactions
            .values()
            .filter(|t| {
                t.repeat != RepeatInterval::Never
                    && interval_elapsed(t.date, t.repeat, today)
                    && t.repeat_end_date.map_or(true, |end| today <= end)
            })
            .map(|t| t.id)
            .collect();
        due.sort_unstable();

        for id in due {
            let new_id = self.next_transaction_id();
            let source = self.transactions.get_mut(&id).unwrap();
            let mut copy = source.clone();
            copy.id = new_id;
            copy.date = today;
            copy.repeat_from = source.id;
            source.repeat = RepeatInterval::Never;
            repo.update_transaction(source)?;
            repo.add_transaction(&copy)?;
            self.transactions.insert(copy.id, copy);
        }
        Ok(())
    }

    // Derived figures. Income and expense are magnitudes; total is signed.

    pub fn income(&self) -> Decimal {
        self.transactions
            .values()
            .filter(|t| t.signed_amount() > Decimal::ZERO)
            .map(|t| t.amount)
            .sum()
    }

    pub fn expense(&self) -> Decimal {
        self.transactions
            .values()
            .filter(|t| t.signed_amount() < Decimal::ZERO)
            .map(|t| t.amount)
            .sum()
    }

    pub fn total(&self) -> Decimal {
        self.transactions.values().map(|t| t.signed_amount()).sum()
    }

    /// Signed sum over transactions in the group; `UNGROUPED` (-1) works too.
    pub fn group_balance(&self, group_id: i64) -> Decimal {
        self.transactions
            .values()
            .filter(|t| t.group_id == group_id)
            .map(|t| t.signed_amount())
            .sum()
    }

    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.values().find(|g| g.name == name)
    }

    // Id allocation scans loaded rows for max + 1 rather than relying on
    // AUTOINCREMENT, so ids stay monotonic while memory and table agree.

    pub fn next_group_id(&self) -> i64 {
        self.groups.keys().max().map_or(1, |m| m + 1)
    }

    pub fn next_transaction_id(&self) -> i64 {
        self.transactions.keys().max().map_or(1, |m| m + 1)
    }

    pub fn sorted_transactions(&self) -> Vec<&Transaction> {
        let mut v: Vec<&Transaction> = self.transactions.values().collect();
        v.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        v
    }

    pub fn sorted_groups(&self) -> Vec<&Group> {
        let mut v: Vec<&Group> = self.groups.values().collect();
        v.sort_by_key(|g| g.id);
        v
    }

    pub fn ungrouped_balance(&self) -> Decimal {
        self.group_balance(UNGROUPED)
    }
}

/// Has at least one full interval passed between `date` and `today`?
/// Daily and weekly count days; the calendar intervals use month arithmetic,
/// which clamps (Jan 31 + 1 month = Feb 28/29).
fn interval_elapsed(date: NaiveDate, repeat: RepeatInterval, today: NaiveDate) -> bool {
    let next = match repeat {
        RepeatInterval::Never => return false,
        RepeatInterval::Daily => date.checked_add_days(Days::new(1)),
        RepeatInterval::Weekly => date.checked_add_days(Days::new(7)),
        RepeatInterval::Monthly => date.checked_add_months(Months::new(1)),
        RepeatInterval::Quarterly => date.checked_add_months(Months::new(3)),
        RepeatInterval::Yearly => date.checked_add_months(Months::new(12)),
        RepeatInterval::Biyearly => date.checked_add_months(Months::new(24)),
    };
    match next {
        Some(next) => next <= today,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn interval_elapsed_boundaries() {
        assert!(interval_elapsed(
            d(2025, 1, 1),
            RepeatInterval::Daily,
            d(2025, 1, 2)
        ));
        assert!(!interval_elapsed(
            d(2025, 1, 1),
            RepeatInterval::Weekly,
            d(2025, 1, 7)
        ));
        assert!(interval_elapsed(
            d(2025, 1, 1),
            RepeatInterval::Weekly,
            d(2025, 1, 8)
        ));
        assert!(!interval_elapsed(
            d(2025, 1, 15),
            RepeatInterval::Monthly,
            d(2025, 2, 14)
        ));
        assert!(interval_elapsed(
            d(2025, 1, 15),
            RepeatInterval::Monthly,
            d(2025, 2, 15)
        ));
        assert!(!interval_elapsed(
            d(2025, 1, 1),
            RepeatInterval::Never,
            d(2030, 1, 1)
        ));
    }

    #[test]
    fn month_end_clamps() {
        // Jan 31 monthly becomes due on the clamped Feb 28.
        assert!(interval_elapsed(
            d(2025, 1, 31),
            RepeatInterval::Monthly,
            d(2025, 2, 28)
        ));
        assert!(!interval_elapsed(
            d(2025, 1, 31),
            RepeatInterval::Monthly,
            d(2025, 2, 27)
        ));
    }
}
