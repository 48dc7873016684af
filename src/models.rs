// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income adds to the account total, expense subtracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn to_code(self) -> i64 {
        match self {
            TransactionType::Income => 0,
            TransactionType::Expense => 1,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => TransactionType::Expense,
            _ => TransactionType::Income,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// Recurrence tag on a transaction. Not a schedule: at most one catch-up
/// transaction is materialized per load, after which the source flips to Never.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatInterval {
    Never,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    Biyearly,
}

impl RepeatInterval {
    pub fn to_code(self) -> i64 {
        match self {
            RepeatInterval::Never => 0,
            RepeatInterval::Daily => 1,
            RepeatInterval::Weekly => 2,
            RepeatInterval::Monthly => 3,
            RepeatInterval::Quarterly => 4,
            RepeatInterval::Yearly => 5,
            RepeatInterval::Biyearly => 6,
        }
    }

    /// Unknown codes read as Never so a file written by a newer build still opens.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => RepeatInterval::Daily,
            2 => RepeatInterval::Weekly,
            3 => RepeatInterval::Monthly,
            4 => RepeatInterval::Quarterly,
            5 => RepeatInterval::Yearly,
            6 => RepeatInterval::Biyearly,
            _ => RepeatInterval::Never,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "never" => Some(RepeatInterval::Never),
            "daily" => Some(RepeatInterval::Daily),
            "weekly" => Some(RepeatInterval::Weekly),
            "monthly" => Some(RepeatInterval::Monthly),
            "quarterly" => Some(RepeatInterval::Quarterly),
            "yearly" => Some(RepeatInterval::Yearly),
            "biyearly" => Some(RepeatInterval::Biyearly),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RepeatInterval::Never => "never",
            RepeatInterval::Daily => "daily",
            RepeatInterval::Weekly => "weekly",
            RepeatInterval::Monthly => "monthly",
            RepeatInterval::Quarterly => "quarterly",
            RepeatInterval::Yearly => "yearly",
            RepeatInterval::Biyearly => "biyearly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Investment,
}

impl AccountType {
    pub fn to_code(self) -> i64 {
        match self {
            AccountType::Checking => 0,
            AccountType::Savings => 1,
            AccountType::Investment => 2,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => AccountType::Savings,
            2 => AccountType::Investment,
            _ => AccountType::Checking,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checking" => Some(AccountType::Checking),
            "savings" => Some(AccountType::Savings),
            "investment" => Some(AccountType::Investment),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::Investment => "investment",
        }
    }
}

/// Preferred ordering for transaction listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Id,
    Date,
    Amount,
}

impl SortBy {
    pub fn to_code(self) -> i64 {
        match self {
            SortBy::Id => 0,
            SortBy::Date => 1,
            SortBy::Amount => 2,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => SortBy::Date,
            2 => SortBy::Amount,
            _ => SortBy::Id,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "id" => Some(SortBy::Id),
            "date" => Some(SortBy::Date),
            "amount" => Some(SortBy::Amount),
            _ => None,
        }
    }
}

/// Ungrouped transactions carry this group id.
pub const UNGROUPED: i64 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionType,
    pub repeat: RepeatInterval,
    /// Non-negative magnitude; the sign comes from `kind`.
    pub amount: Decimal,
    pub group_id: i64,
    pub color: String,
    /// Base64-encoded receipt image, if one was attached.
    pub receipt: Option<String>,
    /// Id of the source transaction this was materialized from;
    /// 0 or negative marks an original.
    pub repeat_from: i64,
    pub repeat_end_date: Option<NaiveDate>,
}

impl Transaction {
    /// Contribution to balances: income positive, expense negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub color: String,
}

/// Singleton per-file configuration row (id fixed at 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountMetadata {
    pub name: String,
    pub account_type: AccountType,
    pub use_custom_currency: bool,
    pub custom_symbol: Option<String>,
    pub custom_code: Option<String>,
    pub default_transaction_type: TransactionType,
    pub show_groups: bool,
    pub sort_first_to_last: bool,
    pub sort_by: SortBy,
}

impl AccountMetadata {
    pub fn new(name: &str, account_type: AccountType) -> Self {
        Self {
            name: name.to_string(),
            account_type,
            use_custom_currency: false,
            custom_symbol: None,
            custom_code: None,
            default_transaction_type: TransactionType::Income,
            show_groups: true,
            sort_first_to_last: true,
            sort_by: SortBy::Id,
        }
    }
}
