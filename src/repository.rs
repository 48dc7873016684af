// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    AccountMetadata, AccountType, Group, RepeatInterval, SortBy, Transaction, TransactionType,
    UNGROUPED,
};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to login to account")]
    LoginFailed,
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Plaintext SQLite files start with this 16-byte magic; SQLCipher files do not.
const SQLITE_MAGIC: &[u8; 16] = b"SQLite format 3\0";

/// Header sniff: a non-empty file without the SQLite magic is treated as encrypted.
pub fn is_encrypted_file(path: &Path) -> Result<bool> {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return Ok(false),
    };
    if meta.len() == 0 {
        return Ok(false);
    }
    let mut header = [0u8; 16];
    let mut f = fs::File::open(path)?;
    let n = f.read(&mut header)?;
    Ok(n < 16 || &header != SQLITE_MAGIC)
}

/// One open `.nmoney` file: a SQLite database, optionally SQLCipher-encrypted,
/// holding a singleton metadata row plus groups and transactions.
///
/// Single connection, single thread. Login failure (wrong or missing password)
/// is reported as `Ok(None)` from [`AccountRepository::open`], never as an error.
pub struct AccountRepository {
    conn: Connection,
    path: PathBuf,
    password: String,
    encrypted: bool,
}

impl AccountRepository {
    /// Open (or create) an account file. An empty password means "no password".
    ///
    /// Returns `Ok(None)` when the file is encrypted and the password is
    /// missing or wrong. A successful open always runs the migration.
    pub fn open(path: &Path, password: &str) -> Result<Option<Self>> {
        let exists = fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
        let encrypted = exists && is_encrypted_file(path)?;
        if encrypted && password.is_empty() {
            return Ok(None);
        }

        let conn = Connection::open(path)?;
        // Key new files so they are created encrypted; never key an existing
        // plaintext file, SQLCipher would try to decrypt it.
        if !password.is_empty() && (encrypted || !exists) {
            conn.pragma_update(None, "key", password)?;
        }
        if login_probe(&conn).is_err() {
            return Ok(None);
        }

        let keyed = encrypted || (!exists && !password.is_empty());
        let repo = Self {
            conn,
            path: path.to_path_buf(),
            password: if keyed { password.to_string() } else { String::new() },
            encrypted: keyed,
        };
        repo.migrate()?;
        Ok(Some(repo))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Versionless migration, re-run on every open. The base tables are
    /// created if missing; every later column is added unconditionally and
    /// "duplicate column name" is swallowed as the already-migrated signal.
    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS metadata(
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            account_type INTEGER NOT NULL DEFAULT 0,
            use_custom_currency INTEGER NOT NULL DEFAULT 0,
            custom_symbol TEXT,
            custom_code TEXT,
            default_transaction_type INTEGER NOT NULL DEFAULT 0,
            sort_first_to_last INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS groups(
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS transactions(
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            type INTEGER NOT NULL DEFAULT 0,
            repeat INTEGER NOT NULL DEFAULT 0,
            amount TEXT NOT NULL
        );
        "#,
        )?;

        // Columns added after the original schema shipped.
        let _ = self.conn.execute(
            "ALTER TABLE transactions ADD COLUMN group_id INTEGER NOT NULL DEFAULT -1",
            [],
        );
        let _ = self.conn.execute(
            "ALTER TABLE transactions ADD COLUMN color TEXT NOT NULL DEFAULT ''",
            [],
        );
        let _ = self
            .conn
            .execute("ALTER TABLE transactions ADD COLUMN receipt TEXT", []);
        let _ = self.conn.execute(
            "ALTER TABLE transactions ADD COLUMN repeat_from INTEGER NOT NULL DEFAULT -1",
            [],
        );
        let _ = self.conn.execute(
            "ALTER TABLE transactions ADD COLUMN repeat_end_date TEXT",
            [],
        );
        let _ = self.conn.execute(
            "ALTER TABLE groups ADD COLUMN color TEXT NOT NULL DEFAULT ''",
            [],
        );
        let _ = self.conn.execute(
            "ALTER TABLE metadata ADD COLUMN show_groups INTEGER NOT NULL DEFAULT 1",
            [],
        );
        let _ = self.conn.execute(
            "ALTER TABLE metadata ADD COLUMN sort_by INTEGER NOT NULL DEFAULT 0",
            [],
        );
        Ok(())
    }

    /// Encryption-state transition. Three cases:
    /// already encrypted + non-empty password = in-place rekey;
    /// unencrypted + non-empty password = export to a keyed copy and swap;
    /// encrypted + empty password = export to a plaintext copy and swap.
    ///
    /// The swap keeps the original as `<file>.bak` until the replacement
    /// passes the login probe, so a failure part-way leaves a restorable file.
    pub fn set_password(&mut self, new_password: &str) -> Result<()> {
        if self.encrypted && !new_password.is_empty() {
            self.conn.pragma_update(None, "rekey", new_password)?;
            self.password = new_password.to_string();
            return Ok(());
        }
        if !self.encrypted && new_password.is_empty() {
            return Ok(());
        }
        self.reencrypt_via_export(new_password)
    }

    fn reencrypt_via_export(&mut self, new_password: &str) -> Result<()> {
        let tmp = sibling(&self.path, "tmp");
        let _ = fs::remove_file(&tmp);

        let tmp_str = tmp.to_string_lossy().to_string();
        self.conn.execute(
            "ATTACH DATABASE ?1 AS target KEY ?2",
            params![tmp_str, new_password],
        )?;
        let export = self
            .conn
            .query_row("SELECT sqlcipher_export('target')", [], |_| Ok(()));
        let detach = self.conn.execute("DETACH DATABASE target", []);
        if let Err(e) = export {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        detach?;

        self.swap_in(&tmp, new_password)
    }

    /// Replace the account file with `replacement`, keeping the original as
    /// `<file>.bak` until the replacement passes the login probe. A failed
    /// reopen restores the backup and the previous connection, so a
    /// part-way failure leaves the account as it was.
    fn swap_in(&mut self, replacement: &Path, new_password: &str) -> Result<()> {
        let bak = sibling(&self.path, "bak");

        // Close the live connection before touching files. The in-memory
        // stand-in is replaced as soon as the swapped file reopens.
        let old = std::mem::replace(&mut self.conn, Connection::open_in_memory()?);
        old.close().map_err(|(_, e)| RepositoryError::Sqlite(e))?;

        fs::rename(&self.path, &bak)?;
        fs::rename(replacement, &self.path)?;

        match reopen(&self.path, new_password) {
            Ok(conn) => {
                self.conn = conn;
                self.encrypted = !new_password.is_empty();
                self.password = new_password.to_string();
                let _ = fs::remove_file(&bak);
                Ok(())
            }
            Err(e) => {
                // Put the original back; the account stays as it was.
                let _ = fs::remove_file(&self.path);
                let _ = fs::rename(&bak, &self.path);
                if let Ok(conn) = reopen(&self.path, &self.password) {
                    self.conn = conn;
                }
                Err(e)
            }
        }
    }

    // Metadata

    pub fn metadata(&self) -> Result<Option<AccountMetadata>> {
        let row = self
            .conn
            .query_row(
                "SELECT name, account_type, use_custom_currency, custom_symbol, custom_code,
                        default_transaction_type, show_groups, sort_first_to_last, sort_by
                 FROM metadata WHERE id=0",
                [],
                |r| {
                    Ok(AccountMetadata {
                        name: r.get(0)?,
                        account_type: AccountType::from_code(r.get(1)?),
                        use_custom_currency: r.get(2)?,
                        custom_symbol: r.get(3)?,
                        custom_code: r.get(4)?,
                        default_transaction_type: TransactionType::from_code(r.get(5)?),
                        show_groups: r.get(6)?,
                        sort_first_to_last: r.get(7)?,
                        sort_by: SortBy::from_code(r.get(8)?),
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn update_metadata(&self, m: &AccountMetadata) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata(
                id, name, account_type, use_custom_currency, custom_symbol, custom_code,
                default_transaction_type, show_groups, sort_first_to_last, sort_by)
             VALUES (0, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                m.name,
                m.account_type.to_code(),
                m.use_custom_currency,
                m.custom_symbol,
                m.custom_code,
                m.default_transaction_type.to_code(),
                m.show_groups,
                m.sort_first_to_last,
                m.sort_by.to_code(),
            ],
        )?;
        Ok(())
    }

    // Groups

    pub fn groups(&self) -> Result<Vec<Group>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, description, color FROM groups ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(Group {
                id: r.get(0)?,
                name: r.get(1)?,
                description: r.get(2)?,
                color: r.get(3)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn add_group(&self, g: &Group) -> Result<()> {
        self.conn.execute(
            "INSERT INTO groups(id, name, description, color) VALUES (?1, ?2, ?3, ?4)",
            params![g.id, g.name, g.description, g.color],
        )?;
        Ok(())
    }

    pub fn update_group(&self, g: &Group) -> Result<()> {
        self.conn.execute(
            "UPDATE groups SET name=?2, description=?3, color=?4 WHERE id=?1",
            params![g.id, g.name, g.description, g.color],
        )?;
        Ok(())
    }

    /// Deleting a group never deletes its transactions; they become ungrouped.
    pub fn delete_group(&self, id: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE transactions SET group_id=?2 WHERE group_id=?1",
            params![id, UNGROUPED],
        )?;
        self.conn
            .execute("DELETE FROM groups WHERE id=?1", params![id])?;
        Ok(())
    }

    // Transactions

    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, description, type, repeat, amount, group_id, color,
                    receipt, repeat_from, repeat_end_date
             FROM transactions ORDER BY id",
        )?;
        let rows = stmt.query_map([], |r| {
            let amount: String = r.get(5)?;
            let amount = amount.parse::<Decimal>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
            })?;
            Ok(Transaction {
                id: r.get(0)?,
                date: r.get::<_, NaiveDate>(1)?,
                description: r.get(2)?,
                kind: TransactionType::from_code(r.get(3)?),
                repeat: RepeatInterval::from_code(r.get(4)?),
                amount,
                group_id: r.get(6)?,
                color: r.get(7)?,
                receipt: r.get(8)?,
                repeat_from: r.get(9)?,
                repeat_end_date: r.get::<_, Option<NaiveDate>>(10)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    pub fn add_transaction(&self, t: &Transaction) -> Result<()> {
        self.conn.execute(
            "INSERT INTO transactions(
                id, date, description, type, repeat, amount, group_id, color,
                receipt, repeat_from, repeat_end_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                t.id,
                t.date,
                t.description,
                t.kind.to_code(),
                t.repeat.to_code(),
                t.amount.to_string(),
                t.group_id,
                t.color,
                t.receipt,
                t.repeat_from,
                t.repeat_end_date,
            ],
        )?;
        Ok(())
    }

    pub fn update_transaction(&self, t: &Transaction) -> Result<()> {
        self.conn.execute(
            "UPDATE transactions SET date=?2, description=?3, type=?4, repeat=?5, amount=?6,
                    group_id=?7, color=?8, receipt=?9, repeat_from=?10, repeat_end_date=?11
             WHERE id=?1",
            params![
                t.id,
                t.date,
                t.description,
                t.kind.to_code(),
                t.repeat.to_code(),
                t.amount.to_string(),
                t.group_id,
                t.color,
                t.receipt,
                t.repeat_from,
                t.repeat_end_date,
            ],
        )?;
        Ok(())
    }

    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        Ok(())
    }
}

/// SQLCipher reports a wrong key as NotADatabase on the first real read,
/// so a cheap catalog query doubles as the login check.
fn login_probe(conn: &Connection) -> rusqlite::Result<()> {
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |r| {
        r.get::<_, i64>(0)
    })?;
    Ok(())
}

fn reopen(path: &Path, password: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;
    if !password.is_empty() {
        conn.pragma_update(None, "key", password)?;
    }
    login_probe(&conn).map_err(|_| RepositoryError::LoginFailed)?;
    Ok(conn)
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(".");
    s.push(suffix);
    PathBuf::from(s)
}
