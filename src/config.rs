// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Nmoney", "nmoney"));

/// How many account paths the recent list keeps.
pub const RECENT_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    System,
    Light,
    Dark,
}

/// Process-wide user preferences, persisted as pretty JSON in the platform
/// config dir. Anything unreadable falls back to defaults; preferences are
/// never worth refusing to start over.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub theme: Theme,
    pub transaction_default_color: String,
    pub group_default_color: String,
    pub recent_accounts: Vec<PathBuf>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            transaction_default_color: "#3584e4".to_string(),
            group_default_color: "#33d17a".to_string(),
            recent_accounts: Vec::new(),
        }
    }
}

impl Configuration {
    pub fn load() -> Self {
        let Ok(path) = config_path() else {
            return Self::default();
        };
        fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config dir")?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write config at {}", path.display()))?;
        Ok(())
    }

    /// MRU semantics: move-to-front, dedupe, keep at most `RECENT_SLOTS`.
    pub fn add_recent_account(&mut self, path: &Path) {
        self.recent_accounts.retain(|p| p != path);
        self.recent_accounts.insert(0, path.to_path_buf());
        self.recent_accounts.truncate(RECENT_SLOTS);
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

/// Cache dir for fetched currency-rate documents.
pub fn cache_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific cache dir")?;
    let dir = proj.cache_dir().to_path_buf();
    fs::create_dir_all(&dir).context("Failed to create cache dir")?;
    Ok(dir)
}
