use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ledgerize_core::{AccountIdentity, AccountTable};

use crate::state::{ensure_ledgerize_home, ledgerize_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsSection,
    pub statement: StatementSection,
    /// Account name (e.g. `WELLS_FARGO_CHECKING`) → path tokens.
    /// Accounts not listed keep their default token.
    pub accounts: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    pub input_dir: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementSection {
    /// Year stamped onto MM/DD statement dates. Absent: inferred per statement.
    pub year: Option<i32>,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./statements"),
            output: PathBuf::from("./aggregated_statement.csv"),
        }
    }
}

impl Config {
    /// Build the token table, rejecting unknown accounts and empty tokens.
    pub fn account_table(&self) -> Result<AccountTable> {
        let mut table = AccountTable::default();
        for (name, tokens) in &self.accounts {
            let account: AccountIdentity = name
                .parse()
                .map_err(|e: String| anyhow::anyhow!("[accounts] {e}"))?;
            if tokens.is_empty() || tokens.iter().any(|t| t.trim().is_empty()) {
                bail!("[accounts] {name}: tokens must be non-empty");
            }
            table = table.with_tokens(account, tokens.clone());
        }
        Ok(table)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ledgerize_home()?.join("config.toml"))
}

/// Load `path` (or the default location); a missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        if path.is_some() {
            bail!("config file not found: {}", p.display());
        }
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;
    cfg.account_table()?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    ensure_ledgerize_home()?;
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let mut cfg = Config::default();
    for account in AccountIdentity::ALL {
        cfg.accounts
            .insert(account.name().to_string(), vec![account.default_token().to_string()]);
    }
    let p = save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}
