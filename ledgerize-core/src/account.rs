//! Account identities and the token table used to classify statement files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::IngestError;

/// The closed set of accounts whose statements we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountIdentity {
    ChaseCreditCard,
    WellsFargoChecking,
    WellsFargoCreditCard,
    FirstRepublicChecking,
    FirstRepublicMortgage,
}

impl AccountIdentity {
    pub const ALL: [AccountIdentity; 5] = [
        AccountIdentity::ChaseCreditCard,
        AccountIdentity::WellsFargoChecking,
        AccountIdentity::WellsFargoCreditCard,
        AccountIdentity::FirstRepublicChecking,
        AccountIdentity::FirstRepublicMortgage,
    ];

    /// Name written to the ledger's `Account` column and used as config key.
    pub fn name(&self) -> &'static str {
        match self {
            AccountIdentity::ChaseCreditCard => "CHASE_CREDIT_CARD",
            AccountIdentity::WellsFargoChecking => "WELLS_FARGO_CHECKING",
            AccountIdentity::WellsFargoCreditCard => "WELLS_FARGO_CREDIT_CARD",
            AccountIdentity::FirstRepublicChecking => "FIRST_REPUBLIC_CHECKING",
            AccountIdentity::FirstRepublicMortgage => "FIRST_REPUBLIC_MORTGAGE",
        }
    }

    /// Path token recognised when no override is configured.
    pub fn default_token(&self) -> &'static str {
        match self {
            AccountIdentity::ChaseCreditCard => "CCC",
            AccountIdentity::WellsFargoChecking => "WFCh",
            AccountIdentity::WellsFargoCreditCard => "WFCC",
            AccountIdentity::FirstRepublicChecking => "FRC",
            AccountIdentity::FirstRepublicMortgage => "FRM",
        }
    }

    /// The only file kind this account's statements arrive in.
    pub fn file_kind(&self) -> FileKind {
        match self {
            AccountIdentity::WellsFargoChecking | AccountIdentity::WellsFargoCreditCard => {
                FileKind::Pdf
            }
            AccountIdentity::ChaseCreditCard
            | AccountIdentity::FirstRepublicChecking
            | AccountIdentity::FirstRepublicMortgage => FileKind::Csv,
        }
    }
}

impl fmt::Display for AccountIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccountIdentity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AccountIdentity::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown account: {s}"))
    }
}

/// Statement file kinds, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Csv,
}

impl FileKind {
    /// `None` for anything that is not `.pdf` / `.csv` (case-insensitive).
    pub fn from_path(path: &Path) -> Option<FileKind> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(FileKind::Pdf)
        } else if ext.eq_ignore_ascii_case("csv") {
            Some(FileKind::Csv)
        } else {
            None
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Pdf => f.write_str("pdf"),
            FileKind::Csv => f.write_str("csv"),
        }
    }
}

/// Token → identity lookup. Each identity owns one or more substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountTable {
    entries: Vec<(AccountIdentity, Vec<String>)>,
}

impl Default for AccountTable {
    fn default() -> Self {
        Self {
            entries: AccountIdentity::ALL
                .into_iter()
                .map(|a| (a, vec![a.default_token().to_string()]))
                .collect(),
        }
    }
}

impl AccountTable {
    /// Replace the tokens of one identity.
    pub fn with_tokens(mut self, account: AccountIdentity, tokens: Vec<String>) -> Self {
        if let Some(entry) = self.entries.iter_mut().find(|(a, _)| *a == account) {
            entry.1 = tokens;
        }
        self
    }

    /// Find the single account whose token occurs in `path`.
    ///
    /// Several tokens of the same account may match; tokens of two different
    /// accounts may not.
    pub fn identify(&self, path: &Path) -> Result<AccountIdentity, IngestError> {
        let haystack = path.to_string_lossy();
        let candidates: Vec<AccountIdentity> = self
            .entries
            .iter()
            .filter(|(_, tokens)| {
                tokens
                    .iter()
                    .any(|t| !t.is_empty() && haystack.contains(t.as_str()))
            })
            .map(|(a, _)| *a)
            .collect();

        match candidates.as_slice() {
            [] => Err(IngestError::AccountNotFound {
                path: path.to_path_buf(),
            }),
            [only] => Ok(*only),
            _ => Err(IngestError::AmbiguousAccount {
                path: path.to_path_buf(),
                candidates,
            }),
        }
    }
}
