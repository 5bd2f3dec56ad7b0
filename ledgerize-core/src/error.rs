//! Error taxonomy shared by the ingest and ledger crates.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::account::{AccountIdentity, FileKind};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no account token found in {}", .path.display())]
    AccountNotFound { path: PathBuf },

    #[error("{} matches several accounts: {}", .path.display(), join_accounts(.candidates))]
    AmbiguousAccount {
        path: PathBuf,
        candidates: Vec<AccountIdentity>,
    },

    #[error("could not read {}: {reason}", .path.display())]
    DocumentRead { path: PathBuf, reason: String },

    #[error("{}: missing columns {}", .path.display(), .missing.join(", "))]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },

    #[error("no {kind} parser for {account} ({})", .path.display())]
    UnsupportedFile {
        path: PathBuf,
        account: AccountIdentity,
        kind: FileKind,
    },

    #[error("no statement year configured and none found in {}", .path.display())]
    UndatedStatement { path: PathBuf },

    #[error("no usable statement files under {}", .root.display())]
    NoInput { root: PathBuf },

    #[error("writing {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// True for errors that only disqualify a single input file.
    pub fn is_per_file(&self) -> bool {
        !matches!(self, IngestError::NoInput { .. } | IngestError::Output { .. })
    }
}

fn join_accounts(accounts: &[AccountIdentity]) -> String {
    accounts
        .iter()
        .map(|a| a.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A line or row that looked like a transaction but could not be turned into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line (PDF text) or data row (CSV) number.
    pub line_no: usize,
    pub text: String,
    pub reason: String,
}

impl fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line_no, self.reason, self.text)
    }
}
