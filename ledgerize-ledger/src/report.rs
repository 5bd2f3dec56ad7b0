use std::fmt;
use std::path::PathBuf;

use ledgerize_core::AccountIdentity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub path: PathBuf,
    pub account: AccountIdentity,
    pub parser: &'static str,
    pub records: usize,
    pub warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// What happened to every file seen during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub processed: Vec<ProcessedFile>,
    pub skipped: Vec<SkippedFile>,
}

impl RunReport {
    pub fn total_records(&self) -> usize {
        self.processed.iter().map(|p| p.records).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.processed.iter().map(|p| p.warnings).sum()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processed {} file(s):", self.processed.len())?;
        for p in &self.processed {
            write!(
                f,
                "  {} [{}] {} record(s)",
                p.path.display(),
                p.account,
                p.records
            )?;
            if p.warnings > 0 {
                write!(f, ", {} malformed line(s)", p.warnings)?;
            }
            writeln!(f)?;
        }
        if !self.skipped.is_empty() {
            writeln!(f, "Skipped {} file(s):", self.skipped.len())?;
            for s in &self.skipped {
                writeln!(f, "  {}: {}", s.path.display(), s.reason)?;
            }
        }
        write!(
            f,
            "Total: {} record(s), {} warning(s)",
            self.total_records(),
            self.total_warnings()
        )
    }
}
