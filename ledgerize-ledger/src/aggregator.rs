//! Walks a statement directory and folds every recognised file into one ledger.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use ledgerize_core::{AccountTable, FileKind, IngestError};
use ledgerize_ingest::{ParsedStatement, YearPolicy, load_document, parser_for};

use crate::report::{ProcessedFile, RunReport, SkippedFile};
use crate::table::LedgerTable;

#[derive(Debug, Clone)]
pub struct Aggregator {
    accounts: AccountTable,
    year: YearPolicy,
    exclude: Option<PathBuf>,
}

impl Aggregator {
    pub fn new(accounts: AccountTable, year: YearPolicy) -> Self {
        Self {
            accounts,
            year,
            exclude: None,
        }
    }

    /// Never read `path` as input (the ledger output may live under the input root).
    pub fn excluding(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude = Some(path.into());
        self
    }

    /// Process every file under `root`, in sorted order.
    ///
    /// Per-file failures are logged and recorded in the report; only a run
    /// that produced nothing usable is an error.
    pub fn run(&self, root: &Path) -> Result<(LedgerTable, RunReport), IngestError> {
        if !root.is_dir() {
            return Err(IngestError::NoInput {
                root: root.to_path_buf(),
            });
        }

        let exclude = self
            .exclude
            .as_ref()
            .map(|p| std::fs::canonicalize(p).unwrap_or_else(|_| p.clone()));

        let mut table = LedgerTable::new();
        let mut report = RunReport::default();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    report.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if let Some(ex) = &exclude {
                if std::fs::canonicalize(path).map(|p| &p == ex).unwrap_or(false) {
                    tracing::debug!(path = %path.display(), "skipping ledger output");
                    continue;
                }
            }

            let Some(kind) = FileKind::from_path(path) else {
                tracing::debug!(path = %path.display(), "not a statement file");
                report.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: "not a statement file (.pdf/.csv)".to_string(),
                });
                continue;
            };

            // Tokens are matched below the root so the root's own location never decides.
            let relative = path.strip_prefix(root).unwrap_or(path);
            match self.process(path, relative, kind) {
                Ok(processed) => {
                    let ProcessedStatement { file, parsed } = processed;
                    for w in &parsed.warnings {
                        tracing::warn!(path = %path.display(), "malformed line skipped: {w}");
                    }
                    tracing::info!(
                        path = %path.display(),
                        account = %file.account,
                        records = file.records,
                        "parsed statement"
                    );
                    table.append(parsed.records);
                    report.processed.push(file);
                }
                Err(e) if e.is_per_file() => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping file");
                    report.skipped.push(SkippedFile {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if report.processed.is_empty() {
            return Err(IngestError::NoInput {
                root: root.to_path_buf(),
            });
        }

        Ok((table, report))
    }

    /// Identify, load and parse a single statement file.
    fn process(
        &self,
        path: &Path,
        match_path: &Path,
        kind: FileKind,
    ) -> Result<ProcessedStatement, IngestError> {
        let account = self.accounts.identify(match_path)?;
        tracing::debug!(path = %path.display(), %account, %kind, "identified account");

        let parser = parser_for(path, account, kind, self.year)?;
        let doc = load_document(path, kind)?;
        let parsed = parser.parse(&doc, account)?;

        Ok(ProcessedStatement {
            file: ProcessedFile {
                path: path.to_path_buf(),
                account,
                parser: parser.name(),
                records: parsed.records.len(),
                warnings: parsed.warnings.len(),
            },
            parsed,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProcessedStatement {
    pub file: ProcessedFile,
    pub parsed: ParsedStatement,
}
