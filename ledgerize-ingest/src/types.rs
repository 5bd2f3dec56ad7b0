use std::path::{Path, PathBuf};

use ledgerize_core::{AccountIdentity, IngestError, MalformedLine, TransactionRecord};

/// A statement loaded into memory for exactly one parse call.
#[derive(Debug, Clone, PartialEq)]
pub enum RawStatementDocument {
    /// Concatenated page text of a PDF statement.
    Text { path: PathBuf, text: String },
    /// A CSV export.
    Table(CsvTable),
}

impl RawStatementDocument {
    pub fn path(&self) -> &Path {
        match self {
            RawStatementDocument::Text { path, .. } => path,
            RawStatementDocument::Table(t) => &t.path,
        }
    }

    pub fn as_text(&self) -> Result<&str, IngestError> {
        match self {
            RawStatementDocument::Text { text, .. } => Ok(text),
            RawStatementDocument::Table(t) => Err(IngestError::SchemaMismatch {
                path: t.path.clone(),
                missing: vec!["<statement text>".to_string()],
            }),
        }
    }

    pub fn as_table(&self) -> Result<&CsvTable, IngestError> {
        match self {
            RawStatementDocument::Table(t) => Ok(t),
            RawStatementDocument::Text { path, .. } => Err(IngestError::SchemaMismatch {
                path: path.clone(),
                missing: vec!["<csv header>".to_string()],
            }),
        }
    }
}

/// Header row plus string records of a CSV statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<csv::StringRecord>,
}

impl CsvTable {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| read_error(path, e))?;
        Self::from_reader(path, rdr)
    }

    /// Parse CSV text already in memory; `path` is only used for error messages.
    pub fn from_text(path: impl AsRef<Path>, text: &str) -> Result<Self, IngestError> {
        let rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());
        Self::from_reader(path.as_ref(), rdr)
    }

    fn from_reader<R: std::io::Read>(
        path: &Path,
        mut rdr: csv::Reader<R>,
    ) -> Result<Self, IngestError> {
        let headers = rdr
            .headers()
            .map_err(|e| read_error(path, e))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| read_error(path, e))?;
            // Blank trailing lines
            if record.iter().all(|c| c.is_empty()) {
                continue;
            }
            rows.push(record);
        }

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    /// Resolve column indices by header name, reporting every missing one at once.
    pub fn require_columns<const N: usize>(
        &self,
        names: [&str; N],
    ) -> Result<[usize; N], IngestError> {
        let mut idx = [0usize; N];
        let mut missing = Vec::new();
        for (slot, name) in idx.iter_mut().zip(names) {
            match self.column(name) {
                Some(i) => *slot = i,
                None => missing.push(name.to_string()),
            }
        }
        if missing.is_empty() {
            Ok(idx)
        } else {
            Err(IngestError::SchemaMismatch {
                path: self.path.clone(),
                missing,
            })
        }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

fn read_error(path: &Path, e: csv::Error) -> IngestError {
    IngestError::DocumentRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

/// Output of one parser run over one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedStatement {
    pub records: Vec<TransactionRecord>,
    pub warnings: Vec<MalformedLine>,
}

impl ParsedStatement {
    pub(crate) fn warn(&mut self, line_no: usize, text: impl Into<String>, reason: impl Into<String>) {
        self.warnings.push(MalformedLine {
            line_no,
            text: text.into(),
            reason: reason.into(),
        });
    }
}

/// Converts one loaded statement into ledger records for `account`.
pub trait StatementParser {
    fn name(&self) -> &'static str;

    fn parse(
        &self,
        doc: &RawStatementDocument,
        account: AccountIdentity,
    ) -> Result<ParsedStatement, IngestError>;
}
