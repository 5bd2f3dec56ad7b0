//! ledgerize-ingest: statement loading (CSV tables / PDF text) and bank-specific parsers.

pub mod dates;
pub mod lines;
pub mod parsers;
pub mod pdf;
pub mod types;

use std::path::Path;

use ledgerize_core::{FileKind, IngestError};

pub use dates::{StatementYear, YearPolicy};
pub use parsers::parser_for;
pub use types::{CsvTable, ParsedStatement, RawStatementDocument, StatementParser};

/// Load a statement file into memory according to its kind.
pub fn load_document(path: &Path, kind: FileKind) -> Result<RawStatementDocument, IngestError> {
    match kind {
        FileKind::Pdf => {
            let text = pdf::extract_text(path, &mut pdf::TracingProgress)?;
            Ok(RawStatementDocument::Text {
                path: path.to_path_buf(),
                text,
            })
        }
        FileKind::Csv => Ok(RawStatementDocument::Table(CsvTable::from_path(path)?)),
    }
}
