//! ledgerize-ledger: directory aggregation, run reporting, and ledger CSV output

pub mod aggregator;
pub mod report;
pub mod table;
pub mod writer;

use std::path::Path;

use ledgerize_core::IngestError;

pub use aggregator::{Aggregator, ProcessedStatement};
pub use report::{ProcessedFile, RunReport, SkippedFile};
pub use table::LedgerTable;
pub use writer::{write_ledger, write_ledger_to};

/// Aggregate everything under `root` and write the ledger to `output`.
pub fn aggregate_to_file(
    aggregator: &Aggregator,
    root: &Path,
    output: &Path,
) -> Result<RunReport, IngestError> {
    let (table, report) = aggregator.run(root)?;
    if table.is_empty() {
        tracing::warn!(root = %root.display(), "statements parsed but held no transactions");
    }
    write_ledger(output, &table)?;
    tracing::info!(
        output = %output.display(),
        records = table.len(),
        "wrote ledger"
    );
    Ok(report)
}
