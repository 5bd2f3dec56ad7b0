//! Flat CSV serialization of the ledger.
//!
//! Columns: zero-based row index (blank header), Date, Description, Amount, Account.

use std::io::Write;
use std::path::Path;

use ledgerize_core::IngestError;

use crate::table::LedgerTable;

pub const HEADER: [&str; 5] = ["", "Date", "Description", "Amount", "Account"];

/// Write the ledger to `path`, replacing whatever is there.
pub fn write_ledger(path: &Path, table: &LedgerTable) -> Result<(), IngestError> {
    let output_error = |e: std::io::Error| IngestError::Output {
        path: path.to_path_buf(),
        source: e,
    };
    let file = std::fs::File::create(path).map_err(output_error)?;
    write_ledger_to(file, table).map_err(|e| output_error(e.into()))
}

pub fn write_ledger_to<W: Write>(out: W, table: &LedgerTable) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;
    for (i, r) in table.records().iter().enumerate() {
        wtr.write_record([
            i.to_string(),
            r.formatted_date(),
            r.description().to_string(),
            r.formatted_amount(),
            r.account().name().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
