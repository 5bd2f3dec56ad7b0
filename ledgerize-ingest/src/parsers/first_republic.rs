//! First Republic checking and mortgage CSV export parsers
//!
//! Expected header:
//!   Date,Statement Description,Debit,Credit,Balance
//!
//! Amount is -(Debit + Credit). Mortgage exports leave Debit empty on
//! pure-credit rows; that parser counts an empty Debit as zero.

use rust_decimal::Decimal;

use ledgerize_core::{AccountIdentity, IngestError, TransactionRecord};

use crate::dates::parse_csv_date;
use crate::parsers::{cell, parse_csv_amount};
use crate::types::{ParsedStatement, RawStatementDocument, StatementParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstRepublicParser {
    missing_debit_is_zero: bool,
}

impl FirstRepublicParser {
    pub fn checking() -> Self {
        Self {
            missing_debit_is_zero: false,
        }
    }

    pub fn mortgage() -> Self {
        Self {
            missing_debit_is_zero: true,
        }
    }
}

impl StatementParser for FirstRepublicParser {
    fn name(&self) -> &'static str {
        if self.missing_debit_is_zero {
            "first-republic-mortgage"
        } else {
            "first-republic-checking"
        }
    }

    fn parse(
        &self,
        doc: &RawStatementDocument,
        account: AccountIdentity,
    ) -> Result<ParsedStatement, IngestError> {
        let table = doc.as_table()?;
        let [date_col, desc_col, credit_col] =
            table.require_columns(["Date", "Statement Description", "Credit"])?;
        // Mortgage exports may drop the Debit column entirely.
        let debit_col = match table.column("Debit") {
            Some(i) => Some(i),
            None if self.missing_debit_is_zero => None,
            None => {
                return Err(IngestError::SchemaMismatch {
                    path: table.path.clone(),
                    missing: vec!["Debit".to_string()],
                });
            }
        };

        let mut out = ParsedStatement::default();
        for (i, row) in table.rows.iter().enumerate() {
            let line_no = i + 1;
            let raw = row.iter().collect::<Vec<_>>().join(",");

            let Some(date) = parse_csv_date(cell(row, date_col)) else {
                out.warn(line_no, raw, "unparsable Date");
                continue;
            };

            let debit_raw = debit_col.map(|c| cell(row, c)).unwrap_or("");
            let debit = if debit_raw.is_empty() && self.missing_debit_is_zero {
                Some(Decimal::ZERO)
            } else {
                parse_csv_amount(debit_raw)
            };
            let Some(debit) = debit else {
                out.warn(line_no, raw, "missing or unparsable Debit");
                continue;
            };
            let Some(credit) = parse_csv_amount(cell(row, credit_col)) else {
                out.warn(line_no, raw, "missing or unparsable Credit");
                continue;
            };

            out.records.push(TransactionRecord::new(
                date,
                cell(row, desc_col),
                -(debit + credit),
                account,
            ));
        }

        Ok(out)
    }
}
