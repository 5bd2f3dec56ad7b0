//! Chase credit card CSV export parser
//!
//! Expected header:
//!   Transaction Date,Post Date,Description,Category,Type,Amount,Memo
//!
//! Chase exports purchases as positive amounts; the ledger stores them negated.

use ledgerize_core::{AccountIdentity, IngestError, TransactionRecord};

use crate::dates::parse_csv_date;
use crate::parsers::{cell, parse_csv_amount};
use crate::types::{ParsedStatement, RawStatementDocument, StatementParser};

#[derive(Debug, Clone, Copy, Default)]
pub struct ChaseCreditCardParser;

impl StatementParser for ChaseCreditCardParser {
    fn name(&self) -> &'static str {
        "chase-credit-card"
    }

    fn parse(
        &self,
        doc: &RawStatementDocument,
        account: AccountIdentity,
    ) -> Result<ParsedStatement, IngestError> {
        let table = doc.as_table()?;
        let [date_col, desc_col, amount_col] =
            table.require_columns(["Post Date", "Description", "Amount"])?;

        let mut out = ParsedStatement::default();
        for (i, row) in table.rows.iter().enumerate() {
            let line_no = i + 1;
            let raw = row.iter().collect::<Vec<_>>().join(",");

            let Some(date) = parse_csv_date(cell(row, date_col)) else {
                out.warn(line_no, raw, "unparsable Post Date");
                continue;
            };
            let Some(amount) = parse_csv_amount(cell(row, amount_col)) else {
                out.warn(line_no, raw, "unparsable Amount");
                continue;
            };

            out.records.push(TransactionRecord::new(
                date,
                cell(row, desc_col),
                -amount,
                account,
            ));
        }

        Ok(out)
    }
}
