//! Wells Fargo PDF statement parsers (credit card and checking).
//!
//! Expected text rows after PDF-to-text (credit card):
//!   03/14 03/15 1234567890 ABC STORE #12 SEATTLE WA        45.67
//!
//! Checking statements right-align long rows, so the amount can land on
//! the following line:
//!   3/2 Online Transfer to Savings Ref #IB0D2 xxxxxx1234
//!                                               250.00

use chrono::Datelike;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

use ledgerize_core::{AccountIdentity, IngestError, TransactionRecord};

use crate::dates::{StatementYear, YearPolicy};
use crate::lines::{LineCandidate, LineLayout, LineScanner};
use crate::types::{ParsedStatement, RawStatementDocument, StatementParser};

/// Characters between the `MM/DD` date and the start of the description.
const DESCRIPTION_OFFSET: usize = 24;

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,2}/\d{1,2}").expect("date regex"))
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\d,]*\d+\.\d{2}\s*$").expect("amount regex"))
}

fn description_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"\d{{2}}/\d{{2}}.{{{DESCRIPTION_OFFSET}}}(.*)"))
            .expect("description regex")
    })
}

#[derive(Debug, Clone, Copy)]
pub struct WellsFargoParser {
    layout: LineLayout,
    year: YearPolicy,
}

impl WellsFargoParser {
    pub fn credit_card(year: YearPolicy) -> Self {
        Self {
            layout: LineLayout::SingleLine,
            year,
        }
    }

    pub fn checking(year: YearPolicy) -> Self {
        Self {
            layout: LineLayout::WrappedAmount,
            year,
        }
    }
}

impl StatementParser for WellsFargoParser {
    fn name(&self) -> &'static str {
        match self.layout {
            LineLayout::SingleLine => "wells-fargo-credit-card",
            LineLayout::WrappedAmount => "wells-fargo-checking",
        }
    }

    fn parse(
        &self,
        doc: &RawStatementDocument,
        account: AccountIdentity,
    ) -> Result<ParsedStatement, IngestError> {
        let text = doc.as_text()?;
        let year = self
            .year
            .resolve(text)
            .ok_or_else(|| IngestError::UndatedStatement {
                path: doc.path().to_path_buf(),
            })?;
        Ok(parse_wells_fargo_text(text, self.layout, year, account))
    }
}

/// Parse extracted statement text into transactions.
///
/// `statement_year` is required because rows are MM/DD; a statement period
/// stamps each row with the year that places it inside the period.
pub fn parse_wells_fargo_text(
    text: &str,
    layout: LineLayout,
    statement_year: impl Into<StatementYear>,
    account: AccountIdentity,
) -> ParsedStatement {
    let statement_year = statement_year.into();
    let mut out = ParsedStatement::default();

    for candidate in LineScanner::new(layout).scan(text) {
        match parse_candidate(&candidate, &statement_year, account) {
            Ok(record) => out.records.push(record),
            Err(reason) => out.warn(candidate.line_no, candidate.text, reason),
        }
    }

    out
}

fn parse_candidate(
    candidate: &LineCandidate,
    year: &StatementYear,
    account: AccountIdentity,
) -> Result<TransactionRecord, &'static str> {
    let line = candidate.text.as_str();

    let date_str = date_re().find(line).ok_or("no leading date")?.as_str();
    let date = year.stamp(date_str).ok_or("invalid calendar date")?;
    let stamped = format!("{date_str}/{}", date.year());

    let amount_str = amount_re()
        .find(line)
        .ok_or("date without a trailing amount")?
        .as_str();
    let amount = Decimal::from_str(&amount_str.trim().replace(',', ""))
        .map_err(|_| "unparsable amount")?;

    let description = description_re()
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().replace(&stamped, "").trim().to_string())
        .unwrap_or_default();

    Ok(TransactionRecord::new(date, description, amount, account))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    const CC: AccountIdentity = AccountIdentity::WellsFargoCreditCard;
    const CH: AccountIdentity = AccountIdentity::WellsFargoChecking;

    #[test]
    fn test_credit_card_reference_line() {
        let line = "03/14 SOME STORE 1234567890123456789012PURCHASE DESC 45.67";
        let parsed = parse_wells_fargo_text(line, LineLayout::SingleLine, 2023, CC);
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.records.len(), 1);

        let r = &parsed.records[0];
        assert_eq!(r.formatted_date(), "03/14/2023");
        assert_eq!(r.amount(), dec!(45.67));
        assert_eq!(r.formatted_amount(), "45.67");
        assert_eq!(r.description(), "3456789012PURCHASE DESC 45.67");
        assert_eq!(r.account(), CC);
    }

    #[test]
    fn test_credit_card_statement_block() {
        let text = r#"
Transactions
Trans  Post   Reference Number       Description                Credits   Charges
02/01  02/02  8543218AB3ZXY0912      SAFEWAY #1234 SEATTLE WA              82.14
02/03  02/04  8543218AB3ZXY0913      AIRLINE TICKETS                     1,204.50
Total charges 1,286.64
"#;
        let parsed = parse_wells_fargo_text(text, LineLayout::SingleLine, 2024, CC);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(parsed.records[1].amount(), dec!(1204.50));
        assert!(parsed.records[0].description().contains("SAFEWAY #1234"));
    }

    #[test]
    fn test_amount_sign_taken_as_is() {
        let text = "02/05  02/06  8543218AB3ZXY0914      PAYMENT THANK YOU   500.00";
        let parsed = parse_wells_fargo_text(text, LineLayout::SingleLine, 2024, CC);
        assert_eq!(parsed.records[0].amount(), dec!(500.00));
    }

    #[test]
    fn test_short_line_gets_empty_description() {
        let parsed = parse_wells_fargo_text("03/14 TEA 4.50", LineLayout::SingleLine, 2023, CC);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].description(), "");
    }

    #[test]
    fn test_recurring_stamped_date_is_removed() {
        let line = "03/14 ABCDEFGHIJKLMNOPQRSTUVW HOLD RELEASED 03/14/2023 12.00";
        let parsed = parse_wells_fargo_text(line, LineLayout::SingleLine, 2023, CC);
        assert_eq!(parsed.records[0].description(), "HOLD RELEASED  12.00");
    }

    #[test]
    fn test_invalid_date_is_warned_and_skipped() {
        let parsed = parse_wells_fargo_text("13/45 NOWHERE 1.00", LineLayout::SingleLine, 2023, CC);
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].line_no, 1);
    }

    #[test]
    fn test_checking_wrapped_amount() {
        let text = "\
01/05 Online Transfer to Savings Ref #IB0D2 xxxxxx1234
                                                 250.00
01/06 Mobile Deposit : Ref Number :613150 Payroll   1,500.00
";
        let parsed = parse_wells_fargo_text(text, LineLayout::WrappedAmount, 2023, CH);
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].amount(), dec!(250.00));
        assert_eq!(parsed.records[0].description(), "ngs Ref #IB0D2 xxxxxx1234");
        assert_eq!(parsed.records[1].amount(), dec!(1500.00));
        assert_eq!(parsed.records[1].account(), CH);
    }

    #[test]
    fn test_checking_date_without_amount_is_warned() {
        let text = "1/9 Beginning balance on 1/9\n1/10 ATM Withdrawal 60.00\n";
        let parsed = parse_wells_fargo_text(text, LineLayout::WrappedAmount, 2023, CH);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].amount(), dec!(60.00));
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].reason, "date without a trailing amount");
    }

    #[test]
    fn test_parser_infers_year_from_header() {
        let doc = RawStatementDocument::Text {
            path: PathBuf::from("WFCC.pdf"),
            text: "Statement Period 12/15/2022 to 01/14/2023\n12/20 GROCERY 10.00\n".into(),
        };
        let parsed = WellsFargoParser::credit_card(YearPolicy::Infer)
            .parse(&doc, CC)
            .unwrap();
        assert_eq!(parsed.records[0].date(), NaiveDate::from_ymd_opt(2022, 12, 20).unwrap());
    }

    #[test]
    fn test_parser_dates_january_rows_in_closing_year() {
        let doc = RawStatementDocument::Text {
            path: PathBuf::from("WFCC.pdf"),
            text: "Statement Period 12/15/2022 to 01/14/2023\n\
                   12/20 GROCERY 10.00\n\
                   01/05 COFFEE 4.50\n"
                .into(),
        };
        let parsed = WellsFargoParser::credit_card(YearPolicy::Infer)
            .parse(&doc, CC)
            .unwrap();
        let dates: Vec<String> = parsed.records.iter().map(|r| r.formatted_date()).collect();
        assert_eq!(dates, ["12/20/2022", "01/05/2023"]);
    }

    #[test]
    fn test_period_stamp_removed_from_description() {
        let start = NaiveDate::from_ymd_opt(2022, 12, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 14).unwrap();
        let line = "01/05 ABCDEFGHIJKLMNOPQRSTUVW HOLD 01/05/2023 12.00";
        let parsed = parse_wells_fargo_text(
            line,
            LineLayout::SingleLine,
            StatementYear::Period { start, end },
            CC,
        );
        assert_eq!(parsed.records[0].description(), "HOLD  12.00");
    }

    #[test]
    fn test_parser_without_year_fails() {
        let doc = RawStatementDocument::Text {
            path: PathBuf::from("WFCC.pdf"),
            text: "12/20 GROCERY 10.00\n".into(),
        };
        let err = WellsFargoParser::credit_card(YearPolicy::Infer)
            .parse(&doc, CC)
            .unwrap_err();
        assert!(matches!(err, IngestError::UndatedStatement { .. }));
    }
}
