pub mod chase;
pub mod first_republic;
pub mod wells_fargo;

use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use ledgerize_core::{AccountIdentity, FileKind, IngestError};

use crate::dates::YearPolicy;
use crate::types::StatementParser;

pub use chase::ChaseCreditCardParser;
pub use first_republic::FirstRepublicParser;
pub use wells_fargo::WellsFargoParser;

/// Pick the parser for an account's statement file.
pub fn parser_for(
    path: &Path,
    account: AccountIdentity,
    kind: FileKind,
    year: YearPolicy,
) -> Result<Box<dyn StatementParser>, IngestError> {
    match (account, kind) {
        (AccountIdentity::WellsFargoCreditCard, FileKind::Pdf) => {
            Ok(Box::new(WellsFargoParser::credit_card(year)))
        }
        (AccountIdentity::WellsFargoChecking, FileKind::Pdf) => {
            Ok(Box::new(WellsFargoParser::checking(year)))
        }
        (AccountIdentity::ChaseCreditCard, FileKind::Csv) => Ok(Box::new(ChaseCreditCardParser)),
        (AccountIdentity::FirstRepublicChecking, FileKind::Csv) => {
            Ok(Box::new(FirstRepublicParser::checking()))
        }
        (AccountIdentity::FirstRepublicMortgage, FileKind::Csv) => {
            Ok(Box::new(FirstRepublicParser::mortgage()))
        }
        _ => Err(IngestError::UnsupportedFile {
            path: path.to_path_buf(),
            account,
            kind,
        }),
    }
}

pub(crate) fn cell(row: &csv::StringRecord, col: usize) -> &str {
    row.get(col).unwrap_or("").trim()
}

/// "1,234.56", "$12.00", "-5" → Decimal. Empty cells are `None`.
pub(crate) fn parse_csv_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_csv_amount() {
        assert_eq!(parse_csv_amount("1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_csv_amount(" $12.00 "), Some(dec!(12.00)));
        assert_eq!(parse_csv_amount("-5"), Some(dec!(-5)));
        assert_eq!(parse_csv_amount(""), None);
        assert_eq!(parse_csv_amount("abc"), None);
    }

    #[test]
    fn test_dispatch_matches_account_file_kind() {
        for account in AccountIdentity::ALL {
            let p = Path::new("x");
            assert!(parser_for(p, account, account.file_kind(), YearPolicy::Fixed(2023)).is_ok());
        }
        let err = parser_for(
            Path::new("CCC.pdf"),
            AccountIdentity::ChaseCreditCard,
            FileKind::Pdf,
            YearPolicy::Infer,
        )
        .err()
        .unwrap();
        assert!(matches!(err, IngestError::UnsupportedFile { .. }));
    }

    #[test]
    fn test_parser_names() {
        let name = |a: AccountIdentity| {
            parser_for(Path::new("x"), a, a.file_kind(), YearPolicy::Infer)
                .unwrap()
                .name()
        };
        assert_eq!(name(AccountIdentity::WellsFargoChecking), "wells-fargo-checking");
        assert_eq!(name(AccountIdentity::FirstRepublicMortgage), "first-republic-mortgage");
    }
}
