//! Date helpers shared by the statement parsers.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// How a year is attached to statement dates that only carry `MM/DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearPolicy {
    Fixed(i32),
    /// Read the statement period from the text and date rows inside it.
    Infer,
}

impl YearPolicy {
    pub fn resolve(&self, text: &str) -> Option<StatementYear> {
        match self {
            YearPolicy::Fixed(y) => Some(StatementYear::Fixed(*y)),
            YearPolicy::Infer => {
                let (start, end) = infer_statement_period(text)?;
                Some(StatementYear::Period { start, end })
            }
        }
    }
}

impl From<Option<i32>> for YearPolicy {
    fn from(year: Option<i32>) -> Self {
        year.map(YearPolicy::Fixed).unwrap_or(YearPolicy::Infer)
    }
}

/// The year context a single statement's `MM/DD` rows are stamped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementYear {
    Fixed(i32),
    /// A period may span a year boundary (12/15/2022 - 01/14/2023).
    Period { start: NaiveDate, end: NaiveDate },
}

impl From<i32> for StatementYear {
    fn from(year: i32) -> Self {
        StatementYear::Fixed(year)
    }
}

impl StatementYear {
    /// "12/20" → the date in the period's start or end year that lies inside
    /// the period; the end year when neither does.
    pub fn stamp(&self, mm_dd: &str) -> Option<NaiveDate> {
        match *self {
            StatementYear::Fixed(y) => parse_mm_dd_with_year(mm_dd, y),
            StatementYear::Period { start, end } => [start.year(), end.year()]
                .into_iter()
                .filter_map(|y| parse_mm_dd_with_year(mm_dd, y))
                .find(|d| (start..=end).contains(d))
                .or_else(|| parse_mm_dd_with_year(mm_dd, end.year())),
        }
    }
}

fn full_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("static regex"))
}

/// Statement headers carry the period ("Statement Period 12/15/2022 to 01/14/2023").
///
/// Uses the first two valid full dates; a single date is a one-day period.
pub fn infer_statement_period(text: &str) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = full_date_re().captures_iter(text).filter_map(|caps| {
        let m: u32 = caps[1].parse().ok()?;
        let d: u32 = caps[2].parse().ok()?;
        let y: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(y, m, d)
    });
    let first = dates.next()?;
    let second = dates.next().unwrap_or(first);
    Some((first.min(second), first.max(second)))
}

/// "3/14" + 2023
pub fn parse_mm_dd_with_year(s: &str, year: i32) -> Option<NaiveDate> {
    let mut it = s.trim().split('/');
    let m: u32 = it.next()?.parse().ok()?;
    let d: u32 = it.next()?.parse().ok()?;
    if it.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, m, d)
}

/// Dates as they appear in bank CSV exports: `MM/DD/YYYY`, `MM/DD/YY`, `YYYY-MM-DD`.
pub fn parse_csv_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let fmt = match s.rsplit_once('/') {
        Some((_, year)) if year.len() == 2 => "%m/%d/%y",
        Some((_, year)) if year.len() == 4 => "%m/%d/%Y",
        Some(_) => return None,
        None => "%Y-%m-%d",
    };
    NaiveDate::parse_from_str(s, fmt).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mm_dd_with_year() {
        assert_eq!(parse_mm_dd_with_year("03/14", 2023), Some(ymd(2023, 3, 14)));
        assert_eq!(parse_mm_dd_with_year("3/4", 2024), Some(ymd(2024, 3, 4)));
        assert_eq!(parse_mm_dd_with_year("02/30", 2023), None);
        assert_eq!(parse_mm_dd_with_year("02/03/2023", 2023), None);
    }

    #[test]
    fn test_csv_date_formats() {
        let expected = Some(ymd(2023, 1, 5));
        assert_eq!(parse_csv_date("01/05/2023"), expected);
        assert_eq!(parse_csv_date("2023-01-05"), expected);
        assert_eq!(parse_csv_date(" 1/5/23 "), expected);
        assert_eq!(parse_csv_date("01/05/023"), None);
        assert_eq!(parse_csv_date("Jan 5"), None);
    }

    #[test]
    fn test_infer_period_skips_invalid_dates() {
        let text = "Ref 99/99/1999\nStatement Period 12/15/2022 - 01/14/2023";
        assert_eq!(
            infer_statement_period(text),
            Some((ymd(2022, 12, 15), ymd(2023, 1, 14)))
        );
        assert_eq!(infer_statement_period("03/14 COFFEE 4.50"), None);
        assert_eq!(
            infer_statement_period("Closing date 02/28/2024"),
            Some((ymd(2024, 2, 28), ymd(2024, 2, 28)))
        );
    }

    #[test]
    fn test_period_stamps_across_year_boundary() {
        let period = StatementYear::Period {
            start: ymd(2022, 12, 15),
            end: ymd(2023, 1, 14),
        };
        assert_eq!(period.stamp("12/20"), Some(ymd(2022, 12, 20)));
        assert_eq!(period.stamp("01/05"), Some(ymd(2023, 1, 5)));
        // Outside the period: end year
        assert_eq!(period.stamp("06/01"), Some(ymd(2023, 6, 1)));
        assert_eq!(StatementYear::from(2021).stamp("06/01"), Some(ymd(2021, 6, 1)));
    }

    #[test]
    fn test_policy_resolution() {
        assert_eq!(
            YearPolicy::Fixed(2021).resolve("01/01/2030"),
            Some(StatementYear::Fixed(2021))
        );
        assert_eq!(
            YearPolicy::Infer.resolve("01/01/2030"),
            Some(StatementYear::Period {
                start: ymd(2030, 1, 1),
                end: ymd(2030, 1, 1)
            })
        );
        assert_eq!(YearPolicy::Infer.resolve("no dates"), None);
        assert_eq!(YearPolicy::from(None), YearPolicy::Infer);
        assert_eq!(YearPolicy::from(Some(2023)), YearPolicy::Fixed(2023));
    }
}
