//! Turns extracted statement text into raw transaction line candidates.
//!
//! This is the only place that knows how a statement layout spreads a
//! transaction over the text. Field extraction works on the candidates.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLayout {
    /// Date, description and amount on one line.
    SingleLine,
    /// The amount may be pushed onto the line after the date line.
    WrappedAmount,
}

/// A span of statement text that looks like one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCandidate {
    /// 1-based line number where the candidate starts.
    pub line_no: usize,
    pub text: String,
}

fn single_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{2}/\d{2}.*\d+\.\d{2}").expect("single line regex"))
}

fn dated_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,2}/\d{1,2}.*").expect("dated line regex"))
}

fn trailing_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\d,]+\.\d{2}\s*$").expect("trailing amount regex"))
}

fn leading_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\d{1,2}/\d{1,2}").expect("leading date regex"))
}

#[derive(Debug, Clone, Copy)]
pub struct LineScanner {
    layout: LineLayout,
}

impl LineScanner {
    pub fn new(layout: LineLayout) -> Self {
        Self { layout }
    }

    pub fn scan(&self, text: &str) -> Vec<LineCandidate> {
        match self.layout {
            LineLayout::SingleLine => scan_single_line(text),
            LineLayout::WrappedAmount => scan_wrapped_amount(text),
        }
    }
}

fn scan_single_line(text: &str) -> Vec<LineCandidate> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        for m in single_line_re().find_iter(line) {
            out.push(LineCandidate {
                line_no: i + 1,
                text: m.as_str().to_string(),
            });
        }
    }
    out
}

fn scan_wrapped_amount(text: &str) -> Vec<LineCandidate> {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(m) = dated_line_re().find(lines[i]) else {
            i += 1;
            continue;
        };

        let mut candidate = m.as_str().to_string();
        let line_no = i + 1;
        i += 1;

        if !trailing_amount_re().is_match(&candidate) {
            if let Some(next) = lines.get(i) {
                if !leading_date_re().is_match(next) && trailing_amount_re().is_match(next) {
                    candidate.push('\n');
                    candidate.push_str(next.trim_end());
                    i += 1;
                }
            }
        }

        out.push(LineCandidate {
            line_no,
            text: candidate,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(c: &[LineCandidate]) -> Vec<&str> {
        c.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_single_line_never_crosses_newline() {
        let text = "Header 1.00\n03/14 STORE A 45.67\n03/15 STORE B 1,200.00\nfooter";
        let c = LineScanner::new(LineLayout::SingleLine).scan(text);
        assert_eq!(texts(&c), vec!["03/14 STORE A 45.67", "03/15 STORE B 1,200.00"]);
        assert_eq!(c[0].line_no, 2);
    }

    #[test]
    fn test_single_line_requires_amount() {
        let c = LineScanner::new(LineLayout::SingleLine).scan("03/14 STORE WITHOUT AMOUNT\n");
        assert!(c.is_empty());
    }

    #[test]
    fn test_wrapped_amount_joins_next_line() {
        let text = "3/2 ONLINE TRANSFER TO SAVINGS REF #123\n    250.00\n3/3 PAYROLL 1,000.00\n";
        let c = LineScanner::new(LineLayout::WrappedAmount).scan(text);
        assert_eq!(
            texts(&c),
            vec![
                "3/2 ONLINE TRANSFER TO SAVINGS REF #123\n    250.00",
                "3/3 PAYROLL 1,000.00"
            ]
        );
        assert_eq!(c[1].line_no, 3);
    }

    #[test]
    fn test_wrapped_amount_does_not_swallow_next_transaction() {
        let text = "3/2 NO AMOUNT HERE\n3/3 PAYROLL 1,000.00\n";
        let c = LineScanner::new(LineLayout::WrappedAmount).scan(text);
        assert_eq!(texts(&c), vec!["3/2 NO AMOUNT HERE", "3/3 PAYROLL 1,000.00"]);
    }
}
