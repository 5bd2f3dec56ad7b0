//! Normalized transaction records.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::account::AccountIdentity;

/// Date layout used everywhere a record's date is rendered.
pub const LEDGER_DATE_FORMAT: &str = "%m/%d/%Y";

/// One transaction, in ledger sign convention: money leaving the account is negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    date: NaiveDate,
    description: String,
    amount: Decimal,
    account: AccountIdentity,
}

impl TransactionRecord {
    /// `amount` must already be in ledger sign convention. A negated zero is
    /// stored as plain zero so it renders as `0.00`.
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        account: AccountIdentity,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount: if amount.is_zero() { Decimal::ZERO } else { amount },
            account,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn account(&self) -> AccountIdentity {
        self.account
    }

    /// `MM/DD/YYYY`
    pub fn formatted_date(&self) -> String {
        self.date.format(LEDGER_DATE_FORMAT).to_string()
    }

    /// Two decimal places, e.g. `-12.50`.
    pub fn formatted_amount(&self) -> String {
        format!("{:.2}", self.amount)
    }
}
