mod errors;
mod matched_lot;
mod security_summary;
mod summary;
mod transaction;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::HoldingDays;

pub use errors::ValidationError;
pub use matched_lot::MatchedLot;
pub use security_summary::SecuritySummary;
pub use summary::Summary;
pub use transaction::{Transaction, TransactionRow};

/// Lots held for more than this many days are long-term.
pub const LONG_TERM_AFTER_DAYS: HoldingDays = 365;
/// GST charged on brokerage, 18%.
pub const BROKERAGE_TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Side {
    Buy,
    Sell
}

impl FromStr for Side {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.eq_ignore_ascii_case("buy") {
            Ok(Side::Buy)
        } else if value.eq_ignore_ascii_case("sell") {
            Ok(Side::Sell)
        } else {
            Err(format!("'{value}' is not a valid side, expected BUY or SELL"))
        }
    }
}

impl Display for Side {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => formatter.write_str("BUY"),
            Side::Sell => formatter.write_str("SELL")
        }
    }
}

/// Short-term or long-term capital gain.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum GainTerm {
    #[serde(rename = "STCG")]
    ShortTerm,
    #[serde(rename = "LTCG")]
    LongTerm
}

impl GainTerm {
    /// Strictly more than `rules.long_term_after_days` is long-term, so the
    /// threshold day itself is still short-term.
    pub fn classify(holding_days: HoldingDays, rules: &TaxRules) -> Self {
        if holding_days > rules.long_term_after_days {
            GainTerm::LongTerm
        } else {
            GainTerm::ShortTerm
        }
    }
}

impl Display for GainTerm {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GainTerm::ShortTerm => formatter.write_str("STCG"),
            GainTerm::LongTerm => formatter.write_str("LTCG")
        }
    }
}

/// Parameters of the gain classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRules {
    pub long_term_after_days: HoldingDays,
    pub brokerage_tax_rate: Decimal
}

impl Default for TaxRules {
    fn default() -> Self {
        Self {
            long_term_after_days: LONG_TERM_AFTER_DAYS,
            brokerage_tax_rate: BROKERAGE_TAX_RATE
        }
    }
}
