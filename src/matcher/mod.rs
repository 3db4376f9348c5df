mod fifo_matcher;

use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

use crate::models::Transaction;
use crate::types::{Monetary, Quantity};

pub use fifo_matcher::{FifoMatcher, MatchOutcome};

/// The unconsumed part of a BUY once every SELL has been matched.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPosition {
    pub security: String,
    pub buy_date: NaiveDate,
    pub unit_price: Monetary,
    /// Quantity of the original BUY.
    pub quantity: Quantity,
    pub remaining: Quantity
}

impl OpenPosition {
    fn new(buy: &Transaction, remaining: Quantity) -> Self {
        Self {
            security: buy.security.clone(),
            buy_date: buy.date,
            unit_price: buy.unit_price,
            quantity: buy.quantity,
            remaining
        }
    }
}

/// Data-quality conditions found while matching. None of them stop a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchWarning {
    /// A SELL found fewer open units than it disposed of. The excess is left out
    /// of every gain total, which understates the realized gain.
    UnderMatchedSell {
        security: String,
        sell_date: NaiveDate,
        sell_quantity: Quantity,
        unmatched_quantity: Quantity
    }
}

impl Display for MatchWarning {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MatchWarning::UnderMatchedSell { security, sell_date, sell_quantity, unmatched_quantity } => write!(
                formatter,
                "Insufficient buy quantity for [{security}]: sell of [{sell_quantity}] on [{sell_date}] left [{unmatched_quantity}] unmatched"
            )
        }
    }
}
