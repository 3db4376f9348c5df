use chrono::NaiveDate;

use crate::models::{GainTerm, TaxRules, Transaction};
use crate::types::{HoldingDays, Monetary, Quantity};

/// A quantity of one BUY disposed of by one SELL, with its realized gain.
///
/// Built once during matching and never modified. All amounts carry full
/// precision; they are rounded only when displayed or exported.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedLot {
    pub security: String,
    pub quantity: Quantity,
    pub buy_date: NaiveDate,
    pub sell_date: NaiveDate,
    pub buy_price: Monetary,
    pub sell_price: Monetary,
    /// Buy brokerage prorated over the BUY's original quantity.
    pub buy_fee: Monetary,
    /// Sell brokerage prorated over the SELL's original quantity.
    pub sell_fee: Monetary,
    pub buy_value: Monetary,
    pub sell_value: Monetary,
    pub gain: Monetary,
    pub holding_days: HoldingDays,
    pub term: GainTerm,
    pub brokerage_tax: Monetary
}

impl MatchedLot {
    /// Classifies `quantity` units of `buy` disposed of by `sell`.
    ///
    /// Pure: the same inputs always give the same lot. Fees are allocated with the
    /// original transaction quantity as denominator, never the quantity still open
    /// at match time, so the allocations of a fully consumed record add up to its fee.
    pub fn from_match(buy: &Transaction, sell: &Transaction, quantity: Quantity, rules: &TaxRules) -> Self {
        let buy_fee = buy.fee.prorate(quantity, buy.quantity);
        let sell_fee = sell.fee.prorate(quantity, sell.quantity);
        let total_fee = buy_fee + sell_fee;

        let buy_value = buy.unit_price.times(quantity);
        let sell_value = sell.unit_price.times(quantity);
        let holding_days = (sell.date - buy.date).num_days();

        Self {
            security: sell.security.clone(),
            quantity,
            buy_date: buy.date,
            sell_date: sell.date,
            buy_price: buy.unit_price,
            sell_price: sell.unit_price,
            buy_fee,
            sell_fee,
            buy_value,
            sell_value,
            gain: sell_value - buy_value - total_fee,
            holding_days,
            term: GainTerm::classify(holding_days, rules),
            brokerage_tax: total_fee.scale(rules.brokerage_tax_rate)
        }
    }

    pub fn total_fee(&self) -> Monetary {
        self.buy_fee + self.sell_fee
    }

    pub fn is_long_term(&self) -> bool {
        self.term == GainTerm::LongTerm
    }
}
