use serde::Serialize;

use crate::matcher::OpenPosition;
use crate::models::{GainTerm, MatchedLot, SecuritySummary, Summary};
use crate::types::{HoldingDays, Monetary, Quantity};

/// One exported line of the lot table. Field order is column order.
#[derive(Debug, Serialize)]
pub(super) struct LotRow<'a> {
    buy_date: String,
    sell_date: String,
    security: &'a str,
    quantity: Quantity,
    buy_price: Monetary,
    sell_price: Monetary,
    buy_value: Monetary,
    sell_value: Monetary,
    brokerage: Monetary,
    gain: Monetary,
    term: GainTerm,
    brokerage_tax: Monetary,
    holding_days: HoldingDays
}

impl<'a> From<&'a MatchedLot> for LotRow<'a> {
    fn from(lot: &'a MatchedLot) -> Self {
        Self {
            buy_date: lot.buy_date.to_string(),
            sell_date: lot.sell_date.to_string(),
            security: &lot.security,
            quantity: lot.quantity,
            buy_price: lot.buy_price,
            sell_price: lot.sell_price,
            buy_value: lot.buy_value,
            sell_value: lot.sell_value,
            brokerage: lot.total_fee(),
            gain: lot.gain,
            term: lot.term,
            brokerage_tax: lot.brokerage_tax,
            holding_days: lot.holding_days
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SecurityRow<'a> {
    security: &'a str,
    average_buy_price: Monetary,
    average_sell_price: Monetary,
    quantity: Quantity,
    gain: Monetary,
    brokerage: Monetary,
    brokerage_tax: Monetary,
    total_cost: Monetary
}

impl<'a> From<&'a SecuritySummary> for SecurityRow<'a> {
    fn from(summary: &'a SecuritySummary) -> Self {
        Self {
            security: &summary.security,
            average_buy_price: summary.average_buy_price,
            average_sell_price: summary.average_sell_price,
            quantity: summary.quantity,
            gain: summary.gain,
            brokerage: summary.brokerage,
            brokerage_tax: summary.brokerage_tax,
            total_cost: summary.total_cost()
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct OpenPositionRow<'a> {
    security: &'a str,
    buy_date: String,
    buy_price: Monetary,
    quantity: Quantity,
    remaining: Quantity
}

impl<'a> From<&'a OpenPosition> for OpenPositionRow<'a> {
    fn from(position: &'a OpenPosition) -> Self {
        Self {
            security: &position.security,
            buy_date: position.buy_date.to_string(),
            buy_price: position.unit_price,
            quantity: position.quantity,
            remaining: position.remaining
        }
    }
}

/// Label and rendered value for each summary line, in report order.
pub(super) fn summary_rows(summary: &Summary) -> Vec<(&'static str, String)> {
    vec![
        ("Total STCG", summary.total_short_term.to_string()),
        ("Total LTCG", summary.total_long_term.to_string()),
        ("Total Dividends", summary.total_dividends.to_string()),
        ("Total Brokerage", summary.total_fees.to_string()),
        ("Total GST on Brokerage", summary.total_brokerage_tax.to_string()),
        ("Final Taxable Income", summary.final_taxable_income.to_string()),
        ("Total Trades Matched", summary.matched_lots.to_string()),
        ("Total Buy Trades", summary.buy_transactions.to_string()),
        ("Total Sell Trades", summary.sell_transactions.to_string()),
    ]
}
