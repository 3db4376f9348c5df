use std::collections::BTreeMap;

use crate::models::MatchedLot;
use crate::types::{Monetary, Quantity};

/// Matched lots of one security rolled up into a single line.
#[derive(Debug, Clone, PartialEq)]
pub struct SecuritySummary {
    pub security: String,
    /// Plain mean over the lots, not weighted by quantity.
    pub average_buy_price: Monetary,
    pub average_sell_price: Monetary,
    pub quantity: Quantity,
    pub gain: Monetary,
    /// Brokerage allocated to the lots, both legs.
    pub brokerage: Monetary,
    pub brokerage_tax: Monetary
}

#[derive(Default)]
struct Totals {
    lots: usize,
    buy_prices: Monetary,
    sell_prices: Monetary,
    quantity: Quantity,
    gain: Monetary,
    brokerage: Monetary,
    brokerage_tax: Monetary
}

impl SecuritySummary {
    /// One line per security that has at least one matched lot, ordered by
    /// security identifier.
    pub fn by_security(lots: &[MatchedLot]) -> Vec<SecuritySummary> {
        let mut totals: BTreeMap<&str, Totals> = BTreeMap::new();

        for lot in lots {
            let entry = totals.entry(lot.security.as_str()).or_default();

            entry.lots += 1;
            entry.buy_prices += lot.buy_price;
            entry.sell_prices += lot.sell_price;
            entry.quantity = entry.quantity.saturating_add(lot.quantity);
            entry.gain += lot.gain;
            entry.brokerage += lot.total_fee();
            entry.brokerage_tax += lot.brokerage_tax;
        }

        totals.into_iter()
            .map(|(security, totals)| SecuritySummary {
                security: security.to_string(),
                average_buy_price: mean(totals.buy_prices, totals.lots),
                average_sell_price: mean(totals.sell_prices, totals.lots),
                quantity: totals.quantity,
                gain: totals.gain,
                brokerage: totals.brokerage,
                brokerage_tax: totals.brokerage_tax
            })
            .collect()
    }

    /// Brokerage plus the GST charged on it.
    pub fn total_cost(&self) -> Monetary {
        self.brokerage + self.brokerage_tax
    }
}

fn mean(total: Monetary, count: usize) -> Monetary {
    total.prorate(1, count as Quantity)
}
