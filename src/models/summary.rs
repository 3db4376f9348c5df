use crate::models::{GainTerm, MatchedLot, Transaction};
use crate::types::Monetary;

/// Tax totals for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_short_term: Monetary,
    pub total_long_term: Monetary,
    pub total_dividends: Monetary,
    /// Gross brokerage over every transaction, matched or not.
    pub total_fees: Monetary,
    /// GST over the fees allocated to matched lots.
    pub total_brokerage_tax: Monetary,
    pub final_taxable_income: Monetary,
    pub matched_lots: usize,
    pub buy_transactions: usize,
    pub sell_transactions: usize
}

impl Summary {
    /// Reduces the matched lots and the raw transactions into totals.
    ///
    /// Sums unrounded values. Dividends are collected from every transaction
    /// whatever its side.
    pub fn aggregate(lots: &[MatchedLot], transactions: &[Transaction]) -> Self {
        let mut summary = Summary {
            matched_lots: lots.len(),
            ..Summary::default()
        };

        for lot in lots {
            match lot.term {
                GainTerm::ShortTerm => summary.total_short_term += lot.gain,
                GainTerm::LongTerm => summary.total_long_term += lot.gain
            }

            summary.total_brokerage_tax += lot.brokerage_tax;
        }

        for transaction in transactions {
            summary.total_dividends += transaction.dividend;
            summary.total_fees += transaction.fee;

            if transaction.is_buy() {
                summary.buy_transactions += 1;
            } else {
                summary.sell_transactions += 1;
            }
        }

        summary.final_taxable_income = summary.total_short_term + summary.total_long_term + summary.total_dividends;
        summary
    }

    pub fn total_gain(&self) -> Monetary {
        self.total_short_term + self.total_long_term
    }
}
