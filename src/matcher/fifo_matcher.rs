use std::collections::HashMap;

use tracing::{debug, warn};

use crate::matcher::{MatchWarning, OpenPosition};
use crate::models::{MatchedLot, Side, TaxRules, Transaction};
use crate::types::Quantity;

/// Everything a matching pass produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    /// Lots in creation order.
    pub lots: Vec<MatchedLot>,
    pub open_positions: Vec<OpenPosition>,
    pub warnings: Vec<MatchWarning>
}

impl MatchOutcome {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// An open BUY in a security's queue. `record` indexes the input slice.
#[derive(Debug)]
struct OpenLot {
    record: usize,
    remaining: Quantity
}

/// First-in-first-out lot matcher.
///
/// Stateless between calls: every call builds its own queues, so one matcher can
/// serve any number of independent portfolios.
#[derive(Debug, Clone, Default)]
pub struct FifoMatcher {
    rules: TaxRules
}

impl FifoMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: TaxRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TaxRules {
        &self.rules
    }

    /// Matches every SELL against the earliest open BUYs of the same security.
    ///
    /// Securities are processed in the order they first appear. Within a
    /// security, records are ordered by date with input order breaking ties.
    pub fn match_lots(&self, transactions: &[Transaction]) -> MatchOutcome {
        let mut outcome = MatchOutcome::default();

        for mut records in partition_by_security(transactions) {
            records.sort_by_key(|index| transactions[*index].date);
            self.match_security(transactions, &records, &mut outcome);
        }

        outcome
    }

    fn match_security(&self, transactions: &[Transaction], records: &[usize], outcome: &mut MatchOutcome) {
        let mut queue: Vec<OpenLot> = Vec::new();
        let mut head = 0;

        for &index in records {
            let transaction = &transactions[index];

            match transaction.side {
                Side::Buy => queue.push(OpenLot { record: index, remaining: transaction.quantity }),
                Side::Sell => {
                    let mut need = transaction.quantity;

                    while need > 0 && head < queue.len() {
                        let open = &mut queue[head];

                        if open.remaining == 0 {
                            head += 1;
                            continue;
                        }

                        let matched = open.remaining.min(need);
                        let buy = &transactions[open.record];

                        debug!("Matched [{matched}] of [{}] bought [{}] against sale on [{}]", buy.security, buy.date, transaction.date);
                        outcome.lots.push(MatchedLot::from_match(buy, transaction, matched, &self.rules));

                        open.remaining -= matched;
                        need -= matched;

                        if open.remaining == 0 {
                            head += 1;
                        }
                    }

                    if need > 0 {
                        let warning = MatchWarning::UnderMatchedSell {
                            security: transaction.security.clone(),
                            sell_date: transaction.date,
                            sell_quantity: transaction.quantity,
                            unmatched_quantity: need
                        };

                        warn!("{warning}");
                        outcome.warnings.push(warning);
                    }
                }
            }
        }

        let still_open = queue[head..].iter()
            .filter(|open| open.remaining > 0)
            .map(|open| OpenPosition::new(&transactions[open.record], open.remaining));

        outcome.open_positions.extend(still_open);
    }
}

/// Groups record indices by security, keeping input order inside each group
/// and ordering groups by first sighting.
fn partition_by_security(transactions: &[Transaction]) -> Vec<Vec<usize>> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (index, transaction) in transactions.iter().enumerate() {
        let position = *positions.entry(transaction.security.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });

        groups[position].push(index);
    }

    groups
}
