use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, info};

use crate::engine::{LoadError, TransactionReader};
use crate::matcher::{FifoMatcher, MatchWarning, OpenPosition};
use crate::models::{MatchedLot, SecuritySummary, Summary, TaxRules, Transaction};

/// Everything computed for one portfolio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GainsReport {
    /// The validated input, in file order.
    pub transactions: Vec<Transaction>,
    pub lots: Vec<MatchedLot>,
    pub open_positions: Vec<OpenPosition>,
    pub warnings: Vec<MatchWarning>,
    pub summary: Summary,
    /// Per-security breakdown of the matched lots.
    pub securities: Vec<SecuritySummary>
}

/// Loads a portfolio CSV and turns it into realized gains.
///
/// Holds no per-run state, so concurrent runs over independent files are safe.
pub struct GainsEngine {
    matcher: FifoMatcher,
    backpressure: usize
}

impl Default for GainsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GainsEngine {
    /// Creates an engine using the default tax rules.
    pub fn new() -> Self {
        Self {
            matcher: FifoMatcher::new(),
            backpressure: 256
        }
    }

    pub fn with_rules(mut self, rules: TaxRules) -> Self {
        self.matcher = FifoMatcher::with_rules(rules);
        self
    }

    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    /// Orchestrates the end-to-end pipeline for a CSV file.
    ///
    /// # Errors
    /// Returns the first `LoadError` met while reading. Nothing is matched in
    /// that case.
    pub async fn run(&self, path: &str) -> Result<GainsReport, LoadError> {
        let (sender, receiver) = mpsc::channel::<Result<Transaction, LoadError>>(self.backpressure);
        let csv_handle = self.spawn_csv_reader(path.to_string(), sender);
        let loaded = Self::receive_transactions(receiver).await;

        //NOTE: On a load error the receiver is already dropped, so the reader stops at its next send
        csv_handle.await?;

        let transactions = loaded?;
        info!("Loaded [{}] transactions from [{path}]", transactions.len());

        Ok(self.compute(transactions))
    }

    /// Matches and summarises already validated transactions.
    pub fn compute(&self, transactions: Vec<Transaction>) -> GainsReport {
        let outcome = self.matcher.match_lots(&transactions);
        let summary = Summary::aggregate(&outcome.lots, &transactions);
        let securities = SecuritySummary::by_security(&outcome.lots);

        info!(
            "Matched [{}] lots, [{}] open positions, [{}] warnings",
            outcome.lots.len(),
            outcome.open_positions.len(),
            outcome.warnings.len()
        );

        GainsReport {
            transactions,
            lots: outcome.lots,
            open_positions: outcome.open_positions,
            warnings: outcome.warnings,
            summary,
            securities
        }
    }

    fn spawn_csv_reader(&self, path: String, sender: mpsc::Sender<Result<Transaction, LoadError>>) -> JoinHandle<()> {
        spawn_blocking(move || {
            let reader = match TransactionReader::from_path(&path) {
                Ok(reader) => reader,
                Err(error) => {
                    let _ = sender.blocking_send(Err(error));
                    return;
                }
            };

            for result in reader {
                let failed = result.is_err();

                if sender.blocking_send(result).is_err() || failed {
                    break;
                }
            }
        })
    }

    async fn receive_transactions(mut receiver: mpsc::Receiver<Result<Transaction, LoadError>>) -> Result<Vec<Transaction>, LoadError> {
        let mut transactions = Vec::new();

        while let Some(result) = receiver.recv().await {
            match result {
                Ok(transaction) => transactions.push(transaction),
                Err(error) => {
                    error!("Portfolio load failed: {error}");
                    return Err(error);
                }
            }
        }

        Ok(transactions)
    }
}
