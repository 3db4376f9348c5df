//! Realized capital gains from a list of equity trades.
//!
//! Sells are matched first-in-first-out against earlier buys of the same
//! security. Each match becomes a [`MatchedLot`] carrying its prorated
//! brokerage, gain, holding period and STCG/LTCG classification, and the lots
//! are reduced into a [`Summary`] and a per-security [`SecuritySummary`].
//!
//! - `types` - `Monetary` and the numeric aliases
//! - `models` - transactions, matched lots, the summary and tax rules
//! - `matcher` - the FIFO matcher and its warnings
//! - `engine` - CSV loading and the end-to-end pipeline
//! - `report` - CSV rendering of a `GainsReport`

pub mod engine;
pub mod matcher;
pub mod models;
pub mod report;
pub mod types;

pub use engine::{GainsEngine, GainsReport, LoadError};
pub use matcher::{FifoMatcher, MatchOutcome, MatchWarning, OpenPosition};
pub use models::{GainTerm, MatchedLot, SecuritySummary, Side, Summary, TaxRules, Transaction};
pub use types::Monetary;
