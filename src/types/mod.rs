mod errors;
mod monetary;

pub use errors::MonetaryError;
pub use monetary::{Monetary, OUTPUT_DECIMAL_PLACES};

/// Whole units of a security. Fractional shares are not supported.
pub type Quantity = u64;
/// Calendar days between acquisition and disposal.
pub type HoldingDays = i64;
