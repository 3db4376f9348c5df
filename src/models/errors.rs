use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Monetary;

/// A transaction row that parsed but cannot be accepted.
///
/// `row` is the 1-based data row, not counting the header.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Row [{row}]: date [{value}] could not be parsed")]
    InvalidDate {
        row: usize,
        value: String
    },
    #[error("Row [{row}]: {reason}")]
    InvalidSide {
        row: usize,
        reason: String
    },
    #[error("Row [{row}]: security identifier is empty")]
    MissingSecurity {
        row: usize
    },
    #[error("Row [{row}]: quantity must be a positive whole number, found [{quantity}]")]
    InvalidQuantity {
        row: usize,
        quantity: Decimal
    },
    #[error("Row [{row}]: unit price must be positive, found [{price}]")]
    NonPositivePrice {
        row: usize,
        price: Monetary
    },
    #[error("Row [{row}]: brokerage must not be negative, found [{fee}]")]
    NegativeFee {
        row: usize,
        fee: Monetary
    },
    #[error("Row [{row}]: dividend must not be negative, found [{dividend}]")]
    NegativeDividend {
        row: usize,
        dividend: Monetary
    }
}

impl ValidationError {
    pub fn row(&self) -> usize {
        match self {
            Self::InvalidDate { row, .. }
            | Self::InvalidSide { row, .. }
            | Self::MissingSecurity { row }
            | Self::InvalidQuantity { row, .. }
            | Self::NonPositivePrice { row, .. }
            | Self::NegativeFee { row, .. }
            | Self::NegativeDividend { row, .. } => *row
        }
    }
}
