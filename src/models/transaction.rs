use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{de, Deserialize, Deserializer};

use crate::models::errors::ValidationError;
use crate::models::Side;
use crate::types::{Monetary, Quantity};

//NOTE: Short dates are month first, as broker exports write them
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y"];
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A validated buy or sell of a single security.
///
/// Records are immutable once built. Matching tracks how much of a BUY is
/// still open on the side, so the same record can back any number of lots.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub side: Side,
    /// Case-sensitive security identifier, e.g. `RELIANCE`.
    pub security: String,
    pub quantity: Quantity,
    pub unit_price: Monetary,
    /// Brokerage paid on the whole transaction.
    pub fee: Monetary,
    /// Dividend income reported on this row, regardless of side.
    pub dividend: Monetary
}

impl Transaction {
    pub fn new(date: NaiveDate, side: Side, security: impl Into<String>, quantity: Quantity, unit_price: Monetary, fee: Monetary) -> Self {
        Self {
            date,
            side,
            security: security.into(),
            quantity,
            unit_price,
            fee,
            dividend: Monetary::ZERO
        }
    }

    pub fn with_dividend(mut self, dividend: Monetary) -> Self {
        self.dividend = dividend;
        self
    }

    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.side == Side::Sell
    }
}

/// Represents a single row from the input CSV file before validation.
///
/// Column names follow the portfolio export layout (`Date,Type,Stock,Qty,Price,Brokerage`
/// plus an optional `Dividend`). Lowercase headers are accepted as well.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRow {
    #[serde(rename = "Date", alias = "date")]
    pub date: String,
    #[serde(rename = "Type", alias = "type")]
    pub side: String,
    #[serde(rename = "Stock", alias = "stock")]
    pub security: String,
    #[serde(rename = "Qty", alias = "qty", deserialize_with = "deserialize_quantity")]
    pub quantity: Decimal,
    #[serde(rename = "Price", alias = "price")]
    pub unit_price: Monetary,
    #[serde(rename = "Brokerage", alias = "brokerage")]
    pub fee: Monetary,
    #[serde(rename = "Dividend", alias = "dividend", default)]
    pub dividend: Option<Monetary>
}

impl TransactionRow {
    /// Checks every field and builds the immutable record.
    ///
    /// # Errors
    /// Returns `ValidationError` naming `row` if:
    /// - The date matches none of the accepted formats.
    /// - The side is not BUY or SELL.
    /// - The security is blank.
    /// - Quantity is not a positive whole number (`10.0` is accepted, `10.5` is not).
    /// - Price is not positive.
    /// - Brokerage or dividend is negative.
    pub fn validate(self, row: usize) -> Result<Transaction, ValidationError> {
        let date = parse_date(&self.date)
            .ok_or_else(|| ValidationError::InvalidDate { row, value: self.date.clone() })?;

        let side = self.side.parse::<Side>()
            .map_err(|reason| ValidationError::InvalidSide { row, reason })?;

        let security = self.security.trim();

        if security.is_empty() {
            return Err(ValidationError::MissingSecurity { row })
        }

        let quantity = Some(self.quantity)
            .filter(|quantity| quantity.fract().is_zero())
            .and_then(|quantity| quantity.to_u64())
            .filter(|quantity| *quantity > 0)
            .ok_or(ValidationError::InvalidQuantity { row, quantity: self.quantity })?;

        if !self.unit_price.is_positive() {
            return Err(ValidationError::NonPositivePrice { row, price: self.unit_price })
        }

        if self.fee.is_negative() {
            return Err(ValidationError::NegativeFee { row, fee: self.fee })
        }

        let dividend = self.dividend.unwrap_or_default();

        if dividend.is_negative() {
            return Err(ValidationError::NegativeDividend { row, dividend })
        }

        Ok(Transaction::new(date, side, security, quantity, self.unit_price, self.fee).with_dividend(dividend))
    }
}

//NOTE: Spreadsheet exports write whole quantities as `10.0`, so the cell is read as a decimal
fn deserialize_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let value = String::deserialize(deserializer)?;

    Decimal::from_str(value.trim()).map_err(de::Error::custom)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    DATE_FORMATS.iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_TIME_FORMATS.iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|date_time| date_time.date())
        })
}
