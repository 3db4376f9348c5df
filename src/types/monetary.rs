use crate::types::errors::MonetaryError;
use crate::types::Quantity;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use tracing::error;

/// Number of decimal places used whenever a value leaves the engine.
pub const OUTPUT_DECIMAL_PLACES: u32 = 2;

/// An exact decimal amount of money.
///
/// Arithmetic keeps full `Decimal` precision so that totals are summed from
/// unrounded per-lot values. Rounding to [`OUTPUT_DECIMAL_PLACES`] happens only
/// in `Display` and `Serialize`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Monetary(Decimal);

impl Monetary {
    pub const ZERO: Monetary = Monetary(Decimal::ZERO);

    pub fn new() -> Self {
        Self::ZERO
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        !self.is_negative() && !self.is_zero()
    }

    pub fn checked_add(self, rhs: Monetary) -> Option<Monetary> {
        self.0.checked_add(rhs.0).map(Monetary)
    }

    pub fn checked_sub(self, rhs: Monetary) -> Option<Monetary> {
        self.0.checked_sub(rhs.0).map(Monetary)
    }

    /// Value of `quantity` units at this unit price.
    pub fn times(self, quantity: Quantity) -> Monetary {
        match self.0.checked_mul(Decimal::from(quantity)) {
            Some(value) => Monetary(value),
            None => {
                error!("Monetary multiplication error: Overflow");
                Monetary(self.0.saturating_mul(Decimal::from(quantity)))
            }
        }
    }

    /// Share of this amount attributable to `part` out of `whole` units.
    ///
    /// Multiplies before dividing so that `whole` splits of the same amount sum
    /// back to it to within `Decimal` precision. A zero `whole` yields zero.
    /// If the product overflows, divides first and saturates at `Decimal::MAX`.
    pub fn prorate(self, part: Quantity, whole: Quantity) -> Monetary {
        if whole == 0 {
            return Monetary::ZERO;
        }

        let part = Decimal::from(part);
        let whole = Decimal::from(whole);

        self.0.checked_mul(part)
            .map(|value| value / whole)
            .map(Monetary)
            .unwrap_or_else(|| {
                error!("Monetary proration error: Overflow");
                Monetary((self.0 / whole).saturating_mul(part))
            })
    }

    /// Applies a rate such as `0.18`.
    pub fn scale(self, rate: Decimal) -> Monetary {
        match self.0.checked_mul(rate) {
            Some(value) => Monetary(value),
            None => {
                error!("Monetary scale error: Overflow");
                Monetary(self.0.saturating_mul(rate))
            }
        }
    }

    /// The value as it will be reported.
    pub fn rounded(self) -> Monetary {
        let mut value = self.0.round_dp_with_strategy(OUTPUT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

        if value.is_zero() {
            value.set_sign_positive(true);
        }

        value.rescale(OUTPUT_DECIMAL_PLACES);
        Monetary(value)
    }
}

impl From<Decimal> for Monetary {
    fn from(value: Decimal) -> Self {
        Monetary(value)
    }
}

impl Add<Monetary> for Monetary {
    type Output = Monetary;

    fn add(self, rhs: Monetary) -> Monetary {
        self.checked_add(rhs).unwrap_or_else(|| {
            error!("Monetary Add error: Overflow");
            Monetary(self.0.saturating_add(rhs.0))
        })
    }
}

impl Sub<Monetary> for Monetary {
    type Output = Monetary;

    fn sub(self, rhs: Monetary) -> Monetary {
        self.checked_sub(rhs).unwrap_or_else(|| {
            error!("Monetary Sub error: Overflow");
            Monetary(self.0.saturating_sub(rhs.0))
        })
    }
}

impl AddAssign<Monetary> for Monetary {
    fn add_assign(&mut self, rhs: Monetary) {
        *self = *self + rhs;
    }
}

impl SubAssign<Monetary> for Monetary {
    fn sub_assign(&mut self, rhs: Monetary) {
        *self = *self - rhs;
    }
}

impl Sum for Monetary {
    fn sum<I: Iterator<Item = Monetary>>(iter: I) -> Monetary {
        iter.fold(Monetary::ZERO, |total, value| total + value)
    }
}

impl<'a> Sum<&'a Monetary> for Monetary {
    fn sum<I: Iterator<Item = &'a Monetary>>(iter: I) -> Monetary {
        iter.copied().sum()
    }
}

impl Display for Monetary {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.rounded().0)
    }
}

impl FromStr for Monetary {
    type Err = MonetaryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(MonetaryError::InvalidFormat("Value is an empty string".to_string()));
        }

        let decimal = Decimal::from_str(value).map_err(|error| match error {
            rust_decimal::Error::ExceedsMaximumPossibleValue | rust_decimal::Error::LessThanMinimumPossibleValue => {
                MonetaryError::Overflow
            }
            error => MonetaryError::InvalidFormat(format!("Value [{value}] is not a decimal: {error}"))
        })?;

        Ok(Monetary(decimal))
    }
}

impl<'de> Deserialize<'de> for Monetary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Monetary::from_str(&value).map_err(de::Error::custom)
    }
}

impl Serialize for Monetary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
