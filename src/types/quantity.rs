use crate::types::errors::QuantityError;
use crate::types::MAX_ASSET_DECIMALS;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// An exact, non-negative token quantity.
///
/// On-chain amounts are integers in the asset's base unit. `Quantity` carries the
/// scaled value with the asset's precision as its scale, so `Display` always renders
/// every fractional digit the asset declares (`1.000000` for one ALGO).
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Quantity(Decimal);

impl Quantity {
    pub fn zero() -> Self {
        Quantity(Decimal::ZERO)
    }

    pub fn one() -> Self {
        Quantity(Decimal::ONE)
    }

    /// `mantissa * 10^-scale`, for constants such as `from_scaled(25, 4)` = 0.0025.
    pub fn from_scaled(mantissa: u32, scale: u32) -> Self {
        Quantity(Decimal::new(i64::from(mantissa), scale.min(MAX_ASSET_DECIMALS)))
    }

    /// Scales an integer base-unit amount by the asset's decimal precision.
    pub fn from_base_units(units: u64, decimals: u32) -> Result<Self, QuantityError> {
        if decimals > MAX_ASSET_DECIMALS {
            return Err(QuantityError::InvalidDecimals { decimals, max: MAX_ASSET_DECIMALS });
        }

        Decimal::try_from_i128_with_scale(i128::from(units), decimals)
            .map(Quantity)
            .map_err(|_| QuantityError::Overflow)
    }

    /// Converts back to integer base units, failing if the value carries more
    /// fractional digits than the asset supports.
    pub fn to_base_units(&self, decimals: u32) -> Result<u64, QuantityError> {
        if decimals > MAX_ASSET_DECIMALS {
            return Err(QuantityError::InvalidDecimals { decimals, max: MAX_ASSET_DECIMALS });
        }

        let scaled = self.0.checked_mul(Decimal::from(10u64.pow(decimals)))
            .ok_or(QuantityError::Overflow)?;

        if !scaled.fract().is_zero() {
            return Err(QuantityError::Precision { value: self.to_string(), decimals });
        }

        scaled.to_u64().ok_or(QuantityError::Overflow)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Quantity) -> Option<Quantity> {
        self.0.checked_add(rhs.0).map(Quantity)
    }

    pub fn checked_sub(self, rhs: Quantity) -> Option<Quantity> {
        self.0.checked_sub(rhs.0)
            .filter(|value| !value.is_sign_negative())
            .map(Quantity)
    }

    pub fn checked_mul(self, rhs: Quantity) -> Option<Quantity> {
        self.0.checked_mul(rhs.0).map(Quantity)
    }

    pub fn checked_div(self, rhs: Quantity) -> Option<Quantity> {
        self.0.checked_div(rhs.0).map(Quantity)
    }

    /// Truncates towards zero at `decimals` fractional digits.
    pub fn floor(self, decimals: u32) -> Quantity {
        Quantity(self.0.round_dp_with_strategy(decimals, RoundingStrategy::ToNegativeInfinity))
    }
}

impl Display for Quantity {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(QuantityError::InvalidFormat("Value is an empty string".to_string()));
        }

        let decimal = Decimal::from_str(value).map_err(|error| {
            QuantityError::InvalidFormat(format!("Value '{value}' is not a decimal: {error}"))
        })?;

        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(QuantityError::Negative);
        }

        Ok(Quantity(decimal))
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Quantity::from_str(&value).map_err(de::Error::custom)
    }
}
