//! Dimensioned scalar quantities.
//!
//! A [`Quantity`] stores its magnitude in canonical SI units (kelvin for
//! temperature, radians for angle) next to its [`Dimension`]. Multiplication
//! and division always succeed and combine dimensions; addition and
//! subtraction are checked and fail with
//! [`ExothermError::DimensionMismatch`] instead of silently adding raw
//! magnitudes.
//!
//! ```
//! use exotherm_core::quantity::Quantity;
//!
//! let period = Quantity::parse("5 h").unwrap();
//! assert_eq!(period.si_value(), 18000.0);
//! assert_eq!(period.value_in("min").unwrap(), 300.0);
//!
//! let temperature = Quantity::parse("1000 K").unwrap();
//! assert!(period.checked_add(&temperature).is_err());
//! ```
//!
//! Quantities (de)serialise as strings such as `"10 h"`; serialisation writes
//! the SI form (`"36000 s"`).

use crate::errors::{ExothermError, ExothermResult};
use crate::units::{Dimension, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quantity {
    value: f64,
    dimension: Dimension,
}

impl Quantity {
    /// Creates a quantity from a magnitude expressed in `unit`.
    pub fn new(value: f64, unit: &str) -> ExothermResult<Self> {
        let unit = Unit::parse(unit)?;
        Ok(Self {
            value: value * unit.to_si_factor()?,
            dimension: unit.dimension()?,
        })
    }

    /// Creates a quantity from a magnitude already in SI base units.
    #[must_use]
    pub const fn from_si(value: f64, dimension: Dimension) -> Self {
        Self { value, dimension }
    }

    #[must_use]
    pub const fn kelvin(value: f64) -> Self {
        Self::from_si(value, Dimension::TEMPERATURE)
    }

    #[must_use]
    pub const fn seconds(value: f64) -> Self {
        Self::from_si(value, Dimension::TIME)
    }

    #[must_use]
    pub const fn metres(value: f64) -> Self {
        Self::from_si(value, Dimension::LENGTH)
    }

    #[must_use]
    pub const fn radians(value: f64) -> Self {
        Self::from_si(value, Dimension::ANGLE)
    }

    #[must_use]
    pub const fn dimensionless(value: f64) -> Self {
        Self::from_si(value, Dimension::dimensionless())
    }

    /// Parses `"<number> <unit>"`, or a bare number as a dimensionless value.
    pub fn parse(input: &str) -> ExothermResult<Self> {
        let input = input.trim();
        let (number, unit) = input
            .split_once(char::is_whitespace)
            .unwrap_or((input, "1"));
        let value = number.parse::<f64>().map_err(|_| {
            ExothermError::Config(format!("'{input}' does not start with a number"))
        })?;
        Self::new(value, unit)
    }

    /// Magnitude in SI base units.
    #[must_use]
    pub const fn si_value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Magnitude expressed in `unit`, which must share this quantity's dimension.
    pub fn value_in(&self, unit: &str) -> ExothermResult<f64> {
        let unit = Unit::parse(unit)?;
        let dimension = unit.dimension()?;
        if !dimension.is_compatible(&self.dimension) {
            return Err(ExothermError::dimension_mismatch(
                &format!("conversion to '{unit}'"),
                dimension,
                self.dimension,
            ));
        }
        Ok(self.value / unit.to_si_factor()?)
    }

    /// Returns the SI magnitude after checking the dimension.
    ///
    /// This is the boundary check used wherever a quantity enters the
    /// numerical core as a bare `f64`.
    pub fn require(&self, expected: Dimension, context: &str) -> ExothermResult<f64> {
        if self.dimension.is_compatible(&expected) {
            Ok(self.value)
        } else {
            Err(ExothermError::dimension_mismatch(
                context,
                expected,
                self.dimension,
            ))
        }
    }

    pub fn checked_add(&self, other: &Self) -> ExothermResult<Self> {
        let value = other.require(self.dimension, "addition")?;
        Ok(Self::from_si(self.value + value, self.dimension))
    }

    pub fn checked_sub(&self, other: &Self) -> ExothermResult<Self> {
        let value = other.require(self.dimension, "subtraction")?;
        Ok(Self::from_si(self.value - value, self.dimension))
    }

    #[must_use]
    pub fn powi(&self, exp: i8) -> Self {
        Self::from_si(self.value.powi(i32::from(exp)), self.dimension.pow(exp))
    }
}

impl Mul for Quantity {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_si(self.value * rhs.value, self.dimension * rhs.dimension)
    }
}

impl Div for Quantity {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self::from_si(self.value / rhs.value, self.dimension / rhs.dimension)
    }
}

impl Mul<f64> for Quantity {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::from_si(self.value * rhs, self.dimension)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dimension.is_dimensionless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, Unit::si(self.dimension).normalized())
        }
    }
}

impl FromStr for Quantity {
    type Err = ExothermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Quantity {
    type Error = ExothermError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Quantity> for String {
    fn from(value: Quantity) -> Self {
        value.to_string()
    }
}
