//! Physical dimensions for unit validation.
//!
//! A [`Dimension`] is a vector of integer exponents over the base quantities
//! the thermal model needs:
//!
//! - Mass (M)
//! - Length (L)
//! - Time (T)
//! - Temperature (Θ)
//! - Plane angle (A)
//!
//! Plane angle is dimensionless in SI. It is tracked as its own base here so
//! that a longitude can never be added to a bare ratio by accident; radians
//! convert to dimensionless numbers only through [`Dimension::is_angular`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul};

/// Represents the physical dimension of a quantity.
///
/// For example:
/// - A luminosity proxy $R_\star^2 T_{\rm eff}^4$ has dimensions L²·Θ⁴
/// - A radiative flux (W/m²) has dimensions M·T⁻³
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Dimension {
    /// Mass exponent (M)
    pub mass: i8,
    /// Length exponent (L)
    pub length: i8,
    /// Time exponent (T)
    pub time: i8,
    /// Temperature exponent (Θ)
    pub temperature: i8,
    /// Plane angle exponent (A)
    pub angle: i8,
}

impl Dimension {
    /// Creates a dimension with all exponents set to zero.
    #[must_use]
    pub const fn dimensionless() -> Self {
        Self::new(0, 0, 0, 0, 0)
    }

    #[must_use]
    pub const fn new(mass: i8, length: i8, time: i8, temperature: i8, angle: i8) -> Self {
        Self {
            mass,
            length,
            time,
            temperature,
            angle,
        }
    }

    pub const MASS: Self = Self::new(1, 0, 0, 0, 0);
    pub const LENGTH: Self = Self::new(0, 1, 0, 0, 0);
    pub const TIME: Self = Self::new(0, 0, 1, 0, 0);
    pub const TEMPERATURE: Self = Self::new(0, 0, 0, 1, 0);
    pub const ANGLE: Self = Self::new(0, 0, 0, 0, 1);

    /// Power (M·L²·T⁻³).
    pub const POWER: Self = Self::new(1, 2, -3, 0, 0);

    /// Fourth power of temperature (Θ⁴), the natural unit of the equilibrium field.
    pub const TEMPERATURE4: Self = Self::new(0, 0, 0, 4, 0);

    /// Stellar luminosity proxy $R^2 T^4$ (L²·Θ⁴).
    pub const LUMINOSITY_PROXY: Self = Self::new(0, 2, 0, 4, 0);

    #[must_use]
    pub const fn is_dimensionless(&self) -> bool {
        self.mass == 0
            && self.length == 0
            && self.time == 0
            && self.temperature == 0
            && self.angle == 0
    }

    /// True for plane angles and for bare numbers, which are read as radians.
    #[must_use]
    pub const fn is_angular(&self) -> bool {
        self.mass == 0
            && self.length == 0
            && self.time == 0
            && self.temperature == 0
            && (self.angle == 0 || self.angle == 1)
    }

    /// Two dimensions are compatible if they are identical.
    #[must_use]
    pub const fn is_compatible(&self, other: &Self) -> bool {
        self.mass == other.mass
            && self.length == other.length
            && self.time == other.time
            && self.temperature == other.temperature
            && self.angle == other.angle
    }

    /// Raises this dimension to an integer power.
    #[must_use]
    pub const fn pow(&self, exp: i8) -> Self {
        Self::new(
            self.mass * exp,
            self.length * exp,
            self.time * exp,
            self.temperature * exp,
            self.angle * exp,
        )
    }
}

impl Mul for Dimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(
            self.mass + rhs.mass,
            self.length + rhs.length,
            self.time + rhs.time,
            self.temperature + rhs.temperature,
            self.angle + rhs.angle,
        )
    }
}

impl Div for Dimension {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.pow(-1)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "dimensionless");
        }

        let symbols = [
            (self.mass, "M"),
            (self.length, "L"),
            (self.time, "T"),
            (self.temperature, "Θ"),
            (self.angle, "A"),
        ];

        let parts: Vec<String> = symbols
            .iter()
            .filter(|(exp, _)| *exp != 0)
            .map(|(exp, sym)| match *exp {
                1 => sym.to_string(),
                _ => format!("{sym}^{exp}"),
            })
            .collect();

        write!(f, "{}", parts.join(" "))
    }
}
