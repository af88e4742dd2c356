//! Parsed units and conversions between them.
//!
//! ```
//! use exotherm_core::units::Unit;
//!
//! let hours = Unit::parse("h").unwrap();
//! let seconds = Unit::parse("s").unwrap();
//! assert_eq!(hours.factor_to(&seconds).unwrap(), 3600.0);
//!
//! let kelvin = Unit::parse("K").unwrap();
//! assert!(hours.factor_to(&kelvin).is_err());
//! ```

use super::dimension::Dimension;
use super::parser::{ParseError, ParsedUnit};
use crate::errors::{ExothermError, ExothermResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A unit string that has been parsed and checked against the registry.
///
/// Equality compares the normalized form, so `"W/m^2"` equals `"W m^-2"`,
/// while `h` and `s` only share a dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    symbol: String,
    parsed: ParsedUnit,
}

impl Unit {
    /// Parses `input`, failing immediately on unknown symbols.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let parsed = ParsedUnit::parse(input)?;
        parsed.dimension()?;
        Ok(Self {
            symbol: input.trim().to_string(),
            parsed,
        })
    }

    /// Product of SI base units with the exponents of `dimension`.
    #[must_use]
    pub fn si(dimension: Dimension) -> Self {
        let parsed = ParsedUnit::from_components(
            [
                ("kg", dimension.mass),
                ("m", dimension.length),
                ("s", dimension.time),
                ("K", dimension.temperature),
                ("rad", dimension.angle),
            ]
            .into_iter()
            .map(|(symbol, exp)| (symbol.to_string(), i32::from(exp)))
            .collect(),
        );
        Self {
            symbol: parsed.normalized(),
            parsed,
        }
    }

    /// The unit as it was written.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn normalized(&self) -> String {
        self.parsed.normalized()
    }

    #[must_use]
    pub fn parsed(&self) -> &ParsedUnit {
        &self.parsed
    }

    pub fn dimension(&self) -> Result<Dimension, ParseError> {
        self.parsed.dimension()
    }

    /// Multiplier taking a magnitude in this unit to SI.
    pub fn to_si_factor(&self) -> Result<f64, ParseError> {
        self.parsed.to_si_factor()
    }

    /// Multiplier taking a magnitude in this unit to one in `target`.
    pub fn factor_to(&self, target: &Unit) -> ExothermResult<f64> {
        let from = self.dimension()?;
        let to = target.dimension()?;
        if !from.is_compatible(&to) {
            return Err(ExothermError::dimension_mismatch(
                &format!("conversion from '{self}' to '{target}'"),
                to,
                from,
            ));
        }
        Ok(self.to_si_factor()? / target.to_si_factor()?)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.parsed == other.parsed
    }
}

impl Eq for Unit {}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::registry::ASTRONOMICAL_UNIT;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn equality_is_normalized() {
        assert_eq!(Unit::parse("W/m^2").unwrap(), Unit::parse("W m^-2").unwrap());
        assert_ne!(Unit::parse("h").unwrap(), Unit::parse("s").unwrap());
        assert_eq!(Unit::parse(" h ").unwrap().symbol(), "h");
    }

    #[test]
    fn unknown_symbols_rejected_at_parse() {
        assert_eq!(
            Unit::parse("AU furlong"),
            Err(ParseError::UnknownUnit("furlong".to_string()))
        );
    }

    fn convert(value: f64, from: &str, to: &str) -> ExothermResult<f64> {
        Ok(value * Unit::parse(from)?.factor_to(&Unit::parse(to)?)?)
    }

    #[test]
    fn astronomical_conversions() {
        assert_relative_eq!(convert(1.0, "AU", "m").unwrap(), ASTRONOMICAL_UNIT);
        assert_relative_eq!(convert(1.0, "AU", "km").unwrap(), ASTRONOMICAL_UNIT / 1e3);
        assert_relative_eq!(convert(3.0, "day", "h").unwrap(), 72.0);
        assert_relative_eq!(convert(180.0, "deg", "rad").unwrap(), PI);
        assert_relative_eq!(convert(1.0, "AU", "R_sun").unwrap(), 215.03, epsilon = 0.01);
    }

    #[test]
    fn incompatible_dimensions() {
        assert_eq!(
            convert(1.0, "AU", "K"),
            Err(ExothermError::DimensionMismatch {
                context: "conversion from 'AU' to 'K'".to_string(),
                expected: Dimension::TEMPERATURE,
                found: Dimension::LENGTH,
            })
        );
    }

    #[test]
    fn si_unit_for_dimension() {
        let unit = Unit::si(Dimension::LUMINOSITY_PROXY);
        assert_eq!(unit, Unit::parse("m^2 K^4").unwrap());
        assert_eq!(unit.dimension().unwrap(), Dimension::LUMINOSITY_PROXY);
        assert_eq!(Unit::si(Dimension::dimensionless()).normalized(), "1");
    }
}
