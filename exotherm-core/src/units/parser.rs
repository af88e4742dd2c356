//! Unit string parser with normalization.
//!
//! Accepted syntax:
//!
//! - Exponents: `m^2`, `m**2`, `m2`, `m ^ -2`
//! - Multiplication: `W m^-2`, `W*m^-2`, `W·m^-2`
//! - Division: `W/m^2`, `W per m^2`
//!
//! ```text
//! unit_expr = term (('/' | 'per') term)*
//! term      = factor (('*' | '·' | ' ') factor)*
//! factor    = symbol (('^' | '**')? exponent)?
//! symbol    = [a-zA-Z_]+
//! exponent  = '-'? [0-9]+
//! ```
//!
//! Every `/` divides by the whole term that follows it, so `W/m^2/s` is
//! `W m^-2 s^-1`.

use super::dimension::Dimension;
use super::registry::UNIT_REGISTRY;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error type for unit parsing failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty unit string")]
    EmptyUnit,
    #[error("unknown unit: '{0}'")]
    UnknownUnit(String),
    #[error("invalid exponent: '{0}'")]
    InvalidExponent(String),
    #[error("unexpected character '{1}' in '{0}'")]
    UnexpectedChar(String, char),
    #[error("parse failed: {0}")]
    ParseFailed(String),
}

/// A parsed unit expression.
///
/// Represents a unit as a product of registered symbols with integer
/// exponents, e.g. `W/m^2` is `{W: 1, m: -2}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedUnit {
    /// Ordered for a deterministic normalized form.
    components: BTreeMap<String, i32>,
}

impl ParsedUnit {
    #[must_use]
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// Builds a unit from components, dropping zero exponents.
    #[must_use]
    pub fn from_components(components: BTreeMap<String, i32>) -> Self {
        let components = components
            .into_iter()
            .filter(|(symbol, exp)| *exp != 0 && symbol != "1")
            .collect();
        Self { components }
    }

    /// Parses a unit string into a `ParsedUnit`.
    ///
    /// Symbols are not checked against the registry here; that happens when
    /// the dimension or SI factor is requested.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::EmptyUnit);
        }
        if input == "1" || input.eq_ignore_ascii_case("dimensionless") {
            return Ok(Self::dimensionless());
        }

        let normalized = normalize_syntax(input);
        let mut components = BTreeMap::new();

        for (index, term) in normalized.split('/').enumerate() {
            let sign = if index == 0 { 1 } else { -1 };
            let factors: Vec<&str> = term
                .split(|c: char| c.is_whitespace() || c == '*' || c == '·')
                .filter(|f| !f.is_empty())
                .collect();
            if factors.is_empty() {
                return Err(ParseError::ParseFailed(format!(
                    "empty term in '{input}'"
                )));
            }
            for factor in factors {
                let (symbol, exp) = parse_factor(factor)?;
                *components.entry(symbol).or_insert(0) += sign * exp;
            }
        }

        Ok(Self::from_components(components))
    }

    #[must_use]
    pub fn components(&self) -> &BTreeMap<String, i32> {
        &self.components
    }

    /// Computes the overall dimension of this unit.
    pub fn dimension(&self) -> Result<Dimension, ParseError> {
        self.components
            .iter()
            .try_fold(Dimension::dimensionless(), |acc, (symbol, &exp)| {
                let info = UNIT_REGISTRY
                    .lookup(symbol)
                    .ok_or_else(|| ParseError::UnknownUnit(symbol.clone()))?;
                let exp = i8::try_from(exp)
                    .map_err(|_| ParseError::InvalidExponent(exp.to_string()))?;
                Ok::<_, ParseError>(acc * info.dimension.pow(exp))
            })
    }

    /// Multiplier converting a value in this unit to SI base units.
    pub fn to_si_factor(&self) -> Result<f64, ParseError> {
        self.components
            .iter()
            .try_fold(1.0, |acc, (symbol, &exp)| {
                let info = UNIT_REGISTRY
                    .lookup(symbol)
                    .ok_or_else(|| ParseError::UnknownUnit(symbol.clone()))?;
                Ok::<_, ParseError>(acc * info.to_si_factor.powi(exp))
            })
    }

    /// Canonical string form: positive exponents first, then `/`, then the
    /// negative exponents, each group in symbol order.
    #[must_use]
    pub fn normalized(&self) -> String {
        if self.components.is_empty() {
            return "1".to_string();
        }

        let render = |symbol: &str, exp: i32| match exp {
            1 => symbol.to_string(),
            _ => format!("{symbol}^{exp}"),
        };
        let numerator: Vec<String> = self
            .components
            .iter()
            .filter(|&(_, &exp)| exp > 0)
            .map(|(symbol, &exp)| render(symbol.as_str(), exp))
            .collect();
        let denominator: Vec<String> = self
            .components
            .iter()
            .filter(|&(_, &exp)| exp < 0)
            .map(|(symbol, &exp)| render(symbol.as_str(), -exp))
            .collect();

        match (numerator.is_empty(), denominator.is_empty()) {
            (_, true) => numerator.join(" "),
            (true, false) => format!("1 / {}", denominator.join(" ")),
            (false, false) => format!("{} / {}", numerator.join(" "), denominator.join(" ")),
        }
    }
}

/// Rewrites `**` and `per`, and glues exponents onto their symbols so that
/// `m ^ 2` survives whitespace splitting.
fn normalize_syntax(input: &str) -> String {
    let replaced = input.replace("**", "^");
    let replaced = replaced
        .split_whitespace()
        .map(|word| if word == "per" { "/" } else { word })
        .collect::<Vec<_>>()
        .join(" ");
    replaced
        .split('^')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("^")
}

fn parse_factor(factor: &str) -> Result<(String, i32), ParseError> {
    if factor == "1" {
        return Ok((factor.to_string(), 0));
    }
    let (symbol, exponent) = match factor.split_once('^') {
        Some((symbol, exponent)) => (symbol, Some(exponent)),
        None => {
            // Trailing digits are an implicit exponent: `m2`, `s-1`.
            let split = factor
                .find(|c: char| c.is_ascii_digit() || c == '-')
                .unwrap_or(factor.len());
            let (symbol, exponent) = factor.split_at(split);
            (symbol, (!exponent.is_empty()).then_some(exponent))
        }
    };

    if symbol.is_empty() {
        return Err(ParseError::ParseFailed(format!("missing symbol in '{factor}'")));
    }
    if let Some(c) = symbol.chars().find(|c| !(c.is_ascii_alphabetic() || *c == '_')) {
        return Err(ParseError::UnexpectedChar(factor.to_string(), c));
    }

    let exp = match exponent {
        Some(exponent) => exponent
            .parse::<i32>()
            .map_err(|_| ParseError::InvalidExponent(exponent.to_string()))?,
        None => 1,
    };

    Ok((symbol.to_string(), exp))
}
