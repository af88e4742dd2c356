//! Unit registry with astronomical units and conversion factors.
//!
//! All conversion factors are the multiplier to convert FROM the registered
//! unit TO SI base units (kelvin and radians for temperature and angle). For
//! example `AU` has factor 1.495978707e11 and `h` has factor 3600.
//!
//! SI prefixes are only accepted on the units that are conventionally
//! prefixed (`m`, `s`, `g`, `W`, `J`), so `kK` or `mAU` are rejected rather
//! than silently interpreted.

use super::dimension::Dimension;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::LazyLock;

/// Information about a known unit.
#[derive(Debug, Clone)]
pub struct UnitInfo {
    pub name: String,
    pub dimension: Dimension,
    /// Conversion factor to SI base units.
    pub to_si_factor: f64,
    /// Whether SI prefixes may be attached to this symbol.
    pub prefixable: bool,
}

impl UnitInfo {
    fn new(name: &str, dimension: Dimension, to_si_factor: f64) -> Self {
        Self {
            name: name.to_string(),
            dimension,
            to_si_factor,
            prefixable: false,
        }
    }

    fn prefixable(name: &str, dimension: Dimension, to_si_factor: f64) -> Self {
        Self {
            prefixable: true,
            ..Self::new(name, dimension, to_si_factor)
        }
    }
}

/// SI prefixes accepted on prefixable units, longest symbols first.
static SI_PREFIXES: &[(&str, f64)] = &[
    ("da", 1e1),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6),
    ("n", 1e-9),
];

/// Seconds per Julian year.
pub const SECONDS_PER_YEAR: f64 = 365.25 * SECONDS_PER_DAY;
pub const SECONDS_PER_DAY: f64 = 24.0 * SECONDS_PER_HOUR;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Astronomical unit (m), IAU 2012 exact value.
pub const ASTRONOMICAL_UNIT: f64 = 1.495_978_707e11;
/// Nominal solar radius (m), IAU 2015 Resolution B3.
pub const SOLAR_RADIUS: f64 = 6.957e8;
/// Nominal equatorial Jupiter radius (m), IAU 2015 Resolution B3.
pub const JUPITER_RADIUS: f64 = 7.1492e7;
/// Nominal equatorial Earth radius (m), IAU 2015 Resolution B3.
pub const EARTH_RADIUS: f64 = 6.3781e6;

/// The global unit registry.
pub static UNIT_REGISTRY: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of known units with their dimensions and conversion factors.
#[derive(Debug)]
pub struct UnitRegistry {
    units: HashMap<&'static str, UnitInfo>,
    aliases: HashMap<&'static str, &'static str>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_base_units();
        registry.register_time_units();
        registry.register_astronomical_units();
        registry.register_angle_units();
        registry.register_energy_units();
        registry
    }

    /// Looks up a unit by symbol, handling aliases and SI prefixes.
    pub fn lookup(&self, symbol: &str) -> Option<UnitInfo> {
        if let Some(info) = self.get(symbol) {
            return Some(info.clone());
        }

        SI_PREFIXES.iter().find_map(|(prefix, factor)| {
            let base = symbol.strip_prefix(prefix)?;
            let info = self.get(base).filter(|info| info.prefixable)?;
            Some(UnitInfo {
                name: symbol.to_string(),
                dimension: info.dimension,
                to_si_factor: info.to_si_factor * factor,
                prefixable: false,
            })
        })
    }

    fn get(&self, symbol: &str) -> Option<&UnitInfo> {
        let canonical = self.aliases.get(symbol).copied().unwrap_or(symbol);
        self.units.get(canonical)
    }

    fn insert(&mut self, symbol: &'static str, info: UnitInfo) {
        self.units.insert(symbol, info);
    }

    fn register_base_units(&mut self) {
        self.insert("kg", UnitInfo::new("kg", Dimension::MASS, 1.0));
        self.insert("g", UnitInfo::prefixable("g", Dimension::MASS, 1e-3));
        self.insert("m", UnitInfo::prefixable("m", Dimension::LENGTH, 1.0));
        self.insert("s", UnitInfo::prefixable("s", Dimension::TIME, 1.0));
        self.insert("K", UnitInfo::new("K", Dimension::TEMPERATURE, 1.0));
        self.insert("1", UnitInfo::new("1", Dimension::dimensionless(), 1.0));

        self.aliases.insert("dimensionless", "1");
        self.aliases.insert("kelvin", "K");
    }

    fn register_time_units(&mut self) {
        self.insert("min", UnitInfo::new("min", Dimension::TIME, 60.0));
        self.insert("h", UnitInfo::new("h", Dimension::TIME, SECONDS_PER_HOUR));
        self.insert("day", UnitInfo::new("day", Dimension::TIME, SECONDS_PER_DAY));
        self.insert("yr", UnitInfo::new("yr", Dimension::TIME, SECONDS_PER_YEAR));

        self.aliases.insert("hr", "h");
        self.aliases.insert("hour", "h");
        self.aliases.insert("hours", "h");
        self.aliases.insert("d", "day");
        self.aliases.insert("days", "day");
        self.aliases.insert("year", "yr");
        self.aliases.insert("years", "yr");
        self.aliases.insert("sec", "s");
    }

    fn register_astronomical_units(&mut self) {
        self.insert(
            "AU",
            UnitInfo::new("AU", Dimension::LENGTH, ASTRONOMICAL_UNIT),
        );
        self.insert(
            "R_sun",
            UnitInfo::new("R_sun", Dimension::LENGTH, SOLAR_RADIUS),
        );
        self.insert(
            "R_jup",
            UnitInfo::new("R_jup", Dimension::LENGTH, JUPITER_RADIUS),
        );
        self.insert(
            "R_earth",
            UnitInfo::new("R_earth", Dimension::LENGTH, EARTH_RADIUS),
        );

        self.aliases.insert("au", "AU");
        self.aliases.insert("Rsun", "R_sun");
        self.aliases.insert("Rjup", "R_jup");
        self.aliases.insert("Rearth", "R_earth");
    }

    fn register_angle_units(&mut self) {
        self.insert("rad", UnitInfo::new("rad", Dimension::ANGLE, 1.0));
        self.insert("deg", UnitInfo::new("deg", Dimension::ANGLE, PI / 180.0));

        self.aliases.insert("radian", "rad");
        self.aliases.insert("radians", "rad");
        self.aliases.insert("degree", "deg");
        self.aliases.insert("degrees", "deg");
    }

    fn register_energy_units(&mut self) {
        self.insert("J", UnitInfo::prefixable("J", Dimension::new(1, 2, -2, 0, 0), 1.0));
        self.insert("W", UnitInfo::prefixable("W", Dimension::POWER, 1.0));
    }
}
