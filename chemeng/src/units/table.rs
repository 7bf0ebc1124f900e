//! Unit symbol table - maps unit symbols to SI scales and dimensions

use super::quantity::{Dimension, Unit};
use crate::{ChemEngError, ChemEngResult};

/// Standard acceleration due to gravity in m/s^2
pub const STANDARD_GRAVITY: f64 = 9.80665;

const POUND_KG: f64 = 0.453_592_37;
const FOOT_M: f64 = 0.3048;
const INCH_M: f64 = 0.0254;
const POUND_FORCE_N: f64 = POUND_KG * STANDARD_GRAVITY;
const ATMOSPHERE_PA: f64 = 101_325.0;

const PRESSURE: Dimension = Dimension::new(1, -1, -2, 0, 0, 0, 0);
const FORCE: Dimension = Dimension::new(1, 1, -2, 0, 0, 0, 0);
const ENERGY: Dimension = Dimension::new(1, 2, -2, 0, 0, 0, 0);
const POWER: Dimension = Dimension::new(1, 2, -3, 0, 0, 0, 0);
const VOLUME: Dimension = Dimension::new(0, 3, 0, 0, 0, 0, 0);
const FREQUENCY: Dimension = Dimension::new(0, 0, -1, 0, 0, 0, 0);
const VISCOSITY: Dimension = Dimension::new(1, -1, -1, 0, 0, 0, 0);

/// A family of units sharing one dimension; each entry is (symbol, SI scale)
struct UnitCategory {
    dimension: Dimension,
    units: &'static [(&'static str, f64)],
}

const MASS_UNITS: UnitCategory = UnitCategory {
    dimension: Dimension::MASS,
    units: &[
        ("kg", 1.0),
        ("kilogram", 1.0),
        ("g", 1e-3),
        ("gram", 1e-3),
        ("mg", 1e-6),
        ("t", 1e3),
        ("tonne", 1e3),
        ("lb", POUND_KG),
        ("lbm", POUND_KG),
        ("lbs", POUND_KG),
        ("pound", POUND_KG),
        ("oz", POUND_KG / 16.0),
        ("slug", POUND_FORCE_N / FOOT_M),
    ],
};

const LENGTH_UNITS: UnitCategory = UnitCategory {
    dimension: Dimension::LENGTH,
    units: &[
        ("m", 1.0),
        ("meter", 1.0),
        ("metre", 1.0),
        ("km", 1e3),
        ("cm", 1e-2),
        ("mm", 1e-3),
        ("um", 1e-6),
        ("nm", 1e-9),
        ("ft", FOOT_M),
        ("foot", FOOT_M),
        ("feet", FOOT_M),
        ("inch", INCH_M),
        ("yd", 3.0 * FOOT_M),
        ("yard", 3.0 * FOOT_M),
        ("mi", 5280.0 * FOOT_M),
        ("mile", 5280.0 * FOOT_M),
    ],
};

const TIME_UNITS: UnitCategory = UnitCategory {
    dimension: Dimension::TIME,
    units: &[
        ("s", 1.0),
        ("sec", 1.0),
        ("second", 1.0),
        ("ms", 1e-3),
        ("us", 1e-6),
        ("min", 60.0),
        ("minute", 60.0),
        ("h", 3600.0),
        ("hr", 3600.0),
        ("hour", 3600.0),
        ("day", 86_400.0),
        ("yr", 365.25 * 86_400.0),
    ],
};

const AMOUNT_UNITS: UnitCategory = UnitCategory {
    dimension: Dimension::AMOUNT,
    units: &[
        ("mol", 1.0),
        ("mmol", 1e-3),
        ("kmol", 1e3),
        ("lbmol", POUND_KG * 1e3),
    ],
};

const CURRENT_UNITS: UnitCategory = UnitCategory {
    dimension: Dimension::CURRENT,
    units: &[("A", 1.0), ("mA", 1e-3)],
};

const LUMINOSITY_UNITS: UnitCategory = UnitCategory {
    dimension: Dimension::LUMINOSITY,
    units: &[("cd", 1.0)],
};

const PRESSURE_UNITS: UnitCategory = UnitCategory {
    dimension: PRESSURE,
    units: &[
        ("Pa", 1.0),
        ("pascal", 1.0),
        ("kPa", 1e3),
        ("MPa", 1e6),
        ("GPa", 1e9),
        ("bar", 1e5),
        ("mbar", 1e2),
        ("atm", ATMOSPHERE_PA),
        ("psi", POUND_FORCE_N / (INCH_M * INCH_M)),
        ("torr", ATMOSPHERE_PA / 760.0),
        ("mmHg", 133.322_387_415),
        ("inHg", 3_386.388_640_341),
    ],
};

const FORCE_UNITS: UnitCategory = UnitCategory {
    dimension: FORCE,
    units: &[
        ("N", 1.0),
        ("newton", 1.0),
        ("kN", 1e3),
        ("lbf", POUND_FORCE_N),
        ("dyn", 1e-5),
    ],
};

const ENERGY_UNITS: UnitCategory = UnitCategory {
    dimension: ENERGY,
    units: &[
        ("J", 1.0),
        ("joule", 1.0),
        ("kJ", 1e3),
        ("MJ", 1e6),
        ("cal", 4.184),
        ("kcal", 4184.0),
        ("Btu", 1_055.055_852_62),
        ("erg", 1e-7),
        ("eV", 1.602_176_634e-19),
        ("kWh", 3.6e6),
    ],
};

const POWER_UNITS: UnitCategory = UnitCategory {
    dimension: POWER,
    units: &[
        ("W", 1.0),
        ("watt", 1.0),
        ("kW", 1e3),
        ("MW", 1e6),
        ("hp", 550.0 * FOOT_M * POUND_FORCE_N),
    ],
};

const VOLUME_UNITS: UnitCategory = UnitCategory {
    dimension: VOLUME,
    units: &[
        ("L", 1e-3),
        ("l", 1e-3),
        ("liter", 1e-3),
        ("litre", 1e-3),
        ("mL", 1e-6),
        ("gal", 231.0 * INCH_M * INCH_M * INCH_M),
    ],
};

const FREQUENCY_UNITS: UnitCategory = UnitCategory {
    dimension: FREQUENCY,
    units: &[("Hz", 1.0), ("kHz", 1e3), ("MHz", 1e6)],
};

const VISCOSITY_UNITS: UnitCategory = UnitCategory {
    dimension: VISCOSITY,
    units: &[("poise", 0.1), ("cP", 1e-3)],
};

const CATEGORIES: [&UnitCategory; 13] = [
    &MASS_UNITS,
    &LENGTH_UNITS,
    &TIME_UNITS,
    &AMOUNT_UNITS,
    &CURRENT_UNITS,
    &LUMINOSITY_UNITS,
    &PRESSURE_UNITS,
    &FORCE_UNITS,
    &ENERGY_UNITS,
    &POWER_UNITS,
    &VOLUME_UNITS,
    &FREQUENCY_UNITS,
    &VISCOSITY_UNITS,
];

const TEMPERATURE_SYMBOLS: [&str; 6] = ["K", "kelvin", "degC", "celsius", "degF", "R"];

/// Resolve a single unit symbol (case-sensitive) to its SI definition
pub fn resolve_unit(symbol: &str) -> ChemEngResult<Unit> {
    if let Some(unit) = try_parse_temperature_unit(symbol) {
        return Ok(unit);
    }

    for category in CATEGORIES {
        if let Some(unit) = try_parse_category_unit(category, symbol) {
            return Ok(unit);
        }
    }

    Err(ChemEngError::UnknownUnit {
        unit: symbol.to_string(),
        suggestion: find_closest_unit(symbol),
    })
}

fn try_parse_category_unit(category: &UnitCategory, symbol: &str) -> Option<Unit> {
    category
        .units
        .iter()
        .find(|(name, _)| *name == symbol)
        .map(|(name, scale)| Unit::new(*name, *scale, category.dimension))
}

// Absolute scales carry an offset; it is dropped once the unit is combined
fn try_parse_temperature_unit(symbol: &str) -> Option<Unit> {
    let rankine = 5.0 / 9.0;
    match symbol {
        "K" | "kelvin" => Some(Unit::new(symbol, 1.0, Dimension::TEMPERATURE)),
        "degC" | "celsius" => {
            Some(Unit::new(symbol, 1.0, Dimension::TEMPERATURE).with_offset(273.15))
        }
        "degF" => {
            Some(Unit::new(symbol, rankine, Dimension::TEMPERATURE).with_offset(459.67 * rankine))
        }
        "R" => Some(Unit::new(symbol, rankine, Dimension::TEMPERATURE)),
        _ => None,
    }
}

fn known_symbols() -> impl Iterator<Item = &'static str> {
    TEMPERATURE_SYMBOLS.into_iter().chain(
        CATEGORIES
            .into_iter()
            .flat_map(|category| category.units.iter().map(|(name, _)| *name)),
    )
}

/// Find the closest matching unit to provide a helpful suggestion
fn find_closest_unit(symbol: &str) -> String {
    if let Some(known) = known_symbols().find(|known| known.eq_ignore_ascii_case(symbol)) {
        return format!("Did you mean '{}'? Unit symbols are case-sensitive", known);
    }

    // Plural long names
    if let Some(singular) = symbol.strip_suffix('s') {
        if let Some(known) = known_symbols().find(|known| known.eq_ignore_ascii_case(singular)) {
            return format!("Did you mean '{}'?", known);
        }
    }

    let common: [(&str, &str); 5] = [
        ("fahrenheit", "degF"),
        ("rankine", "R"),
        ("inches", "inch"),
        ("gallon", "gal"),
        ("sec", "s"),
    ];
    for (alias, correct) in common {
        if symbol.eq_ignore_ascii_case(alias) {
            return format!("Did you mean '{}'?", correct);
        }
    }

    "Check the unit symbol spelling (e.g. 'kg', 'ft', 'psi', 'degF')".to_string()
}
