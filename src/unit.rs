use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::gym_error::GymError;

/// Pounds per kilogram. Every kg/lb conversion in the crate goes through
/// [`convert_weight`].
pub const LB_PER_KG: f64 = 2.204_622_621_85;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

impl Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

impl FromStr for WeightUnit {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilo" | "kilos" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lb),
            _ => Err(GymError::UnknownUnit(s.to_string())),
        }
    }
}

/// Converts `value` between units at full precision. Same-unit conversion
/// returns the input untouched.
#[must_use]
pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    match (from, to) {
        (WeightUnit::Kg, WeightUnit::Lb) => value * LB_PER_KG,
        (WeightUnit::Lb, WeightUnit::Kg) => value / LB_PER_KG,
        _ => value,
    }
}

/// Renders a weight for display: whole numbers without a decimal part,
/// everything else rounded to one decimal place.
#[must_use]
pub fn format_weight(weight: f64, unit: WeightUnit) -> String {
    let mut rounded = (weight * 10.0).round() / 10.0;
    if rounded == 0.0 {
        // Drops the sign of -0.0.
        rounded = 0.0;
    }
    if rounded.fract() == 0.0 {
        format!("{rounded:.0} {unit}")
    } else {
        format!("{rounded:.1} {unit}")
    }
}
