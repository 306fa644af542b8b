use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{gym_error::GymError, unit::WeightUnit};

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarKind {
    Olympic,
    Standard,
    Ez,
    Hex,
}

impl BarKind {
    pub const ALL: [BarKind; 4] = [
        BarKind::Olympic,
        BarKind::Standard,
        BarKind::Ez,
        BarKind::Hex,
    ];

    /// Nominal bar weight. Each bar has its own published kg and lb weight
    /// rather than a converted one.
    #[must_use]
    pub fn weight(self, unit: WeightUnit) -> f64 {
        match (self, unit) {
            (BarKind::Olympic, WeightUnit::Kg) => 20.0,
            (BarKind::Olympic, WeightUnit::Lb) => 45.0,
            (BarKind::Standard, WeightUnit::Kg) => 15.0,
            (BarKind::Standard, WeightUnit::Lb) => 35.0,
            (BarKind::Ez, WeightUnit::Kg) => 10.0,
            (BarKind::Ez, WeightUnit::Lb) => 25.0,
            (BarKind::Hex, WeightUnit::Kg) => 25.0,
            (BarKind::Hex, WeightUnit::Lb) => 55.0,
        }
    }
}

impl Display for BarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BarKind::Olympic => write!(f, "Olympic"),
            BarKind::Standard => write!(f, "Standard"),
            BarKind::Ez => write!(f, "EZ"),
            BarKind::Hex => write!(f, "Hex"),
        }
    }
}

impl FromStr for BarKind {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "olympic" | "o" => Ok(BarKind::Olympic),
            "standard" | "s" => Ok(BarKind::Standard),
            "ez" | "e" => Ok(BarKind::Ez),
            "hex" | "trap" | "h" => Ok(BarKind::Hex),
            _ => Err(GymError::UnknownBarKind(s.to_string())),
        }
    }
}
