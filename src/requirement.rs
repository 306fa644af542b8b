use std::{fmt::Display, str::FromStr};

use crate::{
    gym_error::GymError,
    unit::{WeightUnit, format_weight},
};

/// A weight typed on the command line, e.g. `100kg`, `225 lb` or `60`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Requirement {
    pub weight: f64,
    pub unit: Option<WeightUnit>,
}

impl Requirement {
    #[must_use]
    pub fn new(weight: f64, unit: WeightUnit) -> Self {
        Requirement {
            weight,
            unit: Some(unit),
        }
    }

    #[must_use]
    pub fn unit_or(&self, default: WeightUnit) -> WeightUnit {
        self.unit.unwrap_or(default)
    }
}

impl FromStr for Requirement {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (weight, unit) = s.split_at(split);

        let weight = weight
            .trim()
            .parse::<f64>()
            .map_err(|_| GymError::InvalidRequirement(s.to_string()))?;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(GymError::InvalidRequirement(s.to_string()));
        }

        let unit = match unit.trim() {
            "" => None,
            unit => Some(WeightUnit::from_str(unit)?),
        };

        Ok(Requirement { weight, unit })
    }
}

impl Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{}", format_weight(self.weight, unit)),
            None => write!(f, "{}", self.weight),
        }
    }
}
