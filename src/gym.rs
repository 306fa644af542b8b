//! Named plate inventories.
//!
//! The standard catalog is built once and never mutated. Custom gyms are
//! read from a TOML file:
//!
//! ```toml
//! [[gym]]
//! name = "Garage"
//! unit = "kg"
//! plates = [
//!     { weight = 20.0, per_side = 2 },
//!     { weight = 10.0 },
//!     { weight = 1.25, color = "chrome" },
//! ]
//! ```

use std::{fmt::Display, path::Path, sync::LazyLock};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    bar_kind::BarKind,
    calculation::PlateCalculation,
    calculator::{EPSILON, calculate_plates},
    gym_error::GymError,
    plate::{Plate, PlateColor},
    unit::{WeightUnit, convert_weight, format_weight},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GymConfiguration {
    name: String,
    unit: WeightUnit,
    plates: Vec<Plate>,
}

impl GymConfiguration {
    ///
    /// # Errors
    /// If `plates` is empty, or holds a non-positive, non-finite or repeated weight.
    ///
    pub fn new(
        name: impl Into<String>,
        unit: WeightUnit,
        plates: Vec<Plate>,
    ) -> Result<Self, GymError> {
        let name = name.into();
        if plates.is_empty() {
            return Err(GymError::EmptyConfiguration(name));
        }

        for (i, plate) in plates.iter().enumerate() {
            if !plate.weight.is_finite() || plate.weight <= 0.0 {
                return Err(GymError::InvalidPlateWeight {
                    name,
                    weight: plate.weight,
                });
            }
            if plates[..i]
                .iter()
                .any(|other| (other.weight - plate.weight).abs() < EPSILON)
            {
                return Err(GymError::DuplicatePlate {
                    name,
                    weight: plate.weight,
                });
            }
        }

        let mut plates = plates;
        plates.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        Ok(GymConfiguration { name, unit, plates })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn unit(&self) -> WeightUnit {
        self.unit
    }

    /// Heaviest first.
    #[must_use]
    pub fn plates(&self) -> &[Plate] {
        &self.plates
    }

    #[must_use]
    pub fn calculate(&self, total_weight: f64, bar_kind: BarKind) -> PlateCalculation {
        calculate_plates(total_weight, bar_kind, self.unit, &self.plates)
    }

    /// The same plates re-denominated in `unit`.
    #[must_use]
    pub fn in_unit(&self, unit: WeightUnit) -> GymConfiguration {
        let plates = self
            .plates
            .iter()
            .map(|plate| Plate {
                weight: convert_weight(plate.weight, self.unit, unit),
                ..*plate
            })
            .collect();

        GymConfiguration {
            name: self.name.clone(),
            unit,
            plates,
        }
    }
}

impl Display for GymConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plates = self
            .plates
            .iter()
            .map(|plate| match plate.per_side {
                Some(limit) => format!("{} (x{limit})", format_weight(plate.weight, self.unit)),
                None => format_weight(plate.weight, self.unit),
            })
            .collect::<Vec<_>>();
        write!(f, "{}: {}", self.name, plates.join(", "))
    }
}

fn standard(name: &str, unit: WeightUnit, weights: &[f64]) -> GymConfiguration {
    GymConfiguration {
        name: name.to_string(),
        unit,
        plates: Plate::from_weights(weights, unit),
    }
}

static STANDARD_CONFIGURATIONS: LazyLock<Vec<GymConfiguration>> = LazyLock::new(|| {
    vec![
        standard(
            "Standard Olympic (kg)",
            WeightUnit::Kg,
            &[25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25],
        ),
        standard(
            "Competition (kg)",
            WeightUnit::Kg,
            &[25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 2.0, 1.5, 1.0, 0.5],
        ),
        standard("Home Gym (kg)", WeightUnit::Kg, &[20.0, 10.0, 5.0, 2.5, 1.25]),
        standard(
            "Commercial (lb)",
            WeightUnit::Lb,
            &[45.0, 35.0, 25.0, 10.0, 5.0, 2.5],
        ),
        standard("Home Gym (lb)", WeightUnit::Lb, &[45.0, 25.0, 10.0, 5.0, 2.5]),
    ]
});

/// Built-in plate sets.
#[must_use]
pub fn standard_configurations() -> &'static [GymConfiguration] {
    &STANDARD_CONFIGURATIONS
}

/// Case-insensitive lookup in the built-in catalog.
#[must_use]
pub fn find_configuration(name: &str) -> Option<&'static GymConfiguration> {
    find_in(standard_configurations(), name)
}

#[must_use]
pub fn find_in<'a>(
    configurations: &'a [GymConfiguration],
    name: &str,
) -> Option<&'a GymConfiguration> {
    configurations
        .iter()
        .find(|gym| gym.name.eq_ignore_ascii_case(name.trim()))
}

/// First built-in configuration for a unit.
#[must_use]
pub fn default_configuration(unit: WeightUnit) -> Option<&'static GymConfiguration> {
    standard_configurations().iter().find(|gym| gym.unit == unit)
}

#[derive(Debug, Deserialize)]
struct GymFile {
    #[serde(default, rename = "gym")]
    gyms: Vec<GymEntry>,
}

#[derive(Debug, Deserialize)]
struct GymEntry {
    name: String,
    unit: WeightUnit,
    plates: Vec<PlateEntry>,
}

#[derive(Debug, Deserialize)]
struct PlateEntry {
    weight: f64,
    color: Option<PlateColor>,
    per_side: Option<u32>,
}

///
/// # Errors
/// If the TOML is malformed or a gym breaks a [`GymConfiguration::new`] invariant.
///
pub fn parse_configurations(content: &str) -> anyhow::Result<Vec<GymConfiguration>> {
    let file: GymFile = toml::from_str(content).context("Invalid gym configuration TOML")?;

    file.gyms
        .into_iter()
        .map(|entry| -> anyhow::Result<GymConfiguration> {
            let plates = entry
                .plates
                .into_iter()
                .map(|plate| Plate {
                    weight: plate.weight,
                    color: plate
                        .color
                        .unwrap_or_else(|| PlateColor::for_weight(plate.weight, entry.unit)),
                    per_side: plate.per_side,
                })
                .collect();
            let gym = GymConfiguration::new(entry.name, entry.unit, plates)?;
            debug!(name = gym.name(), plates = gym.plates().len(), "loaded gym configuration");
            Ok(gym)
        })
        .collect()
}

///
/// # Errors
/// If the file cannot be read or fails [`parse_configurations`].
///
pub fn load_configurations(path: &Path) -> anyhow::Result<Vec<GymConfiguration>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read gym configuration file {}", path.display()))?;
    let gyms = parse_configurations(&content)
        .with_context(|| format!("Failed to load gym configurations from {}", path.display()))?;
    info!(path = %path.display(), count = gyms.len(), "loaded custom gyms");
    Ok(gyms)
}
