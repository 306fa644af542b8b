use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

use crate::{
    bar_kind::BarKind,
    plate::{LoadDisplay, PlateLoad, side_weight},
    unit::{WeightUnit, format_weight},
};

/// Why a requested weight could not be loaded. Returned as data on
/// [`PlateCalculation`], never raised.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationError {
    #[error("Invalid weight {weight}: weights must be finite and positive.")]
    InvalidWeight { weight: f64 },
    #[error("Invalid plate weight {weight}: plates must be finite and positive.")]
    InvalidPlate { weight: f64 },
    #[error("{} is lighter than the {} bar.", shown(.total, .unit), shown(.bar, .unit))]
    BelowBar {
        total: f64,
        bar: f64,
        unit: WeightUnit,
    },
    #[error(
        "Cannot make exact weight with available plates ({} left over per side).",
        shown_remainder(.remainder, .unit)
    )]
    Unachievable { remainder: f64, unit: WeightUnit },
    #[error("No plates available to load {} per side.", shown(.per_side, .unit))]
    NoPlates { per_side: f64, unit: WeightUnit },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn shown(weight: &f64, unit: &WeightUnit) -> String {
    format_weight(*weight, *unit)
}

/// Remainders can sit far below display precision, so keep enough digits
/// that a nonzero one never reads as zero.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn shown_remainder(remainder: &f64, unit: &WeightUnit) -> String {
    if remainder.abs() >= 0.05 {
        return format_weight(*remainder, *unit);
    }
    let digits = format!("{remainder:.6}");
    let digits = digits.trim_end_matches('0').trim_end_matches('.');
    format!("{digits} {unit}")
}

/// Outcome of loading one target weight onto a bar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlateCalculation {
    pub total_weight: f64,
    pub unit: WeightUnit,
    pub bar_kind: BarKind,
    pub bar_weight: f64,
    pub total_plates_per_side: f64,
    /// Heaviest first. Holds the closest packing found even when invalid.
    pub plates_per_side: Vec<PlateLoad>,
    pub remainder_per_side: f64,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CalculationError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_weights: Vec<f64>,
}

impl PlateCalculation {
    pub(crate) fn new(total_weight: f64, bar_kind: BarKind, unit: WeightUnit) -> Self {
        PlateCalculation {
            total_weight,
            unit,
            bar_kind,
            bar_weight: bar_kind.weight(unit),
            total_plates_per_side: 0.0,
            plates_per_side: Vec::new(),
            remainder_per_side: 0.0,
            is_valid: false,
            error: None,
            alternative_weights: Vec::new(),
        }
    }

    pub(crate) fn succeed(mut self, plates_per_side: Vec<PlateLoad>) -> Self {
        self.plates_per_side = plates_per_side;
        self.remainder_per_side = 0.0;
        self.is_valid = true;
        self.error = None;
        self
    }

    pub(crate) fn fail(mut self, error: CalculationError) -> Self {
        self.is_valid = false;
        self.error = Some(error);
        self
    }

    /// Bar plus both sides as actually loaded.
    #[must_use]
    pub fn loaded_weight(&self) -> f64 {
        self.bar_weight + side_weight(&self.plates_per_side) * 2.0
    }

    #[must_use]
    pub fn plate_count(&self) -> u32 {
        self.plates_per_side.iter().map(|load| load.count).sum()
    }
}

impl Display for PlateCalculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} bar ({}) + [{}] per side = {}",
            self.bar_kind,
            format_weight(self.bar_weight, self.unit),
            LoadDisplay {
                loads: &self.plates_per_side,
                unit: self.unit,
            },
            format_weight(self.loaded_weight(), self.unit),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_weights() {
        let error = CalculationError::BelowBar {
            total: 15.0,
            bar: 20.0,
            unit: WeightUnit::Kg,
        };
        assert_eq!(error.to_string(), "15 kg is lighter than the 20 kg bar.");

        let error = CalculationError::Unachievable {
            remainder: 0.5,
            unit: WeightUnit::Kg,
        };
        assert_eq!(
            error.to_string(),
            "Cannot make exact weight with available plates (0.5 kg left over per side)."
        );
    }

    #[test]
    fn small_remainders_stay_visible() {
        let error = CalculationError::Unachievable {
            remainder: 0.01,
            unit: WeightUnit::Kg,
        };
        assert_eq!(
            error.to_string(),
            "Cannot make exact weight with available plates (0.01 kg left over per side)."
        );

        let error = CalculationError::Unachievable {
            remainder: 0.000_25,
            unit: WeightUnit::Lb,
        };
        assert!(error.to_string().contains("(0.00025 lb left over"));
    }

    #[test]
    fn displays_loading() {
        let calculation = PlateCalculation::new(100.0, BarKind::Olympic, WeightUnit::Kg)
            .succeed(vec![
                PlateLoad { weight: 25.0, count: 1 },
                PlateLoad { weight: 15.0, count: 1 },
            ]);
        assert_eq!(
            calculation.to_string(),
            "Olympic bar (20 kg) + [25 kg x1, 15 kg x1] per side = 100 kg"
        );
        assert_eq!(calculation.plate_count(), 2);
    }

    #[test]
    fn serializes_error_with_kind_tag() {
        let calculation = PlateCalculation::new(10.0, BarKind::Olympic, WeightUnit::Kg).fail(
            CalculationError::BelowBar {
                total: 10.0,
                bar: 20.0,
                unit: WeightUnit::Kg,
            },
        );
        let json = serde_json::to_value(&calculation).unwrap();
        assert_eq!(json["error"]["kind"], "below_bar");
        assert_eq!(json["is_valid"], false);
        assert!(json.get("alternative_weights").is_none());
    }
}
