use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::unit::{WeightUnit, format_weight};

/// Competition colour code. Display only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlateColor {
    Red,
    Blue,
    Yellow,
    Green,
    White,
    Black,
    Chrome,
}

impl PlateColor {
    /// Colour a plate of this weight would carry in a competition set.
    #[must_use]
    pub fn for_weight(weight: f64, unit: WeightUnit) -> Self {
        let bands: &[(f64, PlateColor)] = match unit {
            WeightUnit::Kg => &[
                (25.0, PlateColor::Red),
                (20.0, PlateColor::Blue),
                (15.0, PlateColor::Yellow),
                (10.0, PlateColor::Green),
                (5.0, PlateColor::White),
                (2.5, PlateColor::Red),
                (2.0, PlateColor::Blue),
                (1.5, PlateColor::Yellow),
                (1.0, PlateColor::Green),
            ],
            WeightUnit::Lb => &[
                (55.0, PlateColor::Red),
                (45.0, PlateColor::Blue),
                (35.0, PlateColor::Yellow),
                (25.0, PlateColor::Green),
                (10.0, PlateColor::White),
                (5.0, PlateColor::Black),
            ],
        };

        bands
            .iter()
            .find(|(w, _)| (weight - w).abs() < 1e-9)
            .map_or(PlateColor::Chrome, |(_, color)| *color)
    }
}

/// One plate denomination in a gym's inventory.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    pub weight: f64,
    pub color: PlateColor,
    /// How many of this plate fit on one side. `None` is unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_side: Option<u32>,
}

impl Plate {
    #[must_use]
    pub fn new(weight: f64, color: PlateColor) -> Self {
        Plate {
            weight,
            color,
            per_side: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, per_side: u32) -> Self {
        self.per_side = Some(per_side);
        self
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Unlimited plates of each weight, coloured by the competition code.
    #[must_use]
    pub fn from_weights(weights: &[f64], unit: WeightUnit) -> Vec<Plate> {
        weights
            .iter()
            .map(|&w| Plate::new(w, PlateColor::for_weight(w, unit)))
            .collect()
    }

    /// Plates from an inventory of total counts. Symmetric loading leaves
    /// `count / 2` of each weight per side; weights with fewer than two
    /// plates are dropped.
    #[must_use]
    pub fn from_inventory(inventory: &[(f64, u32)], unit: WeightUnit) -> Vec<Plate> {
        inventory
            .iter()
            .filter(|(_, count)| *count >= 2)
            .map(|&(w, count)| Plate::new(w, PlateColor::for_weight(w, unit)).with_limit(count / 2))
            .collect()
    }
}

/// `count` plates of `weight` on one side of the bar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlateLoad {
    pub weight: f64,
    pub count: u32,
}

impl PlateLoad {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weight * f64::from(self.count)
    }
}

/// Combined weight of one side's plates.
#[must_use]
pub fn side_weight(loads: &[PlateLoad]) -> f64 {
    loads.iter().map(PlateLoad::total).sum()
}

pub(crate) struct LoadDisplay<'a> {
    pub loads: &'a [PlateLoad],
    pub unit: WeightUnit,
}

impl Display for LoadDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.loads.is_empty() {
            return write!(f, "no plates");
        }
        let parts = self
            .loads
            .iter()
            .map(|load| format!("{} x{}", format_weight(load.weight, self.unit), load.count))
            .collect::<Vec<_>>();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colours_follow_competition_code() {
        assert_eq!(PlateColor::for_weight(25.0, WeightUnit::Kg), PlateColor::Red);
        assert_eq!(PlateColor::for_weight(20.0, WeightUnit::Kg), PlateColor::Blue);
        assert_eq!(PlateColor::for_weight(1.25, WeightUnit::Kg), PlateColor::Chrome);
        assert_eq!(PlateColor::for_weight(45.0, WeightUnit::Lb), PlateColor::Blue);
    }

    #[test]
    fn inventory_halves_counts_per_side() {
        let plates = Plate::from_inventory(&[(20.0, 4), (10.0, 3), (5.0, 1)], WeightUnit::Kg);
        assert_eq!(plates.len(), 2);
        assert_eq!(plates[0].per_side, Some(2));
        assert_eq!(plates[1].per_side, Some(1));
    }

    #[test]
    fn sums_side_weight() {
        let loads = [
            PlateLoad { weight: 20.0, count: 1 },
            PlateLoad { weight: 2.5, count: 3 },
        ];
        assert!((side_weight(&loads) - 27.5).abs() < 1e-9);
        assert_eq!(
            LoadDisplay { loads: &loads, unit: WeightUnit::Kg }.to_string(),
            "20 kg x1, 2.5 kg x3"
        );
    }
}
