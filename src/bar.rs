use std::fmt::Display;

use serde::Serialize;

use crate::{
    bar_kind::BarKind,
    unit::{WeightUnit, format_weight},
};

/// A bar kind resolved to its weight in one unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bar {
    pub kind: BarKind,
    pub unit: WeightUnit,
    pub weight: f64,
}

impl Bar {
    #[must_use]
    pub fn new(kind: BarKind, unit: WeightUnit) -> Self {
        Bar {
            kind,
            unit,
            weight: kind.weight(unit),
        }
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bar ({})", self.kind, format_weight(self.weight, self.unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_weight_for_unit() {
        let bar = Bar::new(BarKind::Hex, WeightUnit::Lb);
        assert_eq!(bar.weight(), 55.0);
        assert_eq!(bar.to_string(), "Hex bar (55 lb)");
    }
}
