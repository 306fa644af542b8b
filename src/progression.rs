use crate::unit::WeightUnit;

/// Steps either side of the current weight.
pub const PROGRESSION_WINDOW: u32 = 4;

/// Standard training jump for a unit: 2.5 kg or 5 lb.
#[must_use]
pub fn progression_step(unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kg => 2.5,
        WeightUnit::Lb => 5.0,
    }
}

/// Evenly stepped training weights around `current`, lightest first.
///
/// The sequence is lazy and finite. Clone it, or call this again, to
/// restart. Values are not checked against any plate set; pair with
/// [`crate::calculator::is_achievable`] to keep only loadable ones.
#[must_use]
pub fn weight_progressions(current: f64, unit: WeightUnit) -> WeightProgressions {
    WeightProgressions::new(current, progression_step(unit), PROGRESSION_WINDOW)
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeightProgressions {
    current: f64,
    step: f64,
    next: i64,
    last: i64,
}

impl WeightProgressions {
    /// Non-finite inputs give an empty sequence.
    #[must_use]
    pub fn new(current: f64, step: f64, window: u32) -> Self {
        let window = i64::from(window);
        let (next, last) = if current.is_finite() && step.is_finite() && step > 0.0 {
            (-window, window)
        } else {
            (1, 0)
        };
        WeightProgressions {
            current,
            step,
            next,
            last,
        }
    }
}

impl Iterator for WeightProgressions {
    type Item = f64;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<f64> {
        while self.next <= self.last {
            let offset = self.next as f64;
            self.next += 1;
            let weight = self.current + offset * self.step;
            if weight > 0.0 {
                return Some(weight);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.last - self.next + 1).unwrap_or(0);
        (0, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bar_kind::BarKind, calculator::is_achievable, plate::Plate};

    #[test]
    fn brackets_current_weight() {
        let steps = weight_progressions(100.0, WeightUnit::Kg).collect::<Vec<_>>();
        assert_eq!(
            steps,
            vec![90.0, 92.5, 95.0, 97.5, 100.0, 102.5, 105.0, 107.5, 110.0]
        );
    }

    #[test]
    fn pounds_step_by_five() {
        let steps = weight_progressions(135.0, WeightUnit::Lb).collect::<Vec<_>>();
        assert_eq!(steps.first(), Some(&115.0));
        assert_eq!(steps.last(), Some(&155.0));
    }

    #[test]
    fn restarts_identically() {
        let progressions = weight_progressions(62.5, WeightUnit::Kg);
        let first = progressions.clone().collect::<Vec<_>>();
        let second = progressions.collect::<Vec<_>>();
        assert_eq!(first, second);
        assert_eq!(first, weight_progressions(62.5, WeightUnit::Kg).collect::<Vec<_>>());
    }

    #[test]
    fn skips_non_positive_weights() {
        let steps = weight_progressions(5.0, WeightUnit::Kg).collect::<Vec<_>>();
        assert_eq!(steps, vec![2.5, 5.0, 7.5, 10.0, 12.5, 15.0]);
        assert_eq!(weight_progressions(f64::NAN, WeightUnit::Kg).count(), 0);
    }

    #[test]
    fn callers_filter_loadable_steps() {
        let plates = Plate::from_weights(&[20.0, 10.0, 5.0], WeightUnit::Kg);
        let loadable = weight_progressions(60.0, WeightUnit::Kg)
            .filter(|w| is_achievable(*w, BarKind::Olympic, WeightUnit::Kg, &plates))
            .collect::<Vec<_>>();
        assert_eq!(loadable, vec![50.0, 60.0, 70.0]);
    }
}
