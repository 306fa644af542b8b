//! Splits a target barbell weight into the plates that go on each side.
//!
//! Packing is greedy, heaviest plate first. Standard gym plate sets are
//! canonical, so greedy finds an exact packing with the fewest plates
//! whenever one exists. Arbitrary sets (or capped inventories) are not, so
//! a greedy miss falls back to a bounded exact search before a weight is
//! declared unachievable.

use itertools::Itertools;
use tracing::{debug, trace, warn};

use crate::{
    bar_kind::BarKind,
    calculation::{CalculationError, PlateCalculation},
    plate::{Plate, PlateLoad},
    unit::WeightUnit,
};

/// Tolerance for treating a per-side remainder as zero.
pub const EPSILON: f64 = 1e-6;

const MILLI: f64 = 1000.0;
const MAX_EXACT_CELLS: u64 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalculatorOptions {
    /// Upper bound on suggested alternative weights.
    pub max_alternatives: usize,
    /// Loading increments searched on each side of an unachievable target.
    pub search_steps: u32,
    /// Run the exact search when greedy leaves a remainder.
    pub exact_fallback: bool,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        CalculatorOptions {
            max_alternatives: 4,
            search_steps: 5,
            exact_fallback: true,
        }
    }
}

/// Loads `total_weight` onto a `bar_kind` bar using `plates`, all in `unit`.
///
/// Invalid results carry an [`CalculationError`]; unachievable and
/// below-bar targets also get nearby achievable alternatives.
#[must_use]
pub fn calculate_plates(
    total_weight: f64,
    bar_kind: BarKind,
    unit: WeightUnit,
    plates: &[Plate],
) -> PlateCalculation {
    calculate_plates_with(total_weight, bar_kind, unit, plates, &CalculatorOptions::default())
}

#[must_use]
pub fn calculate_plates_with(
    total_weight: f64,
    bar_kind: BarKind,
    unit: WeightUnit,
    plates: &[Plate],
    options: &CalculatorOptions,
) -> PlateCalculation {
    let stack = denominations(plates);
    let mut calculation = decompose(total_weight, bar_kind, unit, plates, &stack, options);

    if matches!(
        calculation.error,
        Some(
            CalculationError::BelowBar { .. }
                | CalculationError::Unachievable { .. }
                | CalculationError::NoPlates { .. }
        )
    ) {
        calculation.alternative_weights =
            alternative_weights(total_weight, bar_kind, unit, plates, &stack, options);
        debug!(
            total_weight,
            alternatives = ?calculation.alternative_weights,
            "suggesting alternative weights"
        );
    }

    calculation
}

/// Whether `total_weight` loads exactly with `plates`.
#[must_use]
pub fn is_achievable(
    total_weight: f64,
    bar_kind: BarKind,
    unit: WeightUnit,
    plates: &[Plate],
) -> bool {
    let stack = denominations(plates);
    decompose(total_weight, bar_kind, unit, plates, &stack, &CalculatorOptions::default()).is_valid
}

fn decompose(
    total_weight: f64,
    bar_kind: BarKind,
    unit: WeightUnit,
    plates: &[Plate],
    stack: &[Plate],
    options: &CalculatorOptions,
) -> PlateCalculation {
    let calculation = PlateCalculation::new(total_weight, bar_kind, unit);
    let bar_weight = calculation.bar_weight;

    if !total_weight.is_finite() || total_weight <= 0.0 {
        return calculation.fail(CalculationError::InvalidWeight {
            weight: total_weight,
        });
    }

    if let Some(plate) = plates
        .iter()
        .find(|plate| !plate.weight.is_finite() || plate.weight <= 0.0)
    {
        return calculation.fail(CalculationError::InvalidPlate {
            weight: plate.weight,
        });
    }

    if total_weight < bar_weight - EPSILON {
        return calculation.fail(CalculationError::BelowBar {
            total: total_weight,
            bar: bar_weight,
            unit,
        });
    }

    let per_side = ((total_weight - bar_weight) / 2.0).max(0.0);
    let mut calculation = PlateCalculation {
        total_plates_per_side: per_side,
        ..calculation
    };

    let (loads, remainder) = greedy(per_side, stack);
    if remainder.abs() < EPSILON {
        trace!(total_weight, per_side, "greedy packing is exact");
        return calculation.succeed(loads);
    }

    if stack.is_empty() {
        calculation.remainder_per_side = per_side;
        return calculation.fail(CalculationError::NoPlates { per_side, unit });
    }

    if options.exact_fallback {
        if let Some(exact) = exact_packing(per_side, stack) {
            debug!(total_weight, per_side, "exact search found a packing greedy missed");
            return calculation.succeed(exact);
        }
    }

    debug!(total_weight, per_side, remainder, "weight is not achievable");
    calculation.plates_per_side = loads;
    calculation.remainder_per_side = remainder;
    calculation.fail(CalculationError::Unachievable { remainder, unit })
}

/// Distinct plate weights, heaviest first. Repeated weights merge their
/// per-side limits; any unlimited entry makes the merged plate unlimited.
fn denominations(plates: &[Plate]) -> Vec<Plate> {
    plates
        .iter()
        .filter(|plate| plate.weight.is_finite() && plate.weight > 0.0)
        .copied()
        .sorted_by(|a, b| b.weight.total_cmp(&a.weight))
        .coalesce(|a, b| {
            if (a.weight - b.weight).abs() < EPSILON {
                let per_side = a.per_side.zip(b.per_side).map(|(x, y)| x.saturating_add(y));
                Ok(Plate { per_side, ..a })
            } else {
                Err((a, b))
            }
        })
        .filter(|plate| plate.per_side != Some(0))
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn greedy(target: f64, stack: &[Plate]) -> (Vec<PlateLoad>, f64) {
    let mut remaining = target;
    let mut loads = Vec::new();

    for plate in stack {
        let fit = ((remaining + EPSILON) / plate.weight).floor();
        if fit < 1.0 {
            continue;
        }
        let fit = fit.min(f64::from(u32::MAX)) as u32;
        let count = plate.per_side.map_or(fit, |limit| fit.min(limit));
        if count == 0 {
            continue;
        }
        remaining -= f64::from(count) * plate.weight;
        loads.push(PlateLoad {
            weight: plate.weight,
            count,
        });
    }

    if remaining.abs() < EPSILON {
        remaining = 0.0;
    }
    (loads, remaining)
}

/// Weight in thousandths, when it sits on that grid.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn to_milli(weight: f64) -> Option<u64> {
    let scaled = weight * MILLI;
    let rounded = scaled.round();
    (rounded >= 0.0 && rounded < u64::MAX as f64 && (scaled - rounded).abs() < EPSILON * MILLI)
        .then_some(rounded as u64)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Largest weight every plate is a multiple of, in thousandths.
fn plate_grid(stack: &[Plate]) -> Option<u64> {
    stack
        .iter()
        .map(|plate| to_milli(plate.weight).filter(|w| *w > 0))
        .collect::<Option<Vec<_>>>()?
        .into_iter()
        .reduce(gcd)
        .filter(|grid| *grid > 0)
}

/// Fewest-plates exact packing via bounded coin change over the plate grid.
fn exact_packing(target: f64, stack: &[Plate]) -> Option<Vec<PlateLoad>> {
    const UNREACHABLE: u32 = u32::MAX;

    let grid = plate_grid(stack)?;
    let target = to_milli(target)?;
    if target % grid != 0 {
        return None;
    }
    if target / grid > MAX_EXACT_CELLS {
        warn!(target, grid, "exact plate search skipped, target too large");
        return None;
    }
    let cells = usize::try_from(target / grid).ok()?;
    let steps = stack
        .iter()
        .map(|plate| to_milli(plate.weight).and_then(|w| usize::try_from(w / grid).ok()))
        .collect::<Option<Vec<_>>>()?;

    // table[i][v]: fewest plates reaching v cells with the first i plates.
    let mut base = vec![UNREACHABLE; cells + 1];
    base[0] = 0;
    let mut table = vec![base];

    for (plate, &step) in stack.iter().zip(&steps) {
        let prev = table.last()?;
        let mut next = prev.clone();
        match plate.per_side {
            None => {
                for v in step..=cells {
                    let candidate = next[v - step].saturating_add(1);
                    if candidate < next[v] {
                        next[v] = candidate;
                    }
                }
            }
            Some(limit) => {
                // Split the limit into 1, 2, 4, .. chunks, each packed at most once.
                let mut left = limit;
                let mut chunk = 1;
                while left > 0 {
                    let take = chunk.min(left);
                    left -= take;
                    chunk = chunk.saturating_mul(2);
                    let Some(offset) = usize::try_from(take)
                        .ok()
                        .and_then(|take| take.checked_mul(step))
                        .filter(|offset| *offset <= cells)
                    else {
                        continue;
                    };
                    for v in (offset..=cells).rev() {
                        let candidate = next[v - offset].saturating_add(take);
                        if candidate < next[v] {
                            next[v] = candidate;
                        }
                    }
                }
            }
        }
        table.push(next);
    }

    if table.last()?[cells] == UNREACHABLE {
        return None;
    }

    let mut loads = Vec::new();
    let mut v = cells;
    for (i, (plate, &step)) in stack.iter().zip(&steps).enumerate().rev() {
        let (prev, here) = (&table[i], &table[i + 1]);
        let most = plate
            .per_side
            .and_then(|limit| usize::try_from(limit).ok())
            .map_or(v / step, |limit| limit.min(v / step));
        let count = (0..=most).find(|&k| {
            u32::try_from(k)
                .is_ok_and(|plates| prev[v - k * step].saturating_add(plates) == here[v])
        })?;
        if count > 0 {
            loads.push(PlateLoad {
                weight: plate.weight,
                count: u32::try_from(count).ok()?,
            });
            v -= count * step;
        }
    }

    loads.reverse();
    Some(loads)
}

/// Smallest symmetric change in total weight the plates allow.
#[allow(clippy::cast_precision_loss)]
fn loading_increment(stack: &[Plate]) -> Option<f64> {
    let smallest = stack.last()?.weight;
    let step = plate_grid(stack).map_or(smallest, |grid| grid as f64 / MILLI);
    Some(step * 2.0)
}

/// Achievable totals near `total_weight`, closest first, each proven by
/// running the decomposition again.
fn alternative_weights(
    total_weight: f64,
    bar_kind: BarKind,
    unit: WeightUnit,
    plates: &[Plate],
    stack: &[Plate],
    options: &CalculatorOptions,
) -> Vec<f64> {
    if !total_weight.is_finite() || options.max_alternatives == 0 {
        return Vec::new();
    }
    let bar_weight = bar_kind.weight(unit);

    let Some(increment) = loading_increment(stack) else {
        // Only the empty bar loads without plates.
        return if (total_weight - bar_weight).abs() > EPSILON {
            vec![bar_weight]
        } else {
            Vec::new()
        };
    };

    // Targets under the bar search upward from the bare bar.
    let offset = (total_weight.max(bar_weight) - bar_weight) / increment;
    let below = bar_weight + offset.floor() * increment;
    let above = bar_weight + offset.ceil() * increment;

    (0..=options.search_steps)
        .map(f64::from)
        .flat_map(|k| [below - k * increment, above + k * increment])
        .filter(|candidate| *candidate >= bar_weight - EPSILON)
        .filter(|candidate| (candidate - total_weight).abs() > EPSILON)
        .filter(|candidate| {
            let valid = decompose(*candidate, bar_kind, unit, plates, stack, options).is_valid;
            trace!(candidate, valid, "checked alternative weight");
            valid
        })
        .sorted_by(|a, b| {
            (a - total_weight)
                .abs()
                .total_cmp(&(b - total_weight).abs())
                .then_with(|| a.total_cmp(b))
        })
        .dedup_by(|a, b| (a - b).abs() < EPSILON)
        .take(options.max_alternatives)
        .collect()
}
