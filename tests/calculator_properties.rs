use plate_calc::{
    bar_kind::BarKind,
    calculate_plates, convert_weight, format_weight,
    calculation::CalculationError,
    gym::{GymConfiguration, find_configuration},
    plate::side_weight,
    standard_configurations,
    unit::WeightUnit,
    weight_progressions,
};

const TOLERANCE: f64 = 1e-6;

/// Targets from just under the bar up past a heavy lift, in the set's
/// smallest increment and a deliberately awkward one.
fn targets(gym: &GymConfiguration, bar: BarKind) -> Vec<f64> {
    let bar_weight = bar.weight(gym.unit());
    (0..160)
        .flat_map(|i| {
            let i = f64::from(i);
            [bar_weight + i * 1.25, bar_weight + i * 1.7 - 1.0]
        })
        .collect()
}

#[test]
fn valid_results_load_exactly_the_target() {
    for gym in standard_configurations() {
        for bar in BarKind::ALL {
            for target in targets(gym, bar) {
                let result = gym.calculate(target, bar);
                if result.is_valid {
                    let loaded = result.bar_weight + 2.0 * side_weight(&result.plates_per_side);
                    assert!(
                        (loaded - target).abs() < TOLERANCE,
                        "{}: {target} loaded as {loaded}",
                        gym.name()
                    );
                    assert!(result.error.is_none());
                    assert!(result.total_plates_per_side >= 0.0);
                } else {
                    assert!(
                        result.error.is_some(),
                        "{}: {target} invalid without error",
                        gym.name()
                    );
                }
            }
        }
    }
}

#[test]
fn plate_counts_are_positive() {
    for gym in standard_configurations() {
        for target in targets(gym, BarKind::Olympic) {
            let result = gym.calculate(target, BarKind::Olympic);
            assert!(result.plates_per_side.iter().all(|load| load.count > 0));
        }
    }
}

#[test]
fn alternatives_pass_the_same_check() {
    for gym in standard_configurations() {
        for bar in BarKind::ALL {
            for target in targets(gym, bar) {
                let result = gym.calculate(target, bar);
                for alternative in &result.alternative_weights {
                    assert!(
                        gym.calculate(*alternative, bar).is_valid,
                        "{}: alternative {alternative} for {target} is not loadable",
                        gym.name()
                    );
                }
                let sorted = result
                    .alternative_weights
                    .iter()
                    .map(|w| (w - target).abs())
                    .try_fold(0.0_f64, |last, d| (d + TOLERANCE >= last).then_some(d));
                assert!(sorted.is_some(), "alternatives for {target} not sorted by distance");
            }
        }
    }
}

#[test]
fn below_bar_is_rejected_for_every_bar() {
    for gym in standard_configurations() {
        for bar in BarKind::ALL {
            let bar_weight = bar.weight(gym.unit());
            let result = gym.calculate(bar_weight - 1.0, bar);
            assert!(!result.is_valid);
            let error = result.error.expect("below-bar error");
            assert!(matches!(error, CalculationError::BelowBar { .. }));
            assert!(!error.to_string().is_empty());
        }
    }
}

#[test]
fn repeated_calls_agree() {
    let gym = find_configuration("Competition (kg)").unwrap();
    for target in [20.0, 21.0, 57.5, 101.0, 182.5] {
        assert_eq!(
            gym.calculate(target, BarKind::Olympic),
            gym.calculate(target, BarKind::Olympic)
        );
    }
}

#[test]
fn listed_scenarios() {
    let plates = find_configuration("Home Gym (kg)").unwrap().plates();

    let result = calculate_plates(100.0, BarKind::Olympic, WeightUnit::Kg, plates);
    assert!(result.is_valid);
    assert_eq!(result.total_plates_per_side, 40.0);
    assert_eq!(result.plate_count(), 2);

    let result = calculate_plates(21.0, BarKind::Olympic, WeightUnit::Kg, plates);
    assert!(!result.is_valid);
    assert!(result.alternative_weights.contains(&20.0));
    assert!(result.alternative_weights.contains(&22.5));

    let result = calculate_plates(20.0, BarKind::Olympic, WeightUnit::Kg, plates);
    assert!(result.is_valid);
    assert!(result.plates_per_side.is_empty());

    assert!((convert_weight(100.0, WeightUnit::Kg, WeightUnit::Lb) - 220.462).abs() < 1e-3);
    assert_eq!(format_weight(100.0, WeightUnit::Kg), "100 kg");
    assert_eq!(format_weight(22.5, WeightUnit::Kg), "22.5 kg");

    let steps = weight_progressions(100.0, WeightUnit::Kg).collect::<Vec<_>>();
    assert!(steps.contains(&95.0) && steps.contains(&97.5) && steps.contains(&100.0));
    assert!(steps.contains(&102.5) && steps.contains(&105.0));
    assert!(steps.windows(2).all(|pair| (pair[1] - pair[0] - 2.5).abs() < TOLERANCE));
}

#[test]
fn converted_gym_loads_converted_targets() {
    let kg = find_configuration("Standard Olympic (kg)").unwrap();
    let lb = kg.in_unit(WeightUnit::Lb);
    // Bars keep their own pound weight; only the plates convert.
    let per_side = convert_weight(40.0, WeightUnit::Kg, WeightUnit::Lb);
    let result = lb.calculate(45.0 + 2.0 * per_side, BarKind::Olympic);
    assert!(result.is_valid);
    assert_eq!(result.plate_count(), 2);
}
