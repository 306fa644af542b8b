use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use plate_calc::{
    bar::Bar,
    bar_kind::BarKind,
    calculator::{CalculatorOptions, calculate_plates_with, is_achievable},
    gym::{self, GymConfiguration},
    progression::weight_progressions,
    requirement::Requirement,
    unit::{WeightUnit, convert_weight, format_weight},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plate-calc", about = "Barbell plate loading calculator")]
struct Args {
    /// Log decomposition details.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file with extra gym configurations.
    #[arg(long, global = true, env = "PLATE_CALC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plates per side for a target weight.
    Load {
        #[arg(value_parser = clap::value_parser!(Requirement))]
        weight: Requirement,
        #[arg(long, default_value = "olympic", value_parser = clap::value_parser!(BarKind))]
        bar: BarKind,
        /// Gym configuration name (defaults to the first built-in set for the unit).
        #[arg(long)]
        gym: Option<String>,
        /// Alternatives to suggest when the weight cannot be loaded.
        #[arg(long, default_value_t = 4)]
        alternatives: usize,
        /// Skip the exact search when greedy packing misses.
        #[arg(long)]
        greedy_only: bool,
        #[arg(long)]
        json: bool,
    },
    /// Convert a weight to another unit.
    Convert {
        #[arg(value_parser = clap::value_parser!(Requirement))]
        weight: Requirement,
        #[arg(value_parser = clap::value_parser!(WeightUnit))]
        to: WeightUnit,
    },
    /// Training weights around a current weight.
    Progressions {
        #[arg(value_parser = clap::value_parser!(Requirement))]
        weight: Requirement,
        /// Only show weights the gym can load.
        #[arg(long)]
        loadable: bool,
        #[arg(long, default_value = "olympic", value_parser = clap::value_parser!(BarKind))]
        bar: BarKind,
        #[arg(long)]
        gym: Option<String>,
    },
    /// List available gym configurations.
    Gyms,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn configurations(config: Option<&PathBuf>) -> anyhow::Result<Vec<GymConfiguration>> {
    let mut gyms = gym::standard_configurations().to_vec();
    if let Some(path) = config {
        gyms.extend(gym::load_configurations(path)?);
    }
    Ok(gyms)
}

fn select_gym<'a>(
    gyms: &'a [GymConfiguration],
    name: Option<&str>,
    unit: WeightUnit,
) -> anyhow::Result<&'a GymConfiguration> {
    match name {
        Some(name) => gym::find_in(gyms, name)
            .ok_or_else(|| plate_calc::gym_error::GymError::UnknownConfiguration(name.to_string()))
            .context("Pick one listed by `plate-calc gyms`"),
        None => gym::default_configuration(unit)
            .with_context(|| format!("No gym configuration in {unit}")),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let gyms = configurations(args.config.as_ref())?;

    match args.command {
        Command::Load {
            weight,
            bar,
            gym,
            alternatives,
            greedy_only,
            json,
        } => {
            let selected = select_gym(&gyms, gym.as_deref(), weight.unit_or(WeightUnit::Kg))?;
            let unit = weight.unit_or(selected.unit());
            if unit != selected.unit() {
                bail!(
                    "{} is in {unit} but '{}' is in {}",
                    weight,
                    selected.name(),
                    selected.unit()
                );
            }
            debug!(gym = selected.name(), %weight, %bar, "loading bar");

            let options = CalculatorOptions {
                max_alternatives: alternatives,
                exact_fallback: !greedy_only,
                ..CalculatorOptions::default()
            };
            let result =
                calculate_plates_with(weight.weight, bar, unit, selected.plates(), &options);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if result.is_valid {
                println!("{result}");
            } else {
                if let Some(error) = &result.error {
                    println!("{error}");
                }
                if !result.plates_per_side.is_empty() {
                    println!("Closest: {result}");
                }
                if !result.alternative_weights.is_empty() {
                    println!(
                        "Try: {}",
                        result
                            .alternative_weights
                            .iter()
                            .map(|w| format_weight(*w, unit))
                            .join(", ")
                    );
                }
            }
        }
        Command::Convert { weight, to } => {
            let from = weight.unit_or(WeightUnit::Kg);
            let converted = convert_weight(weight.weight, from, to);
            println!("{} = {}", format_weight(weight.weight, from), format_weight(converted, to));
        }
        Command::Progressions {
            weight,
            loadable,
            bar,
            gym,
        } => {
            let unit = weight.unit_or(WeightUnit::Kg);
            let steps = weight_progressions(weight.weight, unit);
            let steps = if loadable {
                let selected = select_gym(&gyms, gym.as_deref(), unit)?;
                let plates = selected.in_unit(unit);
                println!("{} on {}", Bar::new(bar, unit), selected.name());
                steps
                    .filter(|w| is_achievable(*w, bar, unit, plates.plates()))
                    .collect::<Vec<_>>()
            } else {
                steps.collect::<Vec<_>>()
            };
            println!("{}", steps.iter().map(|w| format_weight(*w, unit)).join(", "));
        }
        Command::Gyms => {
            for gym in &gyms {
                println!("{gym}");
            }
        }
    }

    Ok(())
}
