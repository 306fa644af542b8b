#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bar;
pub mod bar_kind;
pub mod calculation;
pub mod calculator;
pub mod gym;
pub mod gym_error;
pub mod plate;
pub mod progression;
pub mod requirement;
pub mod unit;

pub use calculator::{calculate_plates, calculate_plates_with, is_achievable};
pub use gym::standard_configurations;
pub use progression::weight_progressions;
pub use unit::{convert_weight, format_weight};
