use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GymError {
    #[error("Unknown bar kind '{0}' (expected olympic, standard, ez or hex).")]
    UnknownBarKind(String),
    #[error("Unknown unit '{0}' (expected kg or lb).")]
    UnknownUnit(String),
    #[error("Invalid weight '{0}'.")]
    InvalidRequirement(String),
    #[error("Gym configuration '{0}' has no plates.")]
    EmptyConfiguration(String),
    #[error("Gym configuration '{name}' has an invalid plate weight {weight}.")]
    InvalidPlateWeight { name: String, weight: f64 },
    #[error("Gym configuration '{name}' lists the {weight} plate more than once.")]
    DuplicatePlate { name: String, weight: f64 },
    #[error("No gym configuration named '{0}'.")]
    UnknownConfiguration(String),
}
