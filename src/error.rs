use rand::distributions::WeightedError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MonteCarloError {
    #[error("face {0} is not on this die")]
    InvalidLabel(String),

    #[error("invalid weight: {0}")]
    InvalidWeight(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("game has not been played yet")]
    NotPlayed,

    #[error("all weights are zero, nothing to roll")]
    ZeroTotalWeight,
}

impl From<WeightedError> for MonteCarloError {
    fn from(e: WeightedError) -> Self {
        match e {
            WeightedError::AllWeightsZero => MonteCarloError::ZeroTotalWeight,
            WeightedError::NoItem => {
                MonteCarloError::InvalidConfiguration("die has no faces".to_string())
            }
            other => MonteCarloError::InvalidWeight(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, MonteCarloError>;
