use thiserror::Error;

use vh_core::CoreError;
use vh_handover::HandoverError;
use vh_mobility::MobilityError;
use vh_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("spatial error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("vehicle error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("handover error: {0}")]
    Handover(#[from] HandoverError),

    /// A served-set invariant failed.  Always a defect, never a runtime
    /// condition to recover from.
    #[error("inconsistent model state: {0}")]
    Inconsistent(String),
}

pub type SimResult<T> = Result<T, SimError>;
