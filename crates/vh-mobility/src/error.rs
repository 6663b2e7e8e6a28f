use thiserror::Error;

use vh_core::VehicleId;
use vh_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum MobilityError {
    /// Simulated time and trace time have drifted apart.  Fatal for the
    /// vehicle's replay: samples are never skipped silently.
    #[error("{vehicle} trace desynchronized: expected a sample at t={expected}, found {found:?}")]
    Desync {
        vehicle:  VehicleId,
        expected: i64,
        found:    Option<i64>,
    },

    #[error("vehicle {0} not found")]
    NotFound(VehicleId),

    #[error("placement failed: {0}")]
    Spatial(#[from] SpatialError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
