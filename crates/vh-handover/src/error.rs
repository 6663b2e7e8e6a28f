use thiserror::Error;

use vh_core::{StationId, VehicleId};

#[derive(Debug, Error)]
pub enum HandoverError {
    #[error("unknown station {0}")]
    UnknownStation(StationId),

    #[error("{vehicle} is not served by {station}")]
    NotServed { station: StationId, vehicle: VehicleId },

    #[error("{vehicle} is already served by {station}")]
    AlreadyServed { station: StationId, vehicle: VehicleId },

    #[error("{vehicle} cannot be handed over from {station} to itself")]
    SelfTransfer { station: StationId, vehicle: VehicleId },

    #[error("station configuration error: {0}")]
    Config(String),
}

pub type HandoverResult<T> = Result<T, HandoverError>;
