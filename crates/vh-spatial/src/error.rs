//! Spatial-subsystem error type.

use thiserror::Error;

use vh_core::{AgentRef, Point2};

/// Errors produced by `vh-spatial`.
///
/// `OutOfBounds` signals a defect in the input data or the caller, not a
/// condition to recover from: well-formed traces never leave the world.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("{agent} position {pos} lies outside the {width}x{height} world")]
    OutOfBounds {
        agent:  AgentRef,
        pos:    Point2,
        width:  f64,
        height: f64,
    },

    #[error("waypoint {pos} lies outside the {width}x{height} world")]
    WaypointOutOfBounds {
        pos:    Point2,
        width:  f64,
        height: f64,
    },

    #[error("{0} has not been placed in the world")]
    NotPlaced(AgentRef),

    #[error("invalid world dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
