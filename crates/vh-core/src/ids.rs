//! Strongly typed, zero-cost identifier wrappers.
//!
//! Vehicles and stations live in flat arenas (`Vec`s) owned by the model.
//! Every cross-reference between them (a vehicle's serving station, a
//! station's served vehicles, a station's neighbours) is one of these
//! handles, looked up on demand.  Handles never own anything.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as an arena index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a vehicle in the vehicle arena, assigned in spawn order.
    pub struct VehicleId(u32);
}

typed_id! {
    /// Index of a VEC station in the station arena, assigned in creation order.
    pub struct StationId(u32);
}

/// Handle to any agent registered with the scheduler or placed in the world.
///
/// The simulation has exactly two kinds of agents, so dispatch is a `match`
/// on this enum rather than any form of runtime type inspection.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentRef {
    Station(StationId),
    Vehicle(VehicleId),
}

impl AgentRef {
    #[inline]
    pub fn is_station(self) -> bool {
        matches!(self, AgentRef::Station(_))
    }

    #[inline]
    pub fn is_vehicle(self) -> bool {
        matches!(self, AgentRef::Vehicle(_))
    }
}

impl From<StationId> for AgentRef {
    fn from(id: StationId) -> Self {
        AgentRef::Station(id)
    }
}

impl From<VehicleId> for AgentRef {
    fn from(id: VehicleId) -> Self {
        AgentRef::Vehicle(id)
    }
}

impl fmt::Display for AgentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentRef::Station(id) => id.fmt(f),
            AgentRef::Vehicle(id) => id.fmt(f),
        }
    }
}
