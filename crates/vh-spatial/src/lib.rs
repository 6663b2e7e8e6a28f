//! `vh-spatial`: the bounded simulation plane and station geometry.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! | ---------- | ------------------------------------------------------------ |
//! | [`world`]  | `World`: bounds, waypoints, agent positions (place / move)   |
//! | [`layout`] | `ring_layout`, `ring_neighbors`: station topology derivation |
//! | [`index`]  | `StationIndex`: R-tree nearest-station lookup                |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                       |
//! | ---------- | ------------------------------------------------------------ |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod index;
pub mod layout;
pub mod world;


pub use error::{SpatialError, SpatialResult};
pub use index::StationIndex;
pub use layout::{ring_layout, ring_neighbors};
pub use world::World;
