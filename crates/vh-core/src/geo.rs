//! Planar coordinates, headings, and the directional test used by handover.
//!
//! The world is a flat metric plane, so everything here is `f64` Euclidean
//! geometry.  Headings follow the mathematical convention: 0° points along
//! +x and angles increase counter-clockwise.

use std::fmt;

/// Dot products smaller than this fraction of the target distance count as
/// zero.  Absorbs the `cos(90°) ≈ 6e-17` residue so exact right angles are
/// never "toward".
const PERPENDICULAR_TOLERANCE: f64 = 1e-9;

/// A position in the simulation plane, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Squared Euclidean distance.  Cheaper than [`distance`](Self::distance)
    /// when only ordering matters.
    #[inline]
    pub fn distance_2(self, other: Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// `true` if both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Heading ───────────────────────────────────────────────────────────────────

/// Direction of travel in degrees (0° = +x, counter-clockwise positive).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading(pub f64);

impl Heading {
    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Unit vector `(cos θ, sin θ)` pointing along the heading.
    #[inline]
    pub fn unit_vector(self) -> (f64, f64) {
        let rad = self.0.to_radians();
        (rad.cos(), rad.sin())
    }

    /// Heading of the segment from `from` to `to`, normalised to `[0, 360)`.
    pub fn between(from: Point2, to: Point2) -> Heading {
        let deg = (to.y - from.y).atan2(to.x - from.x).to_degrees();
        Heading(deg.rem_euclid(360.0))
    }

    /// Convert a navigational angle (0° = north, clockwise positive), as
    /// exported by SUMO and most GPS loggers, to the math convention.
    pub fn from_compass(degrees: f64) -> Heading {
        Heading((90.0 - degrees).rem_euclid(360.0))
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// Is an object at `pos` travelling along `heading` closing in on `target`?
///
/// True iff the dot product of the heading's unit vector and the vector from
/// `pos` to `target` is strictly positive.  Perpendicular motion and an
/// object sitting exactly on `target` are not "toward".
pub fn moving_toward(pos: Point2, heading: Heading, target: Point2) -> bool {
    let (ux, uy) = heading.unit_vector();
    let tx = target.x - pos.x;
    let ty = target.y - pos.y;
    let dot = ux * tx + uy * ty;
    dot > PERPENDICULAR_TOLERANCE * tx.hypot(ty)
}
