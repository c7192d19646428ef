//! Core seams for the route engine.
//!
//! Sequencing only needs positions, and distances come from a pluggable
//! model so tests (or a future road-network provider) can swap it out.

use crate::visit::Coordinate;

/// Anything with a validated position.
pub trait Located {
    fn location(&self) -> Coordinate;
}

impl<T: Located + ?Sized> Located for &T {
    fn location(&self) -> Coordinate {
        (**self).location()
    }
}

/// Distance between two positions, in kilometers.
///
/// Implementations must be symmetric and return `0.0` for identical
/// positions; the sequencer and the 2-opt pass rely on both.
pub trait DistanceModel {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64;
}

impl<D: DistanceModel + ?Sized> DistanceModel for &D {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64 {
        (**self).distance_km(from, to)
    }
}
