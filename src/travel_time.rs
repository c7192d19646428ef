//! Distance to travel-time conversion at an assumed average speed.

use crate::error::PlannerError;

/// Average driving speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Converts kilometers into whole travel minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelTimeModel {
    speed_kmh: f64,
}

impl Default for TravelTimeModel {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl TravelTimeModel {
    /// Fails with `InvalidArgument` unless `speed_kmh` is finite and positive.
    pub fn new(speed_kmh: f64) -> Result<Self, PlannerError> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(PlannerError::invalid_argument(format!(
                "average speed must be positive, got {speed_kmh} km/h"
            )));
        }
        Ok(Self { speed_kmh })
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Travel minutes for `distance_km`, rounded to the nearest minute.
    ///
    /// Any positive distance takes at least one minute; zero (or negative)
    /// distance takes none.
    pub fn minutes_for(&self, distance_km: f64) -> u32 {
        if distance_km <= 0.0 {
            return 0;
        }
        let minutes = (distance_km / self.speed_kmh * 60.0).round();
        // Saturating float-to-int cast; a day's hops never come close.
        (minutes as u32).max(1)
    }
}

/// One-shot form of [`TravelTimeModel::minutes_for`].
///
/// # Examples
///
/// ```
/// use visit_planner::{estimate_travel_minutes, ErrorKind};
///
/// assert_eq!(estimate_travel_minutes(10.0, 40.0), Ok(15));
/// assert_eq!(estimate_travel_minutes(0.2, 40.0), Ok(1));
/// assert_eq!(estimate_travel_minutes(0.0, 40.0), Ok(0));
/// assert_eq!(estimate_travel_minutes(10.0, 0.0).unwrap_err().kind(), ErrorKind::InvalidArgument);
/// ```
pub fn estimate_travel_minutes(distance_km: f64, speed_kmh: f64) -> Result<u32, PlannerError> {
    Ok(TravelTimeModel::new(speed_kmh)?.minutes_for(distance_km))
}
