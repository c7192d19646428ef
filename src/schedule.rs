//! Distance, travel time and ETA for an already-ordered route.
//!
//! Walks the stops in order. The clock starts at the first scheduled
//! timestamp met along the way and only moves forward from there:
//!
//! `arrival(k) = arrival(k-1) + planned_duration(k-1) + travel(k-1 -> k)`
//!
//! Stops before the anchor keep no ETA. A chain that runs past the
//! representable date range stops there and later stops get no ETA.

use chrono::{DateTime, TimeDelta, Utc};

use crate::route::{Route, RouteStop};
use crate::traits::DistanceModel;
use crate::travel_time::TravelTimeModel;
use crate::visit::Visit;

/// Projects arrival and departure times over a visiting order.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleProjector<D> {
    distance: D,
    travel: TravelTimeModel,
}

impl<D: DistanceModel> ScheduleProjector<D> {
    pub fn new(distance: D, travel: TravelTimeModel) -> Self {
        Self { distance, travel }
    }

    /// Build the route for `visits` taken in `order`, which must be a
    /// permutation of the indices of `visits`.
    pub fn project(&self, visits: &[Visit], order: &[usize]) -> Route {
        debug_assert!(is_permutation(order, visits.len()), "order is not a permutation");

        let mut stops: Vec<RouteStop> = Vec::with_capacity(order.len());
        let mut clock: Option<DateTime<Utc>> = None;
        let mut overflowed = false;
        let mut previous: Option<&Visit> = None;
        let mut total_distance_km = 0.0;
        let mut total_travel_time_minutes = 0;

        for visit in order.iter().filter_map(|&idx| visits.get(idx)) {
            let (distance_km, travel_minutes) = match previous {
                None => (0.0, 0),
                Some(prev) => {
                    let raw_km = self.distance.distance_km(prev.location, visit.location);
                    (raw_km, self.travel.minutes_for(raw_km))
                }
            };

            let arrival = match (clock, previous) {
                _ if overflowed => None,
                (Some(now), Some(prev)) => {
                    let elapsed = i64::from(prev.planned_duration_minutes()) + i64::from(travel_minutes);
                    let next = now.checked_add_signed(TimeDelta::minutes(elapsed));
                    overflowed = next.is_none();
                    next
                }
                // No running clock yet: this stop's own schedule anchors it.
                _ => visit.scheduled_at,
            };
            clock = arrival;

            let departure = arrival.and_then(|at| {
                at.checked_add_signed(TimeDelta::minutes(i64::from(visit.planned_duration_minutes())))
            });
            let leg_km = round_km(distance_km);
            total_distance_km += leg_km;
            total_travel_time_minutes += travel_minutes;

            stops.push(RouteStop {
                visit: visit.clone(),
                sequence: stops.len() + 1,
                distance_from_prev_km: leg_km,
                travel_time_minutes: travel_minutes,
                estimated_arrival: arrival,
                estimated_departure: departure,
            });
            previous = Some(visit);
        }

        Route {
            total_distance_km: round_km(total_distance_km),
            total_travel_time_minutes,
            stops,
        }
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    let mut seen = vec![false; len];
    order.len() == len && order.iter().all(|&idx| idx < len && !std::mem::replace(&mut seen[idx], true))
}

/// Round to metre precision.
pub(crate) fn round_km(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}
