//! Computed routes.
//!
//! Routes are ephemeral: built per request, never persisted or shared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::visit::{Visit, VisitId};

/// One visit placed in a computed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub visit: Visit,
    /// 1-based position in the route.
    pub sequence: usize,
    /// Kilometers from the previous stop, rounded to metres. 0 for the first stop.
    pub distance_from_prev_km: f64,
    /// Whole minutes from the previous stop. 0 for the first stop.
    pub travel_time_minutes: u32,
    pub estimated_arrival: Option<DateTime<Utc>>,
    /// Arrival plus this stop's planned duration.
    pub estimated_departure: Option<DateTime<Utc>>,
}

/// An ordered route with aggregate distance and travel time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub total_distance_km: f64,
    pub total_travel_time_minutes: u32,
    pub stops: Vec<RouteStop>,
}

impl Route {
    /// A route with no stops and zero totals.
    pub fn empty() -> Self {
        Self {
            total_distance_km: 0.0,
            total_travel_time_minutes: 0,
            stops: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Visit identifiers in route order.
    pub fn visit_ids(&self) -> Vec<VisitId> {
        self.stops.iter().map(|stop| stop.visit.id).collect()
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::empty()
    }
}
