//! Route computation for one agent's visits.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlannerError;
use crate::haversine::Haversine;
use crate::route::Route;
use crate::schedule::ScheduleProjector;
use crate::sequencer::{RouteSequencer, SequencingStrategy};
use crate::traits::DistanceModel;
use crate::travel_time::{DEFAULT_SPEED_KMH, TravelTimeModel};
use crate::visit::Visit;

pub const ENV_AVG_SPEED_KMH: &str = "VISIT_PLANNER_AVG_SPEED_KMH";
pub const ENV_STRATEGY: &str = "VISIT_PLANNER_STRATEGY";
pub const ENV_LOCAL_SEARCH_ITERATIONS: &str = "VISIT_PLANNER_LOCAL_SEARCH_ITERATIONS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOptions {
    /// Assumed average driving speed in km/h.
    pub average_speed_kmh: f64,
    pub strategy: SequencingStrategy,
    /// Maximum improving moves for [`SequencingStrategy::TwoOpt`].
    pub local_search_iterations: usize,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_SPEED_KMH,
            strategy: SequencingStrategy::NearestNeighbor,
            local_search_iterations: 100,
        }
    }
}

impl RouteOptions {
    /// Options from `VISIT_PLANNER_*` environment variables, defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, PlannerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`RouteOptions::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        if let Some(raw) = lookup(ENV_AVG_SPEED_KMH) {
            options.average_speed_kmh = raw.trim().parse().map_err(|_| {
                PlannerError::invalid_argument(format!("{ENV_AVG_SPEED_KMH}: '{raw}' is not a number"))
            })?;
        }
        if let Some(raw) = lookup(ENV_STRATEGY) {
            options.strategy = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_LOCAL_SEARCH_ITERATIONS) {
            options.local_search_iterations = raw.trim().parse().map_err(|_| {
                PlannerError::invalid_argument(format!(
                    "{ENV_LOCAL_SEARCH_ITERATIONS}: '{raw}' is not a non-negative integer"
                ))
            })?;
        }
        Ok(options)
    }
}

/// Sequences visits and projects their schedule.
///
/// Stateless once built, so one engine can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct RouteEngine<D = Haversine> {
    sequencer: RouteSequencer<D>,
    projector: ScheduleProjector<D>,
    options: RouteOptions,
}

impl RouteEngine<Haversine> {
    /// Build a haversine-backed engine. Fails if the speed is not positive.
    pub fn new(options: RouteOptions) -> Result<Self, PlannerError> {
        Self::with_distance_model(options, Haversine)
    }
}

impl Default for RouteEngine<Haversine> {
    fn default() -> Self {
        let options = RouteOptions::default();
        Self {
            sequencer: RouteSequencer::new(Haversine, options.strategy, options.local_search_iterations),
            projector: ScheduleProjector::new(Haversine, TravelTimeModel::default()),
            options,
        }
    }
}

impl<D: DistanceModel + Clone> RouteEngine<D> {
    pub fn with_distance_model(options: RouteOptions, distance: D) -> Result<Self, PlannerError> {
        let travel = TravelTimeModel::new(options.average_speed_kmh)?;
        Ok(Self {
            sequencer: RouteSequencer::new(distance.clone(), options.strategy, options.local_search_iterations),
            projector: ScheduleProjector::new(distance, travel),
            options,
        })
    }

    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    /// Order `visits` and attach distance, travel time and ETA per stop.
    ///
    /// An empty slice yields [`Route::empty`]. The output depends only on
    /// the input order and the options.
    pub fn compute_route(&self, visits: &[Visit]) -> Route {
        if visits.is_empty() {
            debug!("no visits to route");
            return Route::empty();
        }

        let order = self.sequencer.order(visits);
        let route = self.projector.project(visits, &order);
        debug!(
            stops = route.len(),
            strategy = %self.options.strategy,
            total_distance_km = route.total_distance_km,
            total_travel_time_minutes = route.total_travel_time_minutes,
            "route computed"
        );
        route
    }
}

/// Compute a nearest-neighbor route at `average_speed_kmh`.
///
/// # Examples
///
/// ```
/// use visit_planner::{compute_route, AgentId, Coordinate, NewVisit, VisitId};
///
/// # fn main() -> Result<(), visit_planner::PlannerError> {
/// let visits = vec![
///     NewVisit::new(AgentId(1), Coordinate::new(4.7110, -74.0721)?).into_visit(VisitId(1)),
///     NewVisit::new(AgentId(1), Coordinate::new(4.6097, -74.0817)?).into_visit(VisitId(2)),
///     NewVisit::new(AgentId(1), Coordinate::new(4.72, -74.08)?).into_visit(VisitId(3)),
/// ];
/// let route = compute_route(&visits, 40.0)?;
/// assert_eq!(route.visit_ids(), vec![VisitId(1), VisitId(3), VisitId(2)]);
/// # Ok(())
/// # }
/// ```
pub fn compute_route(visits: &[Visit], average_speed_kmh: f64) -> Result<Route, PlannerError> {
    let options = RouteOptions {
        average_speed_kmh,
        ..RouteOptions::default()
    };
    Ok(RouteEngine::new(options)?.compute_route(visits))
}
