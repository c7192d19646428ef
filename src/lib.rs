//! visit-planner
//!
//! Single-agent visit routing: orders one field agent's visits with a
//! nearest-neighbor heuristic over great-circle distances and chains
//! estimated arrival times from the first known schedule.

pub mod engine;
pub mod error;
pub mod haversine;
pub mod intake;
pub mod planner;
pub mod route;
pub mod schedule;
pub mod sequencer;
pub mod store;
pub mod traits;
pub mod travel_time;
pub mod visit;

pub use engine::{RouteEngine, RouteOptions, compute_route};
pub use error::{ErrorKind, PlannerError};
pub use haversine::{Haversine, haversine_km};
pub use intake::register_visit;
pub use planner::{AgentRoute, RoutePlanner};
pub use route::{Route, RouteStop};
pub use sequencer::{SequencingStrategy, nearest_neighbor_order};
pub use store::{MemoryVisitStore, StoreError, VisitStore};
pub use traits::{DistanceModel, Located};
pub use travel_time::{TravelTimeModel, estimate_travel_minutes};
pub use visit::{AgentId, Coordinate, CustomerId, NewVisit, RawDegrees, Visit, VisitId, VisitPayload};
