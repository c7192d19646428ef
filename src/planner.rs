//! Boundary operations: route lookup and visit registration for agents.
//!
//! This is the surface a transport layer (HTTP, RPC, CLI) wraps. It owns
//! the store lookups so the engine stays pure.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::engine::{RouteEngine, RouteOptions};
use crate::error::PlannerError;
use crate::intake;
use crate::route::Route;
use crate::store::VisitStore;
use crate::visit::{AgentId, Visit, VisitPayload};

pub const NO_VISITS_ON_DATE: &str = "no visits scheduled for this date";
pub const NO_VISITS_FOR_AGENT: &str = "no visits registered for this agent";

/// Route response for one agent.
///
/// `message` is set only when the agent had nothing to visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRoute {
    pub agent_id: AgentId,
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub route: Route,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AgentRoute {
    /// True when no visits were found, as opposed to a computed route.
    pub fn has_no_visits(&self) -> bool {
        self.message.is_some()
    }
}

/// Route engine bound to a visit store.
#[derive(Debug)]
pub struct RoutePlanner<S> {
    store: S,
    engine: RouteEngine,
}

impl<S: VisitStore> RoutePlanner<S> {
    pub fn new(store: S, options: RouteOptions) -> Result<Self, PlannerError> {
        Ok(Self {
            store,
            engine: RouteEngine::new(options)?,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn engine(&self) -> &RouteEngine {
        &self.engine
    }

    /// Route the agent's visits, all of them or only those on `date`.
    ///
    /// Unknown agents are rejected with `AgentNotFound` before routing.
    #[instrument(skip(self), fields(agent = %agent_id))]
    pub fn route_for_agent(&self, agent_id: AgentId, date: Option<NaiveDate>) -> Result<AgentRoute, PlannerError> {
        if !self.store.agent_exists(agent_id)? {
            return Err(PlannerError::AgentNotFound(agent_id));
        }

        let visits = self.store.list_by_agent(agent_id, date)?;
        if visits.is_empty() {
            info!("no visits to route");
            let message = match date {
                Some(_) => NO_VISITS_ON_DATE,
                None => NO_VISITS_FOR_AGENT,
            };
            return Ok(AgentRoute {
                agent_id,
                date,
                route: Route::empty(),
                message: Some(message.to_string()),
            });
        }

        let route = self.engine.compute_route(&visits);
        info!(
            stops = route.len(),
            total_distance_km = route.total_distance_km,
            total_travel_time_minutes = route.total_travel_time_minutes,
            "route computed"
        );
        Ok(AgentRoute {
            agent_id,
            date,
            route,
            message: None,
        })
    }

    #[instrument(skip(self, payload), fields(agent = %agent_id))]
    pub fn register_visit(&self, agent_id: AgentId, payload: VisitPayload) -> Result<Visit, PlannerError> {
        intake::register_visit(&self.store, agent_id, payload)
    }
}

impl<S: VisitStore + Sync> RoutePlanner<S> {
    /// Route several agents in parallel. Results keep the input order and
    /// one agent's failure does not affect the others.
    pub fn routes_for_agents(
        &self,
        agents: &[AgentId],
        date: Option<NaiveDate>,
    ) -> Vec<(AgentId, Result<AgentRoute, PlannerError>)> {
        agents
            .par_iter()
            .map(|&agent_id| (agent_id, self.route_for_agent(agent_id, date)))
            .collect()
    }
}
