//! Registration of newly reported visits.

use tracing::{info, warn};

use crate::error::PlannerError;
use crate::store::VisitStore;
use crate::visit::{AgentId, Coordinate, NewVisit, Visit, VisitPayload};

/// Validate `payload` into a [`NewVisit`] owned by `agent_id`.
///
/// Non-numeric coordinates fail with `InvalidArgument`; out-of-range
/// coordinates and the `(0, 0)` sentinel fail with `OutOfRange`.
pub fn validate_payload(agent_id: AgentId, payload: VisitPayload) -> Result<NewVisit, PlannerError> {
    let lat = payload.lat.to_degrees()?;
    let lon = payload.lon.to_degrees()?;
    let location = Coordinate::new(lat, lon)?;

    Ok(NewVisit {
        agent_id,
        customer_id: payload.customer_id,
        address: payload.address,
        location,
        scheduled_at: payload.scheduled_at,
        duration_minutes: payload.duration_minutes,
        notes: payload.notes,
        evidence: payload.evidence,
    })
}

/// Validate and persist a visit for `agent_id`.
///
/// Referential failures from the store come back as
/// [`PlannerError::IntegrityViolation`].
pub fn register_visit<S>(store: &S, agent_id: AgentId, payload: VisitPayload) -> Result<Visit, PlannerError>
where
    S: VisitStore + ?Sized,
{
    let new_visit = validate_payload(agent_id, payload).inspect_err(|err| {
        warn!(agent = %agent_id, error = %err, "rejected visit payload");
    })?;

    let visit = store.insert(new_visit).map_err(PlannerError::from).inspect_err(|err| {
        warn!(agent = %agent_id, error = %err, "visit store refused insert");
    })?;

    info!(agent = %agent_id, visit = %visit.id, "visit registered");
    Ok(visit)
}
