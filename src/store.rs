//! Visit persistence boundary.
//!
//! The engine never touches storage directly. Boundary operations take a
//! [`VisitStore`] and resolve the visit set before routing.

use std::collections::HashSet;
use std::sync::RwLock;

use chrono::NaiveDate;
use thiserror::Error;

use crate::visit::{AgentId, NewVisit, Visit, VisitId};

/// Failures reported by a [`VisitStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A write referenced a row that does not exist.
    #[error("foreign key violation: {0}")]
    ForeignKey(String),
    #[error("{0}")]
    Backend(String),
}

/// Read and write access to persisted visits.
///
/// Reads must observe every write that completed before they started.
pub trait VisitStore {
    fn agent_exists(&self, agent_id: AgentId) -> Result<bool, StoreError>;

    /// Visits owned by `agent_id`, restricted to those scheduled on `date`
    /// when given.
    ///
    /// Ordered by scheduled timestamp ascending, unscheduled visits last,
    /// ties by visit id.
    fn list_by_agent(&self, agent_id: AgentId, date: Option<NaiveDate>) -> Result<Vec<Visit>, StoreError>;

    /// Persist `visit` and return it with its assigned identifier.
    ///
    /// Must fail with [`StoreError::ForeignKey`] when the owning agent
    /// does not exist.
    fn insert(&self, visit: NewVisit) -> Result<Visit, StoreError>;
}

impl<S: VisitStore + ?Sized> VisitStore for &S {
    fn agent_exists(&self, agent_id: AgentId) -> Result<bool, StoreError> {
        (**self).agent_exists(agent_id)
    }

    fn list_by_agent(&self, agent_id: AgentId, date: Option<NaiveDate>) -> Result<Vec<Visit>, StoreError> {
        (**self).list_by_agent(agent_id, date)
    }

    fn insert(&self, visit: NewVisit) -> Result<Visit, StoreError> {
        (**self).insert(visit)
    }
}

/// Sort visits into the order [`VisitStore::list_by_agent`] promises.
pub fn sort_for_routing(visits: &mut [Visit]) {
    visits.sort_by(|a, b| match (a.scheduled_at, b.scheduled_at) {
        (Some(x), Some(y)) => x.cmp(&y).then(a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}

#[derive(Debug, Default)]
struct Tables {
    agents: HashSet<AgentId>,
    visits: Vec<Visit>,
    last_id: u64,
}

/// In-memory [`VisitStore`].
///
/// Registered agents act as the foreign-key table for inserts. Ids are
/// assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct MemoryVisitStore {
    tables: RwLock<Tables>,
}

impl MemoryVisitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the given agents registered.
    pub fn with_agents<I>(agents: I) -> Self
    where
        I: IntoIterator<Item = AgentId>,
    {
        let tables = Tables {
            agents: agents.into_iter().collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub fn add_agent(&self, agent_id: AgentId) -> Result<(), StoreError> {
        self.write()?.agents.insert(agent_id);
        Ok(())
    }

    /// Bulk-load visits, as a seed script would. Stops at the first
    /// rejected row; rows before it stay inserted.
    pub fn seed<I>(&self, visits: I) -> Result<Vec<Visit>, StoreError>
    where
        I: IntoIterator<Item = NewVisit>,
    {
        visits.into_iter().map(|visit| self.insert(visit)).collect()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.visits.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Backend("visit store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Backend("visit store lock poisoned".to_string()))
    }
}

impl VisitStore for MemoryVisitStore {
    fn agent_exists(&self, agent_id: AgentId) -> Result<bool, StoreError> {
        Ok(self.read()?.agents.contains(&agent_id))
    }

    fn list_by_agent(&self, agent_id: AgentId, date: Option<NaiveDate>) -> Result<Vec<Visit>, StoreError> {
        let tables = self.read()?;
        let mut visits: Vec<Visit> = tables
            .visits
            .iter()
            .filter(|visit| visit.agent_id == agent_id)
            .filter(|visit| date.is_none_or(|day| visit.is_scheduled_on(day)))
            .cloned()
            .collect();
        sort_for_routing(&mut visits);
        Ok(visits)
    }

    fn insert(&self, visit: NewVisit) -> Result<Visit, StoreError> {
        let mut tables = self.write()?;
        if !tables.agents.contains(&visit.agent_id) {
            return Err(StoreError::ForeignKey(format!(
                "agent {} does not exist",
                visit.agent_id
            )));
        }
        tables.last_id += 1;
        let stored = visit.into_visit(VisitId(tables.last_id));
        tables.visits.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::Coordinate;
    use chrono::{TimeZone, Utc};

    fn new_visit(agent: u64, lat: f64, lon: f64) -> NewVisit {
        NewVisit::new(AgentId(agent), Coordinate::new(lat, lon).unwrap())
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = MemoryVisitStore::with_agents([AgentId(1)]);
        let a = store.insert(new_visit(1, 4.7, -74.0)).unwrap();
        let b = store.insert(new_visit(1, 4.8, -74.1)).unwrap();
        assert_eq!(a.id, VisitId(1));
        assert_eq!(b.id, VisitId(2));
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_insert_unknown_agent_is_foreign_key_violation() {
        let store = MemoryVisitStore::with_agents([AgentId(1)]);
        let err = store.insert(new_visit(2, 4.7, -74.0)).unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_list_filters_by_agent_and_date() {
        let store = MemoryVisitStore::with_agents([AgentId(1), AgentId(2)]);
        let monday = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let tuesday = Utc.with_ymd_and_hms(2026, 3, 3, 9, 0, 0).unwrap();

        let mut on_monday = new_visit(1, 4.7, -74.0);
        on_monday.scheduled_at = Some(monday);
        let mut on_tuesday = new_visit(1, 4.8, -74.0);
        on_tuesday.scheduled_at = Some(tuesday);
        let unscheduled = new_visit(1, 4.9, -74.0);
        let other_agent = new_visit(2, 4.6, -74.0);
        store.seed([on_monday, on_tuesday, unscheduled, other_agent]).unwrap();

        assert_eq!(store.list_by_agent(AgentId(1), None).unwrap().len(), 3);
        let monday_only = store
            .list_by_agent(AgentId(1), Some(monday.date_naive()))
            .unwrap();
        assert_eq!(monday_only.len(), 1);
        assert_eq!(monday_only[0].scheduled_at, Some(monday));
    }

    #[test]
    fn test_list_orders_by_schedule_then_id() {
        let store = MemoryVisitStore::with_agents([AgentId(1)]);
        let early = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 3, 2, 15, 0, 0).unwrap();

        let first_unscheduled = new_visit(1, 4.9, -74.0);
        let mut late_visit = new_visit(1, 4.8, -74.0);
        late_visit.scheduled_at = Some(late);
        let mut early_visit = new_visit(1, 4.7, -74.0);
        early_visit.scheduled_at = Some(early);
        let second_unscheduled = new_visit(1, 4.6, -74.0);
        store
            .seed([first_unscheduled, late_visit, early_visit, second_unscheduled])
            .unwrap();

        let ids: Vec<_> = store
            .list_by_agent(AgentId(1), None)
            .unwrap()
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![VisitId(3), VisitId(2), VisitId(1), VisitId(4)]);
    }

    #[test]
    fn test_agent_registration() {
        let store = MemoryVisitStore::new();
        assert!(!store.agent_exists(AgentId(5)).unwrap());
        store.add_agent(AgentId(5)).unwrap();
        assert!(store.agent_exists(AgentId(5)).unwrap());
    }
}
