//! Visit records and their coordinates.
//!
//! A [`Coordinate`] can only be built through validation, so every
//! [`Visit`] that exists carries a routable location.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::traits::Located;

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

typed_id! {
    /// Field agent who owns visits.
    AgentId
}

typed_id! {
    /// Store-assigned visit identifier.
    VisitId
}

typed_id! {
    /// Customer a visit is made to.
    CustomerId
}

const MESSAGE_INVALID: &str = "coordinates invalid";
const MESSAGE_OUT_OF_RANGE: &str = "coordinates out of range";

/// A validated (latitude, longitude) pair in decimal degrees.
///
/// `(0.0, 0.0)` is rejected: devices report it when no fix was captured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LatLon", into = "LatLon")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LatLon {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Validates and constructs a [`Coordinate`].
    ///
    /// Non-finite values fail with [`PlannerError::InvalidArgument`];
    /// finite values outside `[-90, 90] x [-180, 180]`, or the `(0, 0)`
    /// sentinel, fail with [`PlannerError::OutOfRange`].
    pub fn new(lat: f64, lon: f64) -> Result<Self, PlannerError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(PlannerError::invalid_argument(MESSAGE_INVALID));
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(PlannerError::out_of_range(MESSAGE_OUT_OF_RANGE));
        }
        if lat == 0.0 && lon == 0.0 {
            return Err(PlannerError::out_of_range(MESSAGE_OUT_OF_RANGE));
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl TryFrom<LatLon> for Coordinate {
    type Error = PlannerError;

    fn try_from(value: LatLon) -> Result<Self, Self::Error> {
        Self::new(value.lat, value.lon)
    }
}

impl From<Coordinate> for LatLon {
    fn from(value: Coordinate) -> Self {
        Self {
            lat: value.lat,
            lon: value.lon,
        }
    }
}

impl Located for Coordinate {
    fn location(&self) -> Coordinate {
        *self
    }
}

/// A degree value as submitted by a client: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDegrees {
    Number(f64),
    Text(String),
}

impl RawDegrees {
    /// Parse to a finite number, or fail with `InvalidArgument`.
    pub fn to_degrees(&self) -> Result<f64, PlannerError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| PlannerError::invalid_argument(MESSAGE_INVALID))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PlannerError::invalid_argument(MESSAGE_INVALID))
        }
    }
}

impl From<f64> for RawDegrees {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawDegrees {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Body of a "register visit" request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitPayload {
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub address: Option<String>,
    pub lat: RawDegrees,
    pub lon: RawDegrees,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    /// URLs or paths of already-stored photos/videos.
    #[serde(default)]
    pub evidence: Vec<String>,
}

impl VisitPayload {
    /// Payload with only coordinates set.
    pub fn at(lat: impl Into<RawDegrees>, lon: impl Into<RawDegrees>) -> Self {
        Self {
            customer_id: None,
            address: None,
            lat: lat.into(),
            lon: lon.into(),
            scheduled_at: None,
            duration_minutes: None,
            notes: None,
            evidence: Vec::new(),
        }
    }
}

/// A validated visit awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVisit {
    pub agent_id: AgentId,
    pub customer_id: Option<CustomerId>,
    pub address: Option<String>,
    pub location: Coordinate,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
    pub evidence: Vec<String>,
}

impl NewVisit {
    pub fn new(agent_id: AgentId, location: Coordinate) -> Self {
        Self {
            agent_id,
            customer_id: None,
            address: None,
            location,
            scheduled_at: None,
            duration_minutes: None,
            notes: None,
            evidence: Vec::new(),
        }
    }

    /// Attach the store-assigned identifier.
    pub fn into_visit(self, id: VisitId) -> Visit {
        Visit {
            id,
            agent_id: self.agent_id,
            customer_id: self.customer_id,
            address: self.address,
            location: self.location,
            scheduled_at: self.scheduled_at,
            duration_minutes: self.duration_minutes,
            notes: self.notes,
            evidence: self.evidence,
        }
    }
}

/// A planned or completed stop owned by one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: VisitId,
    pub agent_id: AgentId,
    pub customer_id: Option<CustomerId>,
    pub address: Option<String>,
    pub location: Coordinate,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
    pub evidence: Vec<String>,
}

impl Visit {
    /// Planned dwell time, zero when not recorded.
    pub fn planned_duration_minutes(&self) -> u32 {
        self.duration_minutes.unwrap_or(0)
    }

    /// True when the visit is scheduled on `date` (UTC calendar day).
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        self.scheduled_at
            .is_some_and(|at| at.date_naive() == date)
    }
}

impl Located for Visit {
    fn location(&self) -> Coordinate {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::TimeZone;

    #[test]
    fn test_accepts_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, -74.08).is_ok());
        assert!(Coordinate::new(4.71, 0.0).is_ok());
    }

    #[test]
    fn test_rejects_sentinel_and_out_of_range() {
        for (lat, lon) in [(0.0, 0.0), (91.0, 10.0), (-90.5, 10.0), (10.0, 180.1), (10.0, -181.0)] {
            let err = Coordinate::new(lat, lon).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange, "({lat}, {lon})");
            assert_eq!(err.to_string(), "coordinates out of range");
        }
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = Coordinate::new(f64::NAN, 10.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = Coordinate::new(10.0, f64::INFINITY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_raw_degrees_parsing() {
        assert_eq!(RawDegrees::from(" 4.71 ").to_degrees(), Ok(4.71));
        assert_eq!(RawDegrees::from(-74.07).to_degrees(), Ok(-74.07));
        let err = RawDegrees::from("abc").to_degrees().unwrap_err();
        assert_eq!(err, PlannerError::InvalidArgument("coordinates invalid".into()));
        assert!(RawDegrees::from("NaN").to_degrees().is_err());
    }

    #[test]
    fn test_is_scheduled_on() {
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 23, 30, 0).unwrap();
        let mut visit = NewVisit::new(AgentId(1), Coordinate::new(4.7, -74.0).unwrap()).into_visit(VisitId(1));
        assert!(!visit.is_scheduled_on(at.date_naive()));
        visit.scheduled_at = Some(at);
        assert!(visit.is_scheduled_on(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()));
        assert!(!visit.is_scheduled_on(NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()));
    }

    #[test]
    fn test_planned_duration_defaults_to_zero() {
        let visit = NewVisit::new(AgentId(1), Coordinate::new(4.7, -74.0).unwrap()).into_visit(VisitId(9));
        assert_eq!(visit.planned_duration_minutes(), 0);
    }
}
