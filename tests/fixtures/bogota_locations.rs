//! Real Bogotá locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap, rounded to four decimals.

use chrono::{DateTime, TimeZone, Utc};

use visit_planner::{AgentId, Coordinate, NewVisit, Visit, VisitId, VisitPayload};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon).unwrap()
    }

    pub fn payload(&self) -> VisitPayload {
        VisitPayload {
            address: Some(self.name.to_string()),
            ..VisitPayload::at(self.lat, self.lon)
        }
    }
}

// ============================================================================
// Pharmacies and clinics on a typical sales day
// ============================================================================

pub const NORTH: &[Location] = &[
    Location::new("Clínica del Country", 4.6682, -74.0567),
    Location::new("Parque de la 93", 4.6767, -74.0483),
    Location::new("Centro Comercial Andino", 4.6668, -74.0530),
    Location::new("Unicentro", 4.7020, -74.0416),
    Location::new("Usaquén", 4.6950, -74.0305),
    Location::new("Fundación Santa Fe", 4.6946, -74.0327),
];

pub const CENTER: &[Location] = &[
    Location::new("Plaza de Bolívar", 4.5981, -74.0760),
    Location::new("Museo del Oro", 4.6018, -74.0721),
    Location::new("Hospital San Ignacio", 4.6281, -74.0646),
    Location::new("Universidad Nacional", 4.6381, -74.0840),
];

pub const WEST: &[Location] = &[
    Location::new("Parque Simón Bolívar", 4.6584, -74.0939),
    Location::new("Salitre Plaza", 4.6527, -74.1097),
    Location::new("Aeropuerto El Dorado", 4.7016, -74.1469),
];

/// All fixture locations, north first.
pub fn all_locations() -> Vec<Location> {
    NORTH.iter().chain(CENTER).chain(WEST).cloned().collect()
}

// ============================================================================
// Visit builders
// ============================================================================

pub const AGENT: AgentId = AgentId(1);

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
}

pub fn visit(id: u64, lat: f64, lon: f64) -> Visit {
    NewVisit::new(AGENT, Coordinate::new(lat, lon).unwrap()).into_visit(VisitId(id))
}

pub fn visit_at(id: u64, location: &Location) -> Visit {
    let mut visit = visit(id, location.lat, location.lon);
    visit.address = Some(location.name.to_string());
    visit
}

pub fn visits_for(locations: &[Location]) -> Vec<Visit> {
    locations
        .iter()
        .enumerate()
        .map(|(i, location)| visit_at(i as u64 + 1, location))
        .collect()
}
