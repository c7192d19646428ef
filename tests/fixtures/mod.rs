//! Test fixtures for visit-planner.
//!
//! Provides realistic test data including:
//! - Real Bogotá locations (from OpenStreetMap)
//! - Builders for visits

pub mod bogota_locations;

pub use bogota_locations::*;
