//! Visiting-order heuristics.
//!
//! The first supplied stop always anchors the route. Nearest-neighbor is
//! O(n^2) distance evaluations, which is fine for one agent's day.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlannerError;
use crate::traits::{DistanceModel, Located};

/// Improvements smaller than this are treated as float noise.
const IMPROVEMENT_EPSILON_KM: f64 = 1e-9;

/// How the visiting order is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SequencingStrategy {
    /// Greedy nearest-neighbor from the first stop.
    #[default]
    NearestNeighbor,
    /// Nearest-neighbor followed by a bounded 2-opt pass.
    TwoOpt,
}

impl fmt::Display for SequencingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NearestNeighbor => f.write_str("nearest-neighbor"),
            Self::TwoOpt => f.write_str("two-opt"),
        }
    }
}

impl FromStr for SequencingStrategy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest-neighbor" | "nearest_neighbor" => Ok(Self::NearestNeighbor),
            "two-opt" | "two_opt" | "2-opt" => Ok(Self::TwoOpt),
            other => Err(PlannerError::invalid_argument(format!(
                "unknown sequencing strategy '{other}'"
            ))),
        }
    }
}

/// Orders stops with the configured strategy.
#[derive(Debug, Clone, Copy)]
pub struct RouteSequencer<D> {
    distance: D,
    strategy: SequencingStrategy,
    local_search_iterations: usize,
}

impl<D: DistanceModel> RouteSequencer<D> {
    pub fn new(distance: D, strategy: SequencingStrategy, local_search_iterations: usize) -> Self {
        Self {
            distance,
            strategy,
            local_search_iterations,
        }
    }

    /// Return a permutation of `0..stops.len()` starting at index 0.
    pub fn order<L: Located>(&self, stops: &[L]) -> Vec<usize> {
        let mut order = nearest_neighbor_order(stops, &self.distance);
        if self.strategy == SequencingStrategy::TwoOpt {
            let passes = two_opt_improve(&mut order, stops, &self.distance, self.local_search_iterations);
            debug!(stops = stops.len(), passes, "2-opt finished");
        }
        order
    }
}

/// Greedy nearest-neighbor ordering anchored at index 0.
///
/// Equal-distance candidates resolve to the lowest input index.
pub fn nearest_neighbor_order<L, D>(stops: &[L], distance: &D) -> Vec<usize>
where
    L: Located,
    D: DistanceModel + ?Sized,
{
    let n = stops.len();
    if n <= 1 {
        return (0..n).collect();
    }

    let locations: Vec<_> = stops.iter().map(Located::location).collect();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = 0;
    visited[0] = true;
    order.push(0);

    while order.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for (candidate, location) in locations.iter().enumerate() {
            if visited[candidate] {
                continue;
            }
            let d = distance.distance_km(locations[current], *location);
            // Strict `<` keeps the lowest index on ties.
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((candidate, d));
            }
        }
        let Some((next, _)) = best else {
            break;
        };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

/// 2-opt over an open path: reverse `order[i+1..=j]` while it shortens
/// the route. Position 0 never moves. Returns the number of improving
/// reversals applied.
fn two_opt_improve<L, D>(order: &mut [usize], stops: &[L], distance: &D, max_iterations: usize) -> usize
where
    L: Located,
    D: DistanceModel + ?Sized,
{
    let n = order.len();
    if n < 3 {
        return 0;
    }
    let at = |idx: usize| stops[idx].location();

    let mut applied = 0;
    'search: while applied < max_iterations {
        for i in 0..n - 1 {
            for j in i + 2..n {
                let a = at(order[i]);
                let b = at(order[i + 1]);
                let c = at(order[j]);
                let removed = distance.distance_km(a, b);
                let added = distance.distance_km(a, c);
                let delta = match order.get(j + 1) {
                    Some(&next) => {
                        let d = at(next);
                        added + distance.distance_km(b, d) - removed - distance.distance_km(c, d)
                    }
                    None => added - removed,
                };
                if delta < -IMPROVEMENT_EPSILON_KM {
                    order[i + 1..=j].reverse();
                    applied += 1;
                    continue 'search;
                }
            }
        }
        break;
    }
    applied
}
