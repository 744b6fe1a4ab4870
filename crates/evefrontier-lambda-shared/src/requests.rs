//! Request types and validation for Lambda endpoints.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Validation trait for Lambda request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Request for computing a route between two systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Starting system name.
    pub from: String,

    /// Destination system name.
    pub to: String,

    /// Routing algorithm to use.
    #[serde(default)]
    pub algorithm: RouteAlgorithm,

    /// Maximum jump distance in light-years (for spatial routes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_jump: Option<f64>,

    /// Systems to avoid when computing the route.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub avoid: Vec<String>,

    /// If true, avoid gates and use only spatial jumps.
    #[serde(default)]
    pub avoid_gates: bool,

    /// Maximum star temperature threshold in Kelvin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<f64>,

    /// Optional ship name for fuel projection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship: Option<String>,

    /// Fuel quality percentage (1-100). Defaults to 10 when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_quality: Option<f64>,

    /// Cargo mass in kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_mass: Option<f64>,

    /// Fuel load in units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_load: Option<f64>,

    /// Optional heat calibration constant to scale heat energy calculations.
    #[serde(skip_serializing_if = "Option::is_none")]
    // `heat_calibration` removed: calibration is fixed server-side to 1e-7

    /// Enable per-hop dynamic mass recalculation.
    #[serde(default)]
    pub dynamic_mass: Option<bool>,

    /// Enable conservative avoidance of hops that would reach critical engine heat.
    #[serde(default = "default_true")]
    pub avoid_critical_state: bool,

    /// Maximum number of spatial neighbors to consider (default from lib).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_spatial_neighbors: Option<usize>,

    /// Optional optimization objective: distance or fuel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization: Option<RouteOptimization>,
}

fn default_true() -> bool {
    true
}

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Breadth-first search (unweighted, shortest hop count).
    Bfs,
    /// Dijkstra's algorithm (weighted by distance).
    Dijkstra,
    /// A* search with spatial heuristic (default, typically fastest).
    #[default]
    AStar,
}

impl From<RouteAlgorithm> for evefrontier_lib::RouteAlgorithm {
    fn from(value: RouteAlgorithm) -> Self {
        match value {
            RouteAlgorithm::Bfs => evefrontier_lib::RouteAlgorithm::Bfs,
            RouteAlgorithm::Dijkstra => evefrontier_lib::RouteAlgorithm::Dijkstra,
            RouteAlgorithm::AStar => evefrontier_lib::RouteAlgorithm::AStar,
        }
    }
}

/// Optional optimization objective for planning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RouteOptimization {
    Distance,
    Fuel,
}

impl From<RouteOptimization> for evefrontier_lib::routing::RouteOptimization {
    fn from(value: RouteOptimization) -> Self {
        match value {
            RouteOptimization::Distance => evefrontier_lib::routing::RouteOptimization::Distance,
            RouteOptimization::Fuel => evefrontier_lib::routing::RouteOptimization::Fuel,
        }
    }
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.from.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'from' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.to.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'to' field is required and cannot be empty",
                request_id,
            )));
        }

        if let Some(max_jump) = self.max_jump {
            if max_jump <= 0.0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'max_jump' field must be a positive number",
                    request_id,
                )));
            }
        }

        if let Some(max_temp) = self.max_temperature {
            if max_temp <= 0.0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'max_temperature' field must be a positive number",
                    request_id,
                )));
            }
        }

        if let Some(ref ship) = self.ship {
            if ship.trim().is_empty() {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'ship' field cannot be empty when provided",
                    request_id,
                )));
            }
        }

        if let Some(fuel_quality) = self.fuel_quality {
            if !(1.0..=100.0).contains(&fuel_quality) {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'fuel_quality' field must be between 1 and 100",
                    request_id,
                )));
            }
        }

        if let Some(cargo_mass) = self.cargo_mass {
            if cargo_mass < 0.0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'cargo_mass' field must be zero or greater",
                    request_id,
                )));
            }
        }

        if let Some(fuel_load) = self.fuel_load {
            if fuel_load < 0.0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'fuel_load' field must be zero or greater",
                    request_id,
                )));
            }
        }

        // No validation required; calibration is fixed.

        Ok(())
    }
}

/// Request for finding gate-connected neighbors of a system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutGatesRequest {
    /// System name or ID to find neighbors for.
    pub system: String,
}

impl Validate for ScoutGatesRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.system.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'system' field is required and cannot be empty",
                request_id,
            )));
        }
        Ok(())
    }
}

/// Request for finding systems within a spatial range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutRangeRequest {
    /// System name or ID to search from.
    pub system: String,

    /// Maximum number of results to return.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Maximum distance in light-years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    /// Maximum star temperature threshold in Kelvin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<f64>,
}

fn default_limit() -> usize {
    10
}

impl Validate for ScoutRangeRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.system.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'system' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.limit == 0 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'limit' field must be at least 1",
                request_id,
            )));
        }

        if self.limit > 100 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'limit' field cannot exceed 100",
                request_id,
            )));
        }

        if let Some(radius) = self.radius {
            if radius <= 0.0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'radius' field must be a positive number",
                    request_id,
                )));
            }
        }

        if let Some(max_temp) = self.max_temperature {
            if max_temp <= 0.0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'max_temperature' field must be a positive number",
                    request_id,
                )));
            }
        }

        Ok(())
    }
}
