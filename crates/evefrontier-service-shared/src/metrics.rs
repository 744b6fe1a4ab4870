//! Prometheus metrics infrastructure for EVE Frontier microservices.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Initialize the Prometheus metrics recorder
//! - [`metrics_handler`]: Axum handler for `/metrics` endpoint
//! - Business metric helpers for route and scout services
//!
//! # Example
//!
//! ```no_run
//! use evefrontier_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! // Initialize metrics at startup
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! // Add metrics endpoint to router
//! let app: Router = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: Path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let path = std::env::var("METRICS_PATH").unwrap_or_else(|_| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Initialize the Prometheus metrics recorder.
///
/// This must be called once at application startup before any metrics are recorded.
/// Subsequent calls will return an error.
///
/// # Errors
///
/// Returns an error if:
/// - Metrics are disabled in configuration
/// - The recorder has already been installed
/// - The Prometheus builder fails to install
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if [`init_metrics`] has not been called.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler for the `/metrics` endpoint.
///
/// Returns Prometheus exposition format text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    Disabled,
    /// The recorder has already been installed.
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Record a successful route calculation.
///
/// Increments the `evefrontier_routes_calculated_total` counter.
///
/// # Arguments
///
/// * `algorithm` - The algorithm used (e.g., "bfs", "dijkstra", "astar")
/// * `service` - The service name (e.g., "route")
pub fn record_route_calculated(algorithm: &str, service: &str) {
    metrics::counter!(
        "evefrontier_routes_calculated_total",
        "algorithm" => algorithm.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record a failed route calculation.
///
/// Increments the `evefrontier_routes_failed_total` counter.
///
/// # Arguments
///
/// * `reason` - The failure reason (e.g., "no_path", "unknown_system", "validation_error")
/// * `service` - The service name (e.g., "route")
pub fn record_route_failed(reason: &str, service: &str) {
    metrics::counter!(
        "evefrontier_routes_failed_total",
        "reason" => reason.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record the number of hops in a successful route.
///
/// Records to the `evefrontier_route_hops` histogram.
///
/// # Arguments
///
/// * `hops` - The number of hops in the route
/// * `algorithm` - The algorithm used (e.g., "bfs", "dijkstra", "astar")
pub fn record_route_hops(hops: usize, algorithm: &str) {
    metrics::histogram!(
        "evefrontier_route_hops",
        "algorithm" => algorithm.to_string()
    )
    .record(hops as f64);
}

/// Record a system query from scout endpoints.
///
/// Increments the `evefrontier_systems_queried_total` counter.
///
/// # Arguments
///
/// * `query_type` - The type of query (e.g., "gates", "range")
/// * `service` - The service name (e.g., "scout-gates", "scout-range")
pub fn record_systems_queried(query_type: &str, service: &str) {
    metrics::counter!(
        "evefrontier_systems_queried_total",
        "query_type" => query_type.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record the number of neighbors returned by scout queries.
///
/// Records to the `evefrontier_neighbors_returned` histogram.
///
/// # Arguments
///
/// * `count` - The number of neighbors returned
/// * `query_type` - The type of query (e.g., "gates", "range")
pub fn record_neighbors_returned(count: usize, query_type: &str) {
    metrics::histogram!(
        "evefrontier_neighbors_returned",
        "query_type" => query_type.to_string()
    )
    .record(count as f64);
}
