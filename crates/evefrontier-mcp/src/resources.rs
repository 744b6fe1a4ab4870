//! MCP resource implementations for dataset metadata
//!
//! This module defines the three resources exposed by the MCP server:
//! - evefrontier://dataset/info: Dataset metadata and schema
//! - evefrontier://algorithms: Available routing algorithms
//! - evefrontier://spatial-index/status: Spatial index build status

use crate::server::McpServerState;
use crate::Result;
use serde::Serialize;
use serde_json::json;

/// Dataset information resource
///
/// Returns metadata about the loaded EVE Frontier dataset including
/// system count, jump count, schema version, and build timestamp.
pub struct DatasetInfoResource;

impl DatasetInfoResource {
    /// Handle a dataset info resource read
    pub async fn read(state: &McpServerState) -> Result<String> {
        let info = state.dataset_info();
        serde_json::to_string(&info).map_err(|e| crate::Error::internal(e.to_string()))
    }
}

/// Algorithms resource
///
/// Returns a list of available routing algorithms and their
/// constraints/capabilities.
pub struct AlgorithmsResource;

impl AlgorithmsResource {
    /// Handle an algorithms resource read
    pub async fn read() -> Result<String> {
        #[derive(Serialize)]
        struct Algorithm<'a> {
            name: &'a str,
            description: &'a str,
            constraints: &'a [&'a str],
        }

        let algorithms = vec![
            Algorithm {
                name: "bfs",
                description: "Breadth-first search for unweighted gate routes",
                constraints: &["gate_only", "no_max_jump", "fast"],
            },
            Algorithm {
                name: "dijkstra",
                description: "Weighted routing supporting gate and spatial edges",
                constraints: &[
                    "supports_max_jump",
                    "supports_temperature",
                    "gate_or_spatial",
                ],
            },
            Algorithm {
                name: "a-star",
                description: "Heuristic-guided routing prioritizing shortest spatial distance",
                constraints: &[
                    "supports_max_jump",
                    "supports_temperature",
                    "heuristic_spatial",
                ],
            },
        ];

        let payload = json!({
            "algorithms": algorithms,
            "default": "a-star",
        });

        serde_json::to_string(&payload).map_err(|e| crate::Error::internal(e.to_string()))
    }
}

/// Spatial index status resource
///
/// Returns information about the spatial index including its version,
/// build timestamp, and whether it's currently loaded.
pub struct SpatialIndexStatusResource;

impl SpatialIndexStatusResource {
    /// Handle a spatial index status resource read
    pub async fn read(state: &McpServerState) -> Result<String> {
        let index_path = format!("{}.spatial.bin", state.database_path.display());
        let payload = json!({
            "available": state.spatial_index_available,
            "index_path": index_path,
            "dataset_path": state.database_path,
            "schema_version": state.schema_version,
            "initialized_at": state.initialized_at.to_rfc3339(),
        });

        serde_json::to_string(&payload).map_err(|e| crate::Error::internal(e.to_string()))
    }
}
