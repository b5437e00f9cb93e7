//! depgraph
//!
//! Backend for dependency network dashboards: a table of applications with
//! upstream/downstream dependency lists is filtered by dropdown selections
//! and projected into graph elements for a force-directed renderer.
//!
//! # Components
//!
//! - `graph`: entities, the immutable dataset snapshot, sample and synthetic data
//! - `projection`: filtered-connected elements, summary counts, node details,
//!   dropdown options, app -> upstream -> table lineage
//! - `chart`: 3D scatter and geo marker figures
//! - `config`: YAML/environment configuration
//! - `http`: axum JSON API and the embedded dashboard page
//!
//! ## Example Usage
//!
//! ```rust
//! use depgraph::graph::{keys, sample};
//! use depgraph::projection::{project, summarize, FilterSpec};
//!
//! let dataset = sample::ait_dataset();
//!
//! // Everything matches an empty filter
//! let projection = project(&dataset, &FilterSpec::new());
//! assert_eq!(projection.elements.nodes.len(), 4);
//! assert_eq!(projection.elements.edges.len(), 7);
//!
//! // Online entities only
//! let online = FilterSpec::new().with(keys::STATUS, "online");
//! let summary = summarize(&dataset, &online);
//! assert_eq!(summary.filtered, 2);
//! assert_eq!(summary.offline, 0);
//! ```

#![warn(clippy::all)]

pub mod chart;
pub mod config;
pub mod graph;
pub mod http;
pub mod projection;

// Re-export main types for convenience
pub use graph::{
    AttributeMap, AttributeValue, Dataset, DatasetGenerator, Entity, EntityId, GraphError,
    GraphResult, SyntheticGenerator,
};

pub use projection::{
    describe, overview, project, summarize, Details, ElementList, FilterOptions, FilterSpec,
    Projection, Projector, Summary,
};

pub use config::{AppConfig, ConfigError, ConfigResult, DatasetSource, ServerConfig};

pub use http::{router, AppState, HttpServer};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
