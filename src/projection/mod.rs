//! Dataset projections consumed by the dashboard
//!
//! - `projector`: filtered-connected node/edge elements for the graph view
//! - `summary`: the four counter boxes
//! - `details`: click-to-inspect panel contents
//! - `options`: dropdown option lists
//! - `lineage`: app -> upstream -> table graph and shared tables

pub mod details;
pub mod element;
pub mod filter;
pub mod lineage;
pub mod options;
pub mod projector;
pub mod summary;

pub use details::{describe, Details, EntityDetails};
pub use element::{ClassTags, EdgeElement, Element, ElementList, NodeClass, NodeElement, StatusClass};
pub use filter::{select, FilterSpec, FilterValue, LABEL_KEY};
pub use lineage::{shared_tables, LineageGraph, LineageKind, LineageRow, SharedTable};
pub use options::{DropdownOption, FilterOptions};
pub use projector::{overview, project, Projection, Projector};
pub use summary::{summarize, Summary};
