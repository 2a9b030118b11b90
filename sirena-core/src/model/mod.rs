//! Data model for resilient road-network routing
//!
//! Contains the immutable graph built from a network snapshot and the
//! failure-probability overlay produced by threat aggregation.

pub mod annotated;
pub mod network;

pub use annotated::AnnotatedNetwork;
pub use network::components::{EdgeAttrs, RoadEdge, RoadNode};
pub use network::{IndexedPoint, RoadNetwork};
