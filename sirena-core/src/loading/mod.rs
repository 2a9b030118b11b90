//! This module is responsible for building the immutable road graph
//! from a network snapshot supplied by external collaborators.

mod builder;
mod snapshot;

pub use builder::build_road_network;
pub use snapshot::{EdgeRecord, NetworkSnapshot, NodeRecord};
