//! Wire shape of a road-network snapshot

use serde::{Deserialize, Serialize};

use crate::model::EdgeAttrs;
use crate::{EdgeId, NodeId};

/// Flat node and edge lists as delivered by the infrastructure layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// `[lon, lat]` pairs from source to target; may be empty, in which
    /// case the builder synthesizes a straight segment.
    #[serde(default)]
    pub polyline: Vec<[f64; 2]>,
    pub length_m: f64,
    #[serde(default)]
    pub oneway: bool,
    #[serde(default)]
    pub attrs: EdgeAttrs,
}
