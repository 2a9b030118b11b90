//! Road network components - nodes and edges with static attributes

use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

use crate::{EdgeId, NodeId};

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Snapshot ID of the node
    pub id: NodeId,
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Road graph edge (street segment)
///
/// Bidirectional edges are traversable both ways at the same base cost;
/// oneway edges expose no reverse arc. Attributes are filter inputs
/// only and never feed the cost functions.
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Snapshot ID of the edge
    pub id: EdgeId,
    /// Snapshot ID of the source node
    pub source: NodeId,
    /// Snapshot ID of the target node
    pub target: NodeId,
    /// Polyline geometry, oriented source to target
    pub geometry: LineString<f64>,
    /// Segment length in meters
    pub length_m: f64,
    /// Forward-only when set
    pub oneway: bool,
    /// Base traversal cost, defaults to `length_m`
    pub base_cost: f64,
    /// Classification metadata used only for eligibility filtering
    pub attrs: EdgeAttrs,
}

impl RoadEdge {
    /// Whether a vehicle of the given width can use this segment.
    /// Unknown widths are permissive.
    pub fn admits_width(&self, vehicle_width_m: f64) -> bool {
        self.attrs.width_m.is_none_or(|w| w >= vehicle_width_m)
    }
}

/// Optional edge classification from the snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeAttrs {
    #[serde(default)]
    pub road_class: Option<String>,
    #[serde(default)]
    pub width_m: Option<f64>,
    #[serde(default)]
    pub surface: Option<String>,
}
