//! Immutable road graph with a spatial index for coordinate snapping

pub mod components;

use geo::{Distance, Haversine, Point};
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::{EdgeId, Error, NodeId};
use components::{RoadEdge, RoadNode};

/// Node point stored in the snapping R-tree
#[derive(Debug, Clone, Copy)]
pub struct IndexedPoint {
    pub coords: [f64; 2],
    pub node: NodeIndex,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.coords[0] - point[0];
        let dy = self.coords[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Immutable road network built from one snapshot
///
/// Edge payloads in the petgraph are slots into `edges`; a bidirectional
/// street contributes two arcs sharing one slot, so probabilities and
/// costs stay per-street rather than per-arc. Read-only after
/// construction - searches never mutate node or edge sets.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub graph: DiGraph<RoadNode, usize>,
    edges: Vec<RoadEdge>,
    node_index: HashMap<NodeId, NodeIndex>,
    edge_index: HashMap<EdgeId, usize>,
    rtree: RTree<IndexedPoint>,
}

impl RoadNetwork {
    pub(crate) fn new(
        graph: DiGraph<RoadNode, usize>,
        edges: Vec<RoadEdge>,
        node_index: HashMap<NodeId, NodeIndex>,
        edge_index: HashMap<EdgeId, usize>,
    ) -> Self {
        let points = graph
            .node_indices()
            .map(|idx| IndexedPoint {
                coords: [graph[idx].geometry.x(), graph[idx].geometry.y()],
                node: idx,
            })
            .collect();
        let rtree = RTree::bulk_load(points);
        Self {
            graph,
            edges,
            node_index,
            edge_index,
            rtree,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of streets, not arcs.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, idx: NodeIndex) -> &RoadNode {
        &self.graph[idx]
    }

    pub fn edge(&self, slot: usize) -> &RoadEdge {
        &self.edges[slot]
    }

    pub fn edges(&self) -> &[RoadEdge] {
        &self.edges
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_index.get(&id).copied()
    }

    pub fn edge_slot(&self, id: EdgeId) -> Option<usize> {
        self.edge_index.get(&id).copied()
    }

    /// Outgoing `(edge slot, target node)` pairs, honoring oneway flags:
    /// a forward-only edge has no arc from its target side.
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = (usize, NodeIndex)> + '_ {
        self.graph
            .edges(node)
            .map(|edge| (*edge.weight(), edge.target()))
    }

    /// Snaps a coordinate to the nearest network node.
    ///
    /// # Errors
    ///
    /// `NoNearbyNode` when the nearest node is further than
    /// `max_distance_m` away, or the network is empty.
    pub fn nearest_node(&self, point: Point<f64>, max_distance_m: f64) -> Result<NodeIndex, Error> {
        let too_far = || Error::NoNearbyNode {
            lat: point.y(),
            lon: point.x(),
            max_distance_m,
        };
        let nearest = self
            .rtree
            .nearest_neighbor(&[point.x(), point.y()])
            .ok_or_else(too_far)?;
        let snapped = self.graph[nearest.node].geometry;
        if Haversine.distance(point, snapped) > max_distance_m {
            return Err(too_far());
        }
        Ok(nearest.node)
    }
}
