//! Failure-probability overlay produced by threat aggregation

use std::sync::Arc;

use petgraph::graph::NodeIndex;

use super::RoadNetwork;

/// A road network plus derived failure probabilities.
///
/// Built wholesale by [`crate::threat::annotate`]; never patched
/// incrementally. The underlying network is shared via `Arc`, so
/// re-annotation can run concurrently with searches against the
/// previous overlay.
#[derive(Debug, Clone)]
pub struct AnnotatedNetwork {
    network: Arc<RoadNetwork>,
    edge_fail_prob: Vec<f64>,
    node_fail_prob: Vec<f64>,
    min_edge_fail_prob: f64,
}

impl AnnotatedNetwork {
    pub(crate) fn from_parts(
        network: Arc<RoadNetwork>,
        edge_fail_prob: Vec<f64>,
        node_fail_prob: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(edge_fail_prob.len(), network.edge_count());
        debug_assert_eq!(node_fail_prob.len(), network.node_count());
        let min_edge_fail_prob = edge_fail_prob.iter().copied().fold(f64::INFINITY, f64::min);
        let min_edge_fail_prob = if min_edge_fail_prob.is_finite() {
            min_edge_fail_prob
        } else {
            0.0
        };
        Self {
            network,
            edge_fail_prob,
            node_fail_prob,
            min_edge_fail_prob,
        }
    }

    /// All-zero overlay for routing without hazard input.
    pub fn unthreatened(network: Arc<RoadNetwork>) -> Self {
        let edges = network.edge_count();
        let nodes = network.node_count();
        Self::from_parts(network, vec![0.0; edges], vec![0.0; nodes])
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn network_arc(&self) -> Arc<RoadNetwork> {
        Arc::clone(&self.network)
    }

    pub fn edge_fail_prob(&self, slot: usize) -> f64 {
        self.edge_fail_prob[slot]
    }

    pub fn node_fail_prob(&self, node: NodeIndex) -> f64 {
        self.node_fail_prob[node.index()]
    }

    pub fn edge_fail_probs(&self) -> &[f64] {
        &self.edge_fail_prob
    }

    pub fn node_fail_probs(&self) -> &[f64] {
        &self.node_fail_prob
    }

    /// Smallest edge failure probability in the overlay. Used to scale
    /// the A* heuristic while keeping it a lower bound on true cost.
    pub fn min_edge_fail_prob(&self) -> f64 {
        self.min_edge_fail_prob
    }
}
