//! Bernoulli scenario sampling over annotated failure probabilities

use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::mix_seed;
use crate::model::AnnotatedNetwork;
use crate::{EdgeId, NodeId};

/// One Monte-Carlo draw of failed elements.
///
/// Ephemeral: scenarios are consumed by what-if re-routing (feed
/// `failed_edges` into a request's `excluded_edges`) and never written
/// back into the graph.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub failed_edges: Vec<EdgeId>,
    pub failed_nodes: Vec<NodeId>,
}

impl Scenario {
    pub fn is_empty(&self) -> bool {
        self.failed_edges.is_empty() && self.failed_nodes.is_empty()
    }
}

/// Draws `n` independent failure scenarios.
///
/// Every edge and node with `fail_prob > 0` gets an independent
/// Bernoulli trial per scenario. Draws run in parallel; each scenario's
/// generator is seeded from `(seed, scenario index)`, so a fixed seed
/// reproduces the same scenario list.
pub fn sample_scenarios(annotated: &AnnotatedNetwork, n: usize, seed: u64) -> Vec<Scenario> {
    (0..n as u64)
        .into_par_iter()
        .map(|index| draw(annotated, StdRng::seed_from_u64(mix_seed(seed, index))))
        .collect()
}

fn draw(annotated: &AnnotatedNetwork, mut rng: StdRng) -> Scenario {
    let network = annotated.network();

    let mut edge_mask = FixedBitSet::with_capacity(network.edge_count());
    for (slot, &p) in annotated.edge_fail_probs().iter().enumerate() {
        if p > 0.0 && rng.gen_bool(p.min(1.0)) {
            edge_mask.insert(slot);
        }
    }

    let mut node_mask = FixedBitSet::with_capacity(network.node_count());
    for (idx, &p) in annotated.node_fail_probs().iter().enumerate() {
        if p > 0.0 && rng.gen_bool(p.min(1.0)) {
            node_mask.insert(idx);
        }
    }

    Scenario {
        failed_edges: edge_mask.ones().map(|slot| network.edge(slot).id).collect(),
        failed_nodes: node_mask
            .ones()
            .map(|idx| network.node(NodeIndex::new(idx)).id)
            .collect(),
    }
}
