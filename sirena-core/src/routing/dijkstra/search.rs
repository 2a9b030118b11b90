use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use super::state::State;
use crate::model::{AnnotatedNetwork, RoadEdge};
use crate::routing::CancelFlag;
use crate::Error;

/// A found path: total cost and the traversed `(edge slot, node)` hops
/// from start to goal, start node excluded.
pub(crate) struct SearchPath {
    pub cost: f64,
    pub hops: Vec<(usize, NodeIndex)>,
}

/// Generic best-first search shared by all planner variants.
///
/// `edge_cost` maps an edge and its failure probability to a traversal
/// cost; `heuristic` estimates remaining cost to the goal (zero for
/// plain Dijkstra); `eligible` gates edge use. Cancellation is checked
/// at every queue pop so a pathological search stays bounded by the
/// caller's patience.
pub(crate) fn best_first_search(
    annotated: &AnnotatedNetwork,
    start: NodeIndex,
    goal: NodeIndex,
    edge_cost: impl Fn(&RoadEdge, f64) -> f64,
    heuristic: impl Fn(NodeIndex) -> f64,
    eligible: impl Fn(usize, &RoadEdge, f64) -> bool,
    cancel: Option<&CancelFlag>,
) -> Result<Option<SearchPath>, Error> {
    let network = annotated.network();
    let estimated = network.node_count().min(1024);
    let mut costs: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated);
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, usize)> =
        HashMap::with_capacity(estimated);
    let mut heap = BinaryHeap::with_capacity(estimated / 4);
    let mut seq = 0u64;

    heap.push(State {
        estimate: heuristic(start),
        cost: 0.0,
        seq,
        node: start,
    });
    costs.insert(start, 0.0);

    while let Some(State { cost, node, .. }) = heap.pop() {
        if let Some(flag) = cancel {
            if flag.is_cancelled() {
                return Err(Error::Cancelled);
            }
        }

        if node == goal {
            return Ok(Some(SearchPath {
                cost,
                hops: reconstruct(&predecessors, start, goal),
            }));
        }

        // Skip stale heap entries.
        if let Some(&best) = costs.get(&node) {
            if cost > best {
                continue;
            }
        }

        for (slot, next) in network.neighbors(node) {
            let edge = network.edge(slot);
            let fail_prob = annotated.edge_fail_prob(slot);
            if !eligible(slot, edge, fail_prob) {
                continue;
            }
            let next_cost = cost + edge_cost(edge, fail_prob);

            match costs.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, (node, slot));
                    seq += 1;
                    heap.push(State {
                        estimate: next_cost + heuristic(next),
                        cost: next_cost,
                        seq,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, (node, slot));
                        seq += 1;
                        heap.push(State {
                            estimate: next_cost + heuristic(next),
                            cost: next_cost,
                            seq,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    Ok(None)
}

fn reconstruct(
    predecessors: &HashMap<NodeIndex, (NodeIndex, usize)>,
    start: NodeIndex,
    goal: NodeIndex,
) -> Vec<(usize, NodeIndex)> {
    let mut hops = Vec::new();
    let mut current = goal;
    while current != start {
        let Some(&(prev, slot)) = predecessors.get(&current) else {
            break;
        };
        hops.push((slot, current));
        current = prev;
    }
    hops.reverse();
    hops
}
