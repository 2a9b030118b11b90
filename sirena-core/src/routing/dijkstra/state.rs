use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

#[derive(Copy, Clone, PartialEq)]
pub(super) struct State {
    /// Priority: reached cost plus heuristic estimate.
    pub(super) estimate: f64,
    /// Cost actually accrued from the start node.
    pub(super) cost: f64,
    /// Insertion order; equal-priority entries pop FIFO so searches are
    /// deterministic across runs on identical input.
    pub(super) seq: u64,
    pub(super) node: NodeIndex,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by estimate (reversed from standard Rust BinaryHeap),
        // then FIFO on the sequence number.
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn state(estimate: f64, seq: u64) -> State {
        State {
            estimate,
            cost: estimate,
            seq,
            node: NodeIndex::new(0),
        }
    }

    #[test]
    fn heap_pops_cheapest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(state(5.0, 0));
        heap.push(state(1.0, 1));
        heap.push(state(3.0, 2));
        assert_eq!(heap.pop().unwrap().estimate, 1.0);
        assert_eq!(heap.pop().unwrap().estimate, 3.0);
        assert_eq!(heap.pop().unwrap().estimate, 5.0);
    }

    #[test]
    fn equal_estimates_pop_in_insertion_order() {
        let mut heap = BinaryHeap::new();
        heap.push(state(2.0, 0));
        heap.push(state(2.0, 1));
        heap.push(state(2.0, 2));
        assert_eq!(heap.pop().unwrap().seq, 0);
        assert_eq!(heap.pop().unwrap().seq, 1);
        assert_eq!(heap.pop().unwrap().seq, 2);
    }
}
