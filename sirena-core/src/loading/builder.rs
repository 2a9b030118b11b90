use geo::{Coord, LineString, Point};
use hashbrown::HashMap;
use log::info;
use petgraph::graph::DiGraph;

use super::snapshot::NetworkSnapshot;
use crate::model::{RoadEdge, RoadNetwork, RoadNode};
use crate::{Error, NodeId};

/// Builds the immutable road graph from a snapshot.
///
/// # Errors
///
/// `MalformedGraph` when an edge references an unknown node, a length
/// is negative or non-finite, coordinates are non-finite, or an id is
/// duplicated. A bad snapshot is fatal - the caller must rebuild from a
/// fresh one.
pub fn build_road_network(snapshot: &NetworkSnapshot) -> Result<RoadNetwork, Error> {
    let mut graph = DiGraph::with_capacity(snapshot.nodes.len(), snapshot.edges.len() * 2);
    let mut node_index: HashMap<NodeId, _> = HashMap::with_capacity(snapshot.nodes.len());

    for node in &snapshot.nodes {
        if !node.lon.is_finite() || !node.lat.is_finite() {
            return Err(Error::MalformedGraph(format!(
                "node {} has non-finite coordinates",
                node.id
            )));
        }
        let idx = graph.add_node(RoadNode {
            id: node.id,
            geometry: Point::new(node.lon, node.lat),
        });
        if node_index.insert(node.id, idx).is_some() {
            return Err(Error::MalformedGraph(format!("duplicate node id {}", node.id)));
        }
    }

    let mut edges = Vec::with_capacity(snapshot.edges.len());
    let mut edge_index = HashMap::with_capacity(snapshot.edges.len());

    for record in &snapshot.edges {
        let source = *node_index.get(&record.source).ok_or_else(|| {
            Error::MalformedGraph(format!(
                "edge {} references unknown node {}",
                record.id, record.source
            ))
        })?;
        let target = *node_index.get(&record.target).ok_or_else(|| {
            Error::MalformedGraph(format!(
                "edge {} references unknown node {}",
                record.id, record.target
            ))
        })?;
        if !record.length_m.is_finite() || record.length_m < 0.0 {
            return Err(Error::MalformedGraph(format!(
                "edge {} has invalid length {}",
                record.id, record.length_m
            )));
        }

        let geometry = if record.polyline.len() >= 2 {
            LineString::from(
                record
                    .polyline
                    .iter()
                    .map(|&[x, y]| Coord { x, y })
                    .collect::<Vec<_>>(),
            )
        } else {
            LineString::from(vec![graph[source].geometry.0, graph[target].geometry.0])
        };

        let slot = edges.len();
        edges.push(RoadEdge {
            id: record.id,
            source: record.source,
            target: record.target,
            geometry,
            length_m: record.length_m,
            oneway: record.oneway,
            base_cost: record.length_m,
            attrs: record.attrs.clone(),
        });
        if edge_index.insert(record.id, slot).is_some() {
            return Err(Error::MalformedGraph(format!("duplicate edge id {}", record.id)));
        }

        graph.add_edge(source, target, slot);
        if !record.oneway {
            graph.add_edge(target, source, slot);
        }
    }

    let network = RoadNetwork::new(graph, edges, node_index, edge_index);
    info!(
        "Road network built: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );
    Ok(network)
}
