//! Route results and their GeoJSON wire shape

use geo::LineString;
use geojson::{Feature, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::Algorithm;
use crate::{EdgeId, Error, NodeId};

/// One computed route.
///
/// The edge sequence is a simple path (no repeated nodes) connecting
/// the nodes nearest the requested coordinates; `geometry` is the
/// merged polyline of the traversed edges, oriented along the route.
#[derive(Debug, Clone)]
pub struct RouteResult {
    pub algorithm: Algorithm,
    /// Traversed edge ids, in order.
    pub edges: Vec<EdgeId>,
    pub geometry: LineString<f64>,
    pub total_length_m: f64,
    /// Total cost under the requested cost function; equals
    /// `total_length_m` for the distance and filtered variants.
    pub total_cost: f64,
    pub compute_time_ms: f64,
    pub start_node: NodeId,
    pub end_node: NodeId,
}

impl RouteResult {
    /// Converts the route to the GeoJSON feature consumed by the
    /// map-rendering layer.
    pub fn to_geojson(&self) -> Feature {
        let geometry = Geometry::new(GeoJsonValue::from(&self.geometry));
        let properties = json!({
            "algorithm": self.algorithm.name(),
            "total_length_m": self.total_length_m,
            "total_cost": self.total_cost,
            "time_ms": self.compute_time_ms,
            "segments": self.edges.len(),
        });
        Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: properties.as_object().cloned(),
            foreign_members: None,
        }
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}
