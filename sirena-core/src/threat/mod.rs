//! Hazard records and their aggregation into failure probabilities

mod aggregate;
mod policy;

pub use aggregate::annotate;
pub use policy::{SeverityCurve, ThreatPolicy};

use geo::{LineString, Point, Polygon};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Coarse hazard category; selects the proximity test and radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Incident,
    Weather,
    Obstacle,
}

/// Hazard subtype; selects the probability curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardSubtype {
    Closure,
    TrafficJam,
    Accident,
    HeavyRain,
    StrongWind,
    LowVisibility,
    PhysicalObstacle,
    Other,
}

/// Hazard geometry in the same coordinate reference as the network.
#[derive(Debug, Clone)]
pub enum HazardGeometry {
    Point(Point<f64>),
    Line(LineString<f64>),
    Polygon(Polygon<f64>),
}

impl HazardGeometry {
    /// Rejects empty and non-finite geometry before aggregation.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        fn coords_ok(mut coords: impl Iterator<Item = geo::Coord<f64>>) -> bool {
            coords.all(|c| c.x.is_finite() && c.y.is_finite())
        }
        let ok = match self {
            HazardGeometry::Point(p) => p.x().is_finite() && p.y().is_finite(),
            HazardGeometry::Line(l) => l.0.len() >= 2 && coords_ok(l.coords().copied()),
            HazardGeometry::Polygon(p) => {
                p.exterior().0.len() >= 4 && coords_ok(p.exterior().coords().copied())
            }
        };
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidData("degenerate hazard geometry".into()))
        }
    }
}

/// One external hazard record. Read-only input to an aggregation pass;
/// the engine never mutates hazards.
#[derive(Debug, Clone)]
pub struct Hazard {
    pub id: String,
    /// Provider tag, e.g. a feed name or `synthetic`.
    pub source: String,
    pub kind: HazardKind,
    pub subtype: HazardSubtype,
    /// Ordinal 1-5 or continuous; curves clamp the result to [0, 1].
    pub severity: f64,
    pub geometry: HazardGeometry,
    /// Optional numeric feed attributes (wind speed, rain rate, ...).
    pub metrics: Option<serde_json::Value>,
}

impl Hazard {
    /// Parses one hazard from a GeoJSON feature with `kind`, `subtype`,
    /// `severity` and optional `source`/`ext_id` properties - the shape
    /// hazard feeds deliver.
    ///
    /// # Errors
    ///
    /// `InvalidData` when required properties or a usable geometry are
    /// missing.
    pub fn from_feature(feature: &geojson::Feature) -> Result<Self, Error> {
        let props = feature
            .properties
            .as_ref()
            .ok_or_else(|| Error::InvalidData("hazard feature without properties".into()))?;

        let str_prop = |key: &str| props.get(key).and_then(|v| v.as_str());
        let kind: HazardKind = serde_json::from_value(
            props
                .get("kind")
                .cloned()
                .ok_or_else(|| Error::InvalidData("hazard without kind".into()))?,
        )
        .map_err(|e| Error::InvalidData(format!("bad hazard kind: {e}")))?;
        let subtype = props
            .get("subtype")
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| Error::InvalidData(format!("bad hazard subtype: {e}")))?
            .unwrap_or(HazardSubtype::Other);
        let severity = props
            .get("severity")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(1.0);

        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| Error::InvalidData("hazard feature without geometry".into()))?;
        let geometry = match geo::Geometry::<f64>::try_from(geometry.value.clone()) {
            Ok(geo::Geometry::Point(p)) => HazardGeometry::Point(p),
            Ok(geo::Geometry::LineString(l)) => HazardGeometry::Line(l),
            Ok(geo::Geometry::Polygon(p)) => HazardGeometry::Polygon(p),
            Ok(other) => {
                return Err(Error::InvalidData(format!(
                    "unsupported hazard geometry: {other:?}"
                )));
            }
            Err(e) => return Err(Error::GeoJsonError(e.to_string())),
        };

        Ok(Hazard {
            id: str_prop("ext_id")
                .or_else(|| str_prop("id"))
                .unwrap_or_default()
                .to_string(),
            source: str_prop("source").unwrap_or("unknown").to_string(),
            kind,
            subtype,
            severity,
            geometry,
            metrics: props.get("metrics").cloned(),
        })
    }
}

/// Parses a hazard feed, skipping malformed features with a warning.
/// Partial, best-effort input beats an aborted pass.
pub fn hazards_from_feed(collection: &geojson::FeatureCollection) -> Vec<Hazard> {
    collection
        .features
        .iter()
        .filter_map(|feature| match Hazard::from_feature(feature) {
            Ok(hazard) => Some(hazard),
            Err(e) => {
                warn!("skipping malformed hazard feature: {e}");
                None
            }
        })
        .collect()
}
