//! Severity-to-probability curves and influence radii
//!
//! The constants here are operational policy, not contract: deployments
//! tune them through configuration. Defaults follow the behaviour of
//! the live system this engine replaces.

use serde::{Deserialize, Serialize};

use super::{Hazard, HazardKind, HazardSubtype};

/// Linear severity curve: `base + (severity - 1) * per_level`,
/// clamped to [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeverityCurve {
    pub base: f64,
    pub per_level: f64,
}

impl SeverityCurve {
    pub fn probability(&self, severity: f64) -> f64 {
        (self.base + (severity - 1.0) * self.per_level).clamp(0.0, 1.0)
    }
}

/// Tunable aggregation policy: per-kind influence radii and per-subtype
/// probability curves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatPolicy {
    /// Buffer radius for incident points and jam lines, meters.
    pub incident_radius_m: f64,
    /// Buffer radius for localized physical obstacles, meters.
    pub obstacle_radius_m: f64,
    /// Buffer radius for point/line weather reports, meters. Polygon
    /// weather cells use geometric intersection instead.
    pub weather_radius_m: f64,

    pub closure_prob: f64,
    pub jam_prob: f64,
    pub accident_prob: f64,
    pub obstacle_prob: f64,
    pub heavy_rain: SeverityCurve,
    pub strong_wind: SeverityCurve,
    pub low_visibility: SeverityCurve,
    /// Contribution for subtypes without a dedicated curve.
    pub fallback_prob: f64,
}

impl Default for ThreatPolicy {
    fn default() -> Self {
        Self {
            incident_radius_m: 100.0,
            obstacle_radius_m: 15.0,
            weather_radius_m: 500.0,
            closure_prob: 0.95,
            jam_prob: 0.4,
            accident_prob: 0.6,
            obstacle_prob: 0.05,
            heavy_rain: SeverityCurve {
                base: 0.3,
                per_level: 0.2,
            },
            strong_wind: SeverityCurve {
                base: 0.25,
                per_level: 0.2,
            },
            low_visibility: SeverityCurve {
                base: 0.5,
                per_level: 0.2,
            },
            fallback_prob: 0.1,
        }
    }
}

impl ThreatPolicy {
    /// Buffer radius for a hazard's kind.
    pub fn influence_radius_m(&self, kind: HazardKind) -> f64 {
        match kind {
            HazardKind::Incident => self.incident_radius_m,
            HazardKind::Obstacle => self.obstacle_radius_m,
            HazardKind::Weather => self.weather_radius_m,
        }
    }

    /// Contribution probability of one hazard, before max-aggregation.
    pub fn contribution(&self, hazard: &Hazard) -> f64 {
        let p = match hazard.subtype {
            HazardSubtype::Closure => self.closure_prob,
            HazardSubtype::TrafficJam => self.jam_prob,
            HazardSubtype::Accident => self.accident_prob,
            HazardSubtype::PhysicalObstacle => self.obstacle_prob,
            HazardSubtype::HeavyRain => self.heavy_rain.probability(hazard.severity),
            HazardSubtype::StrongWind => self.strong_wind.probability(hazard.severity),
            HazardSubtype::LowVisibility => self.low_visibility.probability(hazard.severity),
            HazardSubtype::Other => self.fallback_prob,
        };
        p.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_curve_is_clamped() {
        let curve = SeverityCurve {
            base: 0.5,
            per_level: 0.2,
        };
        assert_eq!(curve.probability(1.0), 0.5);
        assert!((curve.probability(2.0) - 0.7).abs() < 1e-12);
        assert_eq!(curve.probability(5.0), 1.0);
        assert_eq!(curve.probability(0.0), 0.3);
    }
}
