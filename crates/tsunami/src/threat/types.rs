use serde::{Deserialize, Serialize};

/// Discrete tsunami severity.
///
/// Ordered from least severe (Minimal) to most severe (Extreme); the derived
/// `Ord` is the comparison used for filtering and gating.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ThreatLevel {
    #[default]
    Minimal,
    Low,
    Medium,
    High,
    Extreme,
}

impl ThreatLevel {
    /// All levels in ascending order.
    pub const ALL: [ThreatLevel; 5] = [
        ThreatLevel::Minimal,
        ThreatLevel::Low,
        ThreatLevel::Medium,
        ThreatLevel::High,
        ThreatLevel::Extreme,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Minimal => "MINIMAL",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Extreme => "EXTREME",
        }
    }

    /// High and Extreme count as active alerts on the dashboard.
    pub fn is_alerting(self) -> bool {
        self >= Self::High
    }

    /// Radii of the concentric alert-zone rings drawn around the epicenter (km).
    pub fn alert_zone_radii_km(self) -> &'static [f64] {
        match self {
            Self::Extreme => &[50.0, 100.0, 200.0],
            Self::High => &[30.0, 80.0],
            Self::Medium => &[20.0, 50.0],
            Self::Low => &[10.0, 30.0],
            Self::Minimal => &[20.0],
        }
    }

    /// Share of the magnitude-derived source height that reaches the sea surface.
    /// Deeper, weaker events classify lower and couple less energy into the water.
    pub fn energy_factor(self) -> f64 {
        match self {
            Self::Minimal => 0.25,
            Self::Low => 0.5,
            Self::Medium => 0.7,
            Self::High => 0.85,
            Self::Extreme => 1.0,
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
