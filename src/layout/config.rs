//! Layout configuration.
//!
//! A fixed, typed record of the simulation parameters. Every field can be set
//! independently at construction time; nothing is looked up by name at
//! runtime. The serde derive lets the JS binding accept a plain object with
//! camelCase keys, and missing keys fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Which attraction law applies to edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttractionMode {
    /// `w^ips_w * ln(1 + (d - olradius))`
    LinLog,
    /// `(d - olradius) / (deg(A) + 1)`
    DissuadeHubs,
    /// `w^ips_w * (d - olradius)`
    Linear,
}

/// Configuration for the force-directed layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Gravity strength toward the layout center (default: 1.0).
    pub k_g: f64,
    /// Repulsion strength (default: 1.0).
    pub k_r: f64,
    /// Exponent applied to edge weight in attraction (default: 0.5).
    pub ips_w: f64,
    /// Integration time step (default: 0.1).
    pub tick: f64,
    /// Overlap radius: closer pairs only repel, with doubled strength (default: 2.0).
    pub olradius: f64,
    /// Velocity damping factor applied every tick (default: 0.9).
    pub viscous: f64,
    /// Upper bound for each velocity component (default: 20.0).
    pub max_velocity: f64,
    /// Layout width; the center is at `width / 2` (default: 100.0).
    pub width: f64,
    /// Layout height; the center is at `height / 2` (default: 100.0).
    pub height: f64,
    /// Use logarithmic attraction (default: false).
    pub linlog: bool,
    /// Dampen attraction by the node's own degree (default: false).
    pub dissuade_hubs: bool,
    /// Seed for the initial placement jitter. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            k_g: 1.0,
            k_r: 1.0,
            ips_w: 0.5,
            tick: 0.1,
            olradius: 2.0,
            viscous: 0.9,
            max_velocity: 20.0,
            width: 100.0,
            height: 100.0,
            linlog: false,
            dissuade_hubs: false,
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Attraction law selected by the mode flags. `linlog` wins over
    /// `dissuade_hubs` when both are set.
    pub fn attraction_mode(&self) -> AttractionMode {
        if self.linlog {
            AttractionMode::LinLog
        } else if self.dissuade_hubs {
            AttractionMode::DissuadeHubs
        } else {
            AttractionMode::Linear
        }
    }

    /// Center of the layout bounding box.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Check that every numeric field is finite and the time step is positive.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("k_g", self.k_g),
            ("k_r", self.k_r),
            ("ips_w", self.ips_w),
            ("tick", self.tick),
            ("olradius", self.olradius),
            ("viscous", self.viscous),
            ("max_velocity", self.max_velocity),
            ("width", self.width),
            ("height", self.height),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(LayoutError::InvalidConfiguration {
                    field,
                    reason: format!("must be finite, got {value}"),
                });
            }
        }
        if self.tick <= 0.0 {
            return Err(LayoutError::InvalidConfiguration {
                field: "tick",
                reason: format!("must be positive, got {}", self.tick),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.k_g, 1.0);
        assert_eq!(config.k_r, 1.0);
        assert_eq!(config.ips_w, 0.5);
        assert_eq!(config.tick, 0.1);
        assert_eq!(config.olradius, 2.0);
        assert_eq!(config.viscous, 0.9);
        assert_eq!(config.max_velocity, 20.0);
        assert_eq!(config.center(), (50.0, 50.0));
        assert_eq!(config.attraction_mode(), AttractionMode::Linear);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_linlog_wins_over_dissuade_hubs() {
        let config = LayoutConfig {
            linlog: true,
            dissuade_hubs: true,
            ..Default::default()
        };
        assert_eq!(config.attraction_mode(), AttractionMode::LinLog);

        let config = LayoutConfig {
            dissuade_hubs: true,
            ..Default::default()
        };
        assert_eq!(config.attraction_mode(), AttractionMode::DissuadeHubs);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = LayoutConfig {
            k_r: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfiguration { field: "k_r", .. })
        ));

        let config = LayoutConfig {
            width: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfiguration { field: "width", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_tick() {
        let config = LayoutConfig {
            tick: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfiguration { field: "tick", .. })
        ));
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let config: LayoutConfig = serde_json::from_str(
            r#"{ "kG": 0.0, "ipsW": 1.0, "maxVelocity": 5.0, "dissuadeHubs": true, "seed": 7 }"#,
        )
        .unwrap();

        assert_eq!(config.k_g, 0.0);
        assert_eq!(config.ips_w, 1.0);
        assert_eq!(config.max_velocity, 5.0);
        assert!(config.dissuade_hubs);
        assert_eq!(config.seed, Some(7));
        // untouched keys keep their defaults
        assert_eq!(config.k_r, 1.0);
        assert_eq!(config.olradius, 2.0);
    }
}
