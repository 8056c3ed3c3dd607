//! Page configuration.
//!
//! Every tunable constant and DOM selector lives here so pages can override
//! them without touching the simulation or the bindings.

use serde::{Deserialize, Serialize};

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("`{field}` must be within [0, 1], got {value}")]
    NotProbability { field: &'static str, value: f64 },
    #[error("min_nodes ({min}) is greater than max_nodes ({max})")]
    NodeRange { min: usize, max: usize },
    #[error("pulse_interval_frames must be at least 1")]
    ZeroInterval,
}

/// Tunables for the animated particle background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub min_nodes: usize,
    pub max_nodes: usize,
    /// Viewport area (CSS px²) per node before clamping.
    pub area_per_node: f64,
    pub max_dpr: f64,

    pub max_initial_speed: f64,
    pub radius_min: f64,
    pub radius_spread: f64,
    pub base_alpha_min: f64,
    pub base_alpha_spread: f64,
    pub violet_probability: f64,

    pub wrap_margin: f64,
    pub jitter_probability: f64,
    pub jitter_amount: f64,
    pub max_speed: f64,

    pub pointer_radius: f64,
    pub pointer_glow: f64,

    pub pulse_decay: f64,
    pub pulse_floor: f64,
    pub pulse_interval_frames: u64,

    pub link_distance: f64,
    pub link_alpha: f64,
    pub link_pulse_boost: f64,
    pub link_width: f64,

    pub spread_radius: f64,
    pub spread_falloff: f64,
    pub spread_min_strength: f64,
    /// Delay in milliseconds per pixel of distance between neighbours.
    pub spread_delay_per_px: f64,

    pub grid_spacing: f64,
    pub grid_alpha: f64,
    pub grid_width: f64,

    pub glow_threshold: f64,
    pub glow_scale: f64,
    pub glow_alpha: f64,
    pub pulse_alpha_gain: f64,
    pub pulse_radius_gain: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            min_nodes: 25,
            max_nodes: 70,
            area_per_node: 18_000.0,
            max_dpr: 2.0,

            max_initial_speed: 0.125,
            radius_min: 1.2,
            radius_spread: 1.8,
            base_alpha_min: 0.12,
            base_alpha_spread: 0.2,
            violet_probability: 0.25,

            wrap_margin: 10.0,
            jitter_probability: 0.005,
            jitter_amount: 0.025,
            max_speed: 0.4,

            pointer_radius: 200.0,
            pointer_glow: 0.3,

            pulse_decay: 0.96,
            pulse_floor: 0.01,
            pulse_interval_frames: 480,

            link_distance: 130.0,
            link_alpha: 0.06,
            link_pulse_boost: 0.08,
            link_width: 0.5,

            spread_radius: 150.0,
            spread_falloff: 0.6,
            spread_min_strength: 0.1,
            spread_delay_per_px: 2.0,

            grid_spacing: 80.0,
            grid_alpha: 0.018,
            grid_width: 0.5,

            glow_threshold: 0.15,
            glow_scale: 4.0,
            glow_alpha: 0.3,
            pulse_alpha_gain: 0.5,
            pulse_radius_gain: 2.0,
        }
    }
}

impl FieldConfig {
    /// Parses a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_nodes > self.max_nodes {
            return Err(ConfigError::NodeRange {
                min: self.min_nodes,
                max: self.max_nodes,
            });
        }
        if self.pulse_interval_frames == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        let positive = [
            ("area_per_node", self.area_per_node),
            ("max_dpr", self.max_dpr),
            ("max_speed", self.max_speed),
            ("pointer_radius", self.pointer_radius),
            ("link_distance", self.link_distance),
            ("spread_radius", self.spread_radius),
            ("spread_min_strength", self.spread_min_strength),
            ("grid_spacing", self.grid_spacing),
            ("glow_scale", self.glow_scale),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("max_initial_speed", self.max_initial_speed),
            ("radius_min", self.radius_min),
            ("radius_spread", self.radius_spread),
            ("jitter_amount", self.jitter_amount),
            ("pulse_radius_gain", self.pulse_radius_gain),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let probabilities = [
            ("violet_probability", self.violet_probability),
            ("jitter_probability", self.jitter_probability),
            ("pulse_decay", self.pulse_decay),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotProbability { field, value });
            }
        }

        Ok(())
    }
}

/// Scroll reveal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub visible_class: String,
    pub threshold: f64,
    pub root_margin: String,
    pub initial_check_delay_ms: u32,
    /// Elements whose top is above this fraction of the viewport height
    /// are revealed by the initial check.
    pub initial_viewport_fraction: f64,

    pub card_selector: String,
    pub header_selector: String,
    pub map_selector: String,
    pub stagger_step_s: f64,
    pub card_delay_base_ms: u32,
    pub card_delay_step_ms: u32,
    pub header_delay_ms: u32,
    pub map_delay_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".reveal".to_string(),
            visible_class: "visible".to_string(),
            threshold: 0.08,
            root_margin: "0px 0px -40px 0px".to_string(),
            initial_check_delay_ms: 100,
            initial_viewport_fraction: 0.95,

            card_selector: ".card, .roadmap-step, .timeline-item".to_string(),
            header_selector: ".section-header".to_string(),
            map_selector: ".concept-map".to_string(),
            stagger_step_s: 0.06,
            card_delay_base_ms: 60,
            card_delay_step_ms: 60,
            header_delay_ms: 30,
            map_delay_ms: 120,
        }
    }
}

/// Active-section navigation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub section_selector: String,
    pub link_selector: String,
    pub active_class: String,
    pub root_margin: String,
    pub threshold: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            section_selector: "main > section, .curriculum-section".to_string(),
            link_selector: ".nav-btn".to_string(),
            active_class: "active".to_string(),
            root_margin: "-20% 0px -75% 0px".to_string(),
            threshold: 0.0,
        }
    }
}

/// Selectors for the tabbed step-through widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperSelectors {
    pub root: String,
    pub tab: String,
    pub step: String,
    pub prev: String,
    pub next: String,
    pub indicator: String,
    pub active_class: String,
}

impl Default for StepperSelectors {
    fn default() -> Self {
        Self {
            root: ".stepper".to_string(),
            tab: ".stepper-tab".to_string(),
            step: ".stepper-step".to_string(),
            prev: ".step-prev".to_string(),
            next: ".step-next".to_string(),
            indicator: ".stepper-indicator".to_string(),
            active_class: "active".to_string(),
        }
    }
}

/// A JSON catalog embedded in the page and the panel it renders into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailTarget {
    pub catalog_id: String,
    pub panel_id: String,
}

/// Detail panel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    pub overview: DetailTarget,
    pub concept: DetailTarget,
    pub visible_class: String,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            overview: DetailTarget {
                catalog_id: "overview-details".to_string(),
                panel_id: "detail-panel".to_string(),
            },
            concept: DetailTarget {
                catalog_id: "concept-details".to_string(),
                panel_id: "concept-detail-panel".to_string(),
            },
            visible_class: "visible".to_string(),
        }
    }
}

/// Everything the client needs to wire up a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub canvas_id: String,
    pub field: FieldConfig,
    pub reveal: RevealConfig,
    pub nav: NavConfig,
    pub stepper: StepperSelectors,
    pub detail: DetailConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            canvas_id: "neural-canvas".to_string(),
            field: FieldConfig::default(),
            reveal: RevealConfig::default(),
            nav: NavConfig::default(),
            stepper: StepperSelectors::default(),
            detail: DetailConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_field_config_is_valid() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = FieldConfig::from_json(r#"{"link_distance": 100.0, "max_nodes": 40}"#).unwrap();
        assert!((config.link_distance - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.max_nodes, 40);
        assert_eq!(config.min_nodes, 25);
        assert_eq!(config.pulse_interval_frames, 480);
    }

    #[test]
    fn test_rejects_inverted_node_range() {
        let err = FieldConfig::from_json(r#"{"min_nodes": 80}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NodeRange { min: 80, max: 70 }));
    }

    #[test]
    fn test_rejects_non_positive_distance() {
        let err = FieldConfig::from_json(r#"{"spread_radius": 0.0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "spread_radius",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_max_speed() {
        let err = FieldConfig::from_json(r#"{"max_speed": -0.4, "jitter_probability": 1.0}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotPositive {
                field: "max_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_radius() {
        let err = FieldConfig::from_json(r#"{"radius_min": -1.0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Negative {
                field: "radius_min",
                ..
            }
        ));

        let err = FieldConfig::from_json(r#"{"jitter_amount": -0.1}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Negative {
                field: "jitter_amount",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = FieldConfig::from_json(r#"{"jitter_probability": 1.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NotProbability { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = FieldConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_page_config_defaults() {
        let config = PageConfig::default();
        assert_eq!(config.canvas_id, "neural-canvas");
        assert_eq!(config.nav.root_margin, "-20% 0px -75% 0px");
        assert_eq!(config.reveal.selector, ".reveal");
        assert_eq!(config.detail.concept.panel_id, "concept-detail-panel");
    }
}
