//! Synapse Core Library
//!
//! Browser-independent logic behind the page enhancements: the animated
//! particle field with its pulse waves, stepper state, navigation and
//! reveal decisions, detail catalogs and configuration.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod config;
pub mod detail;
pub mod field;
pub mod nav;
pub mod pulse;
pub mod reveal;
pub mod stepper;
pub mod viewport;

pub use color::{Hue, Rgb};
pub use config::{
    ConfigError, DetailConfig, DetailTarget, FieldConfig, NavConfig, PageConfig, RevealConfig,
    StepperSelectors,
};
pub use detail::{CatalogError, DetailCatalog, DetailEntry};
pub use field::{Glow, GridLine, Link, NeuralField, Node, NodeSprite, node_count};
pub use nav::{NavTracker, active_flags, section_href};
pub use pulse::{PulseScheduler, WaveId};
pub use reveal::{CardTiming, SectionRevealPlan, is_initially_visible};
pub use stepper::{Stepper, StepperView};
pub use viewport::Viewport;
