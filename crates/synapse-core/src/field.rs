//! The animated particle field behind the page.
//!
//! Nodes drift slowly, wrap around the viewport edges, glow near the
//! pointer, and periodically light up in pulse waves that ripple through
//! their neighbours. Rendering is left to the caller: [`NeuralField::links`],
//! [`NeuralField::sprites`] and [`NeuralField::grid_lines`] describe what to
//! draw for the current frame.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::color::{Hue, Rgb};
use crate::config::{ConfigError, FieldConfig};
use crate::pulse::{PulseScheduler, WaveId};
use crate::viewport::Viewport;

/// A single particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub base_alpha: f64,
    /// Current pulse brightness in `[0, 1]`.
    pub pulse: f64,
    pub pointer_glow: f64,
    pub hue: Hue,
}

impl Node {
    /// A motionless cyan node at `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 1.5,
            base_alpha: 0.2,
            pulse: 0.0,
            pointer_glow: 0.0,
            hue: Hue::Cyan,
        }
    }

    fn random(rng: &mut ChaCha8Rng, viewport: &Viewport, config: &FieldConfig) -> Self {
        let hue = if rng.random_bool(config.violet_probability) {
            Hue::Violet
        } else {
            Hue::Cyan
        };
        Self {
            x: rng.random::<f64>() * viewport.width,
            y: rng.random::<f64>() * viewport.height,
            vx: symmetric(rng, config.max_initial_speed),
            vy: symmetric(rng, config.max_initial_speed),
            radius: config.radius_min + rng.random::<f64>() * config.radius_spread,
            base_alpha: config.base_alpha_min + rng.random::<f64>() * config.base_alpha_spread,
            pulse: 0.0,
            pointer_glow: 0.0,
            hue,
        }
    }
}

/// Uniform sample in `[-amount, amount)`.
fn symmetric(rng: &mut ChaCha8Rng, amount: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * 2.0 * amount
}

/// A connection between two nearby nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub alpha: f64,
}

/// Soft halo drawn behind a bright node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub radius: f64,
    pub color: Rgb,
    pub alpha: f64,
}

/// How a node should be drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSprite {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgb,
    pub alpha: f64,
    pub glow: Option<Glow>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Number of nodes for a viewport of the given area.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn node_count(area: f64, config: &FieldConfig) -> usize {
    let raw = (area / config.area_per_node).floor().max(0.0) as usize;
    raw.clamp(config.min_nodes, config.max_nodes)
}

/// Particle field simulation.
#[derive(Debug, Clone)]
pub struct NeuralField {
    config: FieldConfig,
    viewport: Viewport,
    nodes: Vec<Node>,
    pointer: Option<(f64, f64)>,
    frame: u64,
    clock_ms: f64,
    rng: ChaCha8Rng,
    pulses: PulseScheduler,
}

impl NeuralField {
    /// Creates a field filled with random nodes for `viewport`.
    pub fn new(config: FieldConfig, viewport: Viewport, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut field = Self {
            config,
            viewport,
            nodes: Vec::new(),
            pointer: None,
            frame: 0,
            clock_ms: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            pulses: PulseScheduler::new(),
        };
        field.populate();
        Ok(field)
    }

    /// Creates a field with a fixed set of nodes.
    pub fn with_nodes(
        config: FieldConfig,
        viewport: Viewport,
        nodes: Vec<Node>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            viewport,
            nodes,
            pointer: None,
            frame: 0,
            clock_ms: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            pulses: PulseScheduler::new(),
        })
    }

    /// Replaces every node with a fresh random one.
    pub fn populate(&mut self) {
        let count = node_count(self.viewport.area(), &self.config);
        self.pulses.clear();
        self.nodes = (0..count)
            .map(|_| Node::random(&mut self.rng, &self.viewport, &self.config))
            .collect();
        tracing::debug!(
            count,
            width = self.viewport.width,
            height = self.viewport.height,
            "populated field"
        );
    }

    /// Adopts a new viewport. Nodes are kept; any now outside the bounds
    /// wrap back in as they drift.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some((x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Advances the simulation by one animation frame at `now_ms`.
    pub fn step(&mut self, now_ms: f64) {
        self.frame += 1;
        self.clock_ms = now_ms;

        if self.frame % self.config.pulse_interval_frames == 0 {
            self.pulse();
        }
        self.pulses
            .deliver_due(&mut self.nodes, now_ms, &self.config);

        let config = &self.config;
        let (width, height) = (self.viewport.width, self.viewport.height);
        let margin = config.wrap_margin;

        for node in &mut self.nodes {
            node.x += node.vx;
            node.y += node.vy;

            if node.x < -margin {
                node.x = width + margin;
            }
            if node.x > width + margin {
                node.x = -margin;
            }
            if node.y < -margin {
                node.y = height + margin;
            }
            if node.y > height + margin {
                node.y = -margin;
            }

            if self.rng.random_bool(config.jitter_probability) {
                node.vx = (node.vx + symmetric(&mut self.rng, config.jitter_amount))
                    .clamp(-config.max_speed, config.max_speed);
                node.vy = (node.vy + symmetric(&mut self.rng, config.jitter_amount))
                    .clamp(-config.max_speed, config.max_speed);
            }

            node.pointer_glow = match self.pointer {
                Some((px, py)) => {
                    let dist = (node.x - px).hypot(node.y - py);
                    if dist < config.pointer_radius {
                        (1.0 - dist / config.pointer_radius) * config.pointer_glow
                    } else {
                        0.0
                    }
                }
                None => 0.0,
            };

            if node.pulse > 0.0 {
                node.pulse *= config.pulse_decay;
                if node.pulse < config.pulse_floor {
                    node.pulse = 0.0;
                }
            }
        }
    }

    /// Starts a pulse wave from a random node.
    pub fn pulse(&mut self) -> Option<WaveId> {
        if self.nodes.is_empty() {
            return None;
        }
        let seed = self.rng.random_range(0..self.nodes.len());
        self.pulse_from(seed)
    }

    /// Starts a pulse wave from the node at `index`.
    pub fn pulse_from(&mut self, index: usize) -> Option<WaveId> {
        self.pulses
            .start_wave(&mut self.nodes, index, self.clock_ms, &self.config)
    }

    /// Node pairs close enough to be connected.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let max = self.config.link_distance;
        let max_sq = max * max;
        let nodes = &self.nodes;

        nodes.iter().enumerate().flat_map(move |(i, a)| {
            nodes[i + 1..].iter().filter_map(move |b| {
                let dx = a.x - b.x;
                let dy = a.y - b.y;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq >= max_sq {
                    return None;
                }
                let dist = dist_sq.sqrt();
                let alpha = (1.0 - dist / max) * self.config.link_alpha
                    + (a.pulse + b.pulse) * self.config.link_pulse_boost;
                Some(Link {
                    from: (a.x, a.y),
                    to: (b.x, b.y),
                    alpha,
                })
            })
        })
    }

    /// Per-node draw parameters.
    pub fn sprites(&self) -> impl Iterator<Item = NodeSprite> + '_ {
        let config = &self.config;
        self.nodes.iter().map(move |node| {
            let alpha = node.base_alpha + node.pointer_glow + node.pulse * config.pulse_alpha_gain;
            let radius = node.radius + node.pulse * config.pulse_radius_gain;
            let glow = (alpha > config.glow_threshold).then(|| Glow {
                radius: radius * config.glow_scale,
                color: node.hue.glow(),
                alpha: alpha * config.glow_alpha,
            });
            NodeSprite {
                x: node.x,
                y: node.y,
                radius,
                color: node.hue.core(),
                alpha,
                glow,
            }
        })
    }

    /// Background grid, vertical lines first.
    pub fn grid_lines(&self) -> impl Iterator<Item = GridLine> + '_ {
        let Viewport { width, height, .. } = self.viewport;
        let spacing = self.config.grid_spacing;

        let vertical = std::iter::successors(Some(0.0), move |x| Some(x + spacing))
            .take_while(move |x| *x < width)
            .map(move |x| GridLine {
                from: (x, 0.0),
                to: (x, height),
            });
        let horizontal = std::iter::successors(Some(0.0), move |y| Some(y + spacing))
            .take_while(move |y| *y < height)
            .map(move |y| GridLine {
                from: (0.0, y),
                to: (width, y),
            });
        vertical.chain(horizontal)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    /// Queued pulse spreads not yet delivered.
    pub fn pending_pulses(&self) -> usize {
        self.pulses.pending()
    }
}
