//! Pulse propagation across the particle field.
//!
//! A pulse wave starts at one node and spreads to every neighbour within
//! `spread_radius`, losing strength with distance and arriving after a delay
//! proportional to distance. Each wave keeps its own visited set, so a node
//! lights up at most once per wave; the first arrival wins.
//!
//! Spreads are queued by due time and delivered by the animation loop
//! instead of arming one timer per hop.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use crate::config::FieldConfig;
use crate::field::Node;

pub type WaveId = u64;

#[derive(Debug, Clone)]
struct Wave {
    visited: Vec<bool>,
    /// Spreads of this wave still in the queue.
    pending: usize,
}

#[derive(Debug, Clone)]
struct PendingSpread {
    due_ms: f64,
    seq: u64,
    wave: WaveId,
    node: usize,
    strength: f64,
}

impl PartialEq for PendingSpread {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PendingSpread {}

impl PartialOrd for PendingSpread {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingSpread {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_ms
            .total_cmp(&other.due_ms)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Queue of in-flight pulse waves.
#[derive(Debug, Clone, Default)]
pub struct PulseScheduler {
    queue: BinaryHeap<Reverse<PendingSpread>>,
    waves: HashMap<WaveId, Wave>,
    next_wave: WaveId,
    next_seq: u64,
}

impl PulseScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new wave at full strength from `seed`.
    ///
    /// Returns `None` if `seed` is out of range.
    pub fn start_wave(
        &mut self,
        nodes: &mut [Node],
        seed: usize,
        now_ms: f64,
        config: &FieldConfig,
    ) -> Option<WaveId> {
        if seed >= nodes.len() {
            return None;
        }

        let id = self.next_wave;
        self.next_wave += 1;
        self.waves.insert(
            id,
            Wave {
                visited: vec![false; nodes.len()],
                pending: 0,
            },
        );

        self.spread(nodes, id, seed, 1.0, now_ms, config);
        self.release_if_done(id);

        tracing::debug!(wave = id, seed, "pulse wave started");
        Some(id)
    }

    /// Delivers every spread due at or before `now_ms`.
    ///
    /// Follow-up spreads are timed from the due time of the spread that
    /// caused them, so they may be delivered within the same call.
    pub fn deliver_due(&mut self, nodes: &mut [Node], now_ms: f64, config: &FieldConfig) {
        while let Some(Reverse(next)) = self.queue.peek() {
            if next.due_ms > now_ms {
                break;
            }
            let Some(Reverse(pending)) = self.queue.pop() else {
                break;
            };

            if let Some(wave) = self.waves.get_mut(&pending.wave) {
                wave.pending -= 1;
            }
            self.spread(
                nodes,
                pending.wave,
                pending.node,
                pending.strength,
                pending.due_ms,
                config,
            );
            self.release_if_done(pending.wave);
        }
    }

    /// Drops all waves, e.g. after the node list was rebuilt.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.waves.clear();
    }

    /// Number of queued spreads across all waves.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of waves that still have queued spreads.
    pub fn active_waves(&self) -> usize {
        self.waves.len()
    }

    fn spread(
        &mut self,
        nodes: &mut [Node],
        wave_id: WaveId,
        index: usize,
        strength: f64,
        at_ms: f64,
        config: &FieldConfig,
    ) {
        let Some(wave) = self.waves.get_mut(&wave_id) else {
            return;
        };
        if strength < config.spread_min_strength || index >= nodes.len() || wave.visited[index] {
            return;
        }

        wave.visited[index] = true;
        let origin = &mut nodes[index];
        origin.pulse = origin.pulse.max(strength);
        let (ox, oy) = (origin.x, origin.y);

        let radius_sq = config.spread_radius * config.spread_radius;
        for (j, node) in nodes.iter().enumerate() {
            if wave.visited[j] {
                continue;
            }
            let dx = ox - node.x;
            let dy = oy - node.y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq >= radius_sq {
                continue;
            }

            let dist = dist_sq.sqrt();
            let decay = (1.0 - dist / config.spread_radius) * config.spread_falloff;
            let next_strength = strength * decay;
            // Would be rejected on delivery anyway.
            if next_strength < config.spread_min_strength {
                continue;
            }

            wave.pending += 1;
            self.queue.push(Reverse(PendingSpread {
                due_ms: at_ms + dist * config.spread_delay_per_px,
                seq: self.next_seq,
                wave: wave_id,
                node: j,
                strength: next_strength,
            }));
            self.next_seq += 1;
        }
    }

    fn release_if_done(&mut self, wave_id: WaveId) {
        if self
            .waves
            .get(&wave_id)
            .is_some_and(|wave| wave.pending == 0)
        {
            self.waves.remove(&wave_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(xs: &[f64]) -> Vec<Node> {
        xs.iter().map(|&x| Node::at(x, 0.0)).collect()
    }

    #[test]
    fn test_seed_lights_immediately() {
        let config = FieldConfig::default();
        let mut nodes = line(&[0.0, 100.0, 1000.0]);
        let mut scheduler = PulseScheduler::new();

        scheduler.start_wave(&mut nodes, 0, 0.0, &config).unwrap();

        assert!((nodes[0].pulse - 1.0).abs() < f64::EPSILON);
        assert!(nodes[1].pulse.abs() < f64::EPSILON);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.active_waves(), 1);
    }

    #[test]
    fn test_spread_arrives_after_distance_delay() {
        let config = FieldConfig::default();
        let mut nodes = line(&[0.0, 100.0, 1000.0]);
        let mut scheduler = PulseScheduler::new();
        scheduler.start_wave(&mut nodes, 0, 0.0, &config);

        // 100px at 2ms/px
        scheduler.deliver_due(&mut nodes, 199.0, &config);
        assert!(nodes[1].pulse.abs() < f64::EPSILON);

        scheduler.deliver_due(&mut nodes, 200.0, &config);
        // (1 - 100/150) * 0.6
        assert!((nodes[1].pulse - 0.2).abs() < 1e-9);
        assert!(nodes[2].pulse.abs() < f64::EPSILON);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.active_waves(), 0);
    }

    #[test]
    fn test_weak_spreads_are_not_queued() {
        let config = FieldConfig::default();
        // 140px away: (1 - 140/150) * 0.6 = 0.04 < 0.1
        let mut nodes = line(&[0.0, 140.0]);
        let mut scheduler = PulseScheduler::new();
        scheduler.start_wave(&mut nodes, 0, 0.0, &config);

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.active_waves(), 0);
    }

    #[test]
    fn test_first_arrival_wins() {
        let config = FieldConfig::default();
        let mut nodes = line(&[0.0, 30.0, 60.0]);
        let mut scheduler = PulseScheduler::new();
        scheduler.start_wave(&mut nodes, 0, 0.0, &config);

        scheduler.deliver_due(&mut nodes, 1_000.0, &config);

        // direct hop 0 -> 2: (1 - 60/150) * 0.6 = 0.36, due at 120ms
        // relayed 0 -> 1 -> 2: 0.48 * 0.48 = 0.2304, also due at 120ms but queued later
        assert!((nodes[1].pulse - 0.48).abs() < 1e-9);
        assert!((nodes[2].pulse - 0.36).abs() < 1e-9);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_chained_spreads_deliver_in_one_call() {
        let config = FieldConfig::default();
        let mut nodes = line(&[0.0, 20.0, 40.0, 60.0, 80.0]);
        let mut scheduler = PulseScheduler::new();
        scheduler.start_wave(&mut nodes, 0, 0.0, &config);

        scheduler.deliver_due(&mut nodes, 10_000.0, &config);

        assert!(nodes.iter().all(|n| n.pulse > 0.0));
        assert_eq!(scheduler.active_waves(), 0);
    }

    #[test]
    fn test_waves_are_independent() {
        let config = FieldConfig::default();
        let mut nodes = line(&[0.0, 100.0]);
        let mut scheduler = PulseScheduler::new();

        scheduler.start_wave(&mut nodes, 0, 0.0, &config);
        scheduler.start_wave(&mut nodes, 1, 0.0, &config);
        assert_eq!(scheduler.active_waves(), 2);

        // Both seeds were lit directly; the cross spreads keep the max.
        scheduler.deliver_due(&mut nodes, 200.0, &config);
        assert!((nodes[0].pulse - 1.0).abs() < f64::EPSILON);
        assert!((nodes[1].pulse - 1.0).abs() < f64::EPSILON);
        assert_eq!(scheduler.active_waves(), 0);
    }

    #[test]
    fn test_out_of_range_seed() {
        let config = FieldConfig::default();
        let mut nodes = line(&[0.0]);
        let mut scheduler = PulseScheduler::new();
        assert!(scheduler.start_wave(&mut nodes, 3, 0.0, &config).is_none());
        assert_eq!(scheduler.active_waves(), 0);
    }

    #[test]
    fn test_clear_drops_pending() {
        let config = FieldConfig::default();
        let mut nodes = line(&[0.0, 50.0, 100.0]);
        let mut scheduler = PulseScheduler::new();
        scheduler.start_wave(&mut nodes, 1, 0.0, &config);
        assert!(scheduler.pending() > 0);

        scheduler.clear();
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.active_waves(), 0);
    }
}
