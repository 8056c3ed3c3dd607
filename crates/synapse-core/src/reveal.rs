//! Scroll reveal timing.

use crate::config::RevealConfig;

/// Whether an element is already on screen when the page loads.
pub fn is_initially_visible(rect_top: f64, viewport_height: f64, fraction: f64) -> bool {
    rect_top < viewport_height * fraction
}

/// Delay and stagger for one card of a section reveal.
#[derive(Debug, Clone, PartialEq)]
pub struct CardTiming {
    /// Value of the `--stagger` CSS custom property.
    pub stagger: String,
    pub delay_ms: u32,
}

/// Timers for revealing the contents of a section that just became active.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRevealPlan {
    pub cards: Vec<CardTiming>,
    pub header_delay_ms: u32,
    pub map_delay_ms: u32,
}

impl SectionRevealPlan {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn new(card_count: usize, config: &RevealConfig) -> Self {
        let cards = (0..card_count)
            .map(|i| {
                let step = u32::try_from(i).unwrap_or(u32::MAX);
                CardTiming {
                    stagger: format_seconds(i as f64 * config.stagger_step_s),
                    delay_ms: config
                        .card_delay_base_ms
                        .saturating_add(step.saturating_mul(config.card_delay_step_ms)),
                }
            })
            .collect();

        Self {
            cards,
            header_delay_ms: config.header_delay_ms,
            map_delay_ms: config.map_delay_ms,
        }
    }
}

/// CSS seconds with float noise trimmed, e.g. `0.18s` rather than
/// `0.18000000000000002s`.
fn format_seconds(seconds: f64) -> String {
    let rounded = (seconds * 1_000.0).round() / 1_000.0;
    format!("{rounded}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_visibility_fraction() {
        assert!(is_initially_visible(100.0, 800.0, 0.95));
        assert!(is_initially_visible(-50.0, 800.0, 0.95));
        assert!(!is_initially_visible(760.0, 800.0, 0.95));
        assert!(!is_initially_visible(1200.0, 800.0, 0.95));
    }

    #[test]
    fn test_card_stagger() {
        let plan = SectionRevealPlan::new(4, &RevealConfig::default());

        let staggers: Vec<_> = plan.cards.iter().map(|c| c.stagger.as_str()).collect();
        assert_eq!(staggers, ["0s", "0.06s", "0.12s", "0.18s"]);

        let delays: Vec<_> = plan.cards.iter().map(|c| c.delay_ms).collect();
        assert_eq!(delays, [60, 120, 180, 240]);

        assert_eq!(plan.header_delay_ms, 30);
        assert_eq!(plan.map_delay_ms, 120);
    }

    #[test]
    fn test_empty_section() {
        let plan = SectionRevealPlan::new(0, &RevealConfig::default());
        assert!(plan.cards.is_empty());
    }
}
