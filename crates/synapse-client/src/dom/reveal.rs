//! Scroll-triggered reveal animations.

use gloo::timers::callback::Timeout;
use synapse_core::{RevealConfig, SectionRevealPlan, is_initially_visible};
use web_sys::{Document, Element};

use super::{Observer, Query, add_class, set_style_property};
use crate::error::SetupError;

/// Keeps the reveal observer and the pending initial check alive.
pub struct RevealHandle {
    _observer: Observer,
    _initial_check: Timeout,
}

/// Observes every reveal element and marks it visible once it scrolls into
/// view. Returns `Ok(None)` when the page has no reveal elements.
pub fn init(document: &Document, config: &RevealConfig) -> Result<Option<RevealHandle>, SetupError> {
    let elements = document.query_all(&config.selector)?;
    if elements.is_empty() {
        return Ok(None);
    }

    let observer = {
        let visible = config.visible_class.clone();
        Observer::new(&config.root_margin, config.threshold, move |target, observer| {
            add_class(target, &visible);
            observer.unobserve(target);
        })?
    };
    for element in &elements {
        observer.observe(element);
    }

    tracing::info!(count = elements.len(), "scroll reveals ready");

    // Elements already on screen (the header) are revealed once layout has
    // settled, without waiting for an intersection change.
    let initial_check = {
        let visible = config.visible_class.clone();
        let fraction = config.initial_viewport_fraction;
        Timeout::new(config.initial_check_delay_ms, move || {
            let height = gloo::utils::window()
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0);
            for element in &elements {
                let top = element.get_bounding_client_rect().top();
                if is_initially_visible(top, height, fraction) {
                    add_class(element, &visible);
                }
            }
        })
    };

    Ok(Some(RevealHandle {
        _observer: observer,
        _initial_check: initial_check,
    }))
}

/// Replays the staggered reveal for the cards, header and concept maps of
/// a section that just became active.
pub fn reveal_section(section: &Element, config: &RevealConfig) -> Result<(), SetupError> {
    let cards = section.query_all(&config.card_selector)?;
    let plan = SectionRevealPlan::new(cards.len(), config);
    let reveal_class = config.selector.trim_start_matches('.');

    for (card, timing) in cards.into_iter().zip(plan.cards) {
        add_class(&card, reveal_class);
        set_style_property(&card, "--stagger", &timing.stagger);
        show_later(card, timing.delay_ms, &config.visible_class);
    }

    if let Some(header) = section.query(&config.header_selector)? {
        add_class(&header, reveal_class);
        show_later(header, plan.header_delay_ms, &config.visible_class);
    }

    for map in section.query_all(&config.map_selector)? {
        add_class(&map, reveal_class);
        show_later(map, plan.map_delay_ms, &config.visible_class);
    }

    tracing::debug!(section = %section.id(), "section reveal scheduled");
    Ok(())
}

fn show_later(element: Element, delay_ms: u32, visible_class: &str) {
    let visible = visible_class.to_string();
    Timeout::new(delay_ms, move || add_class(&element, &visible)).forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_no_reveal_elements_is_noop() {
        let document = gloo::utils::document();
        let config = RevealConfig {
            selector: ".reveal-none-on-this-page".to_string(),
            ..RevealConfig::default()
        };
        assert!(init(&document, &config).unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn test_reveal_section_marks_and_staggers() {
        let document = gloo::utils::document();
        let section = document.create_element("section").unwrap();
        section.set_inner_html(
            r#"<div class="section-header"></div>
               <div class="card"></div><div class="card"></div>
               <div class="concept-map"></div>"#,
        );
        document.body().unwrap().append_child(&section).unwrap();

        reveal_section(&section, &RevealConfig::default()).unwrap();

        let cards = section.query_all(".card").unwrap();
        assert!(cards.iter().all(|c| c.class_list().contains("reveal")));
        let second = cards[1].get_attribute("style").unwrap_or_default();
        assert!(second.contains("--stagger: 0.06s"));

        let header = section.query(".section-header").unwrap().unwrap();
        assert!(header.class_list().contains("reveal"));
        // Visibility is applied by timers.
        assert!(!header.class_list().contains("visible"));
    }
}
