//! Highlights the navigation link of the section in view.

use synapse_core::{NavConfig, NavTracker, RevealConfig, active_flags};
use web_sys::{Document, Element};

use super::{Observer, Query, reveal_section, toggle_class};
use crate::error::SetupError;

pub struct NavHandle {
    _observer: Observer,
}

/// Toggles the active class on `links` so that only the ones pointing at
/// `section_id` carry it.
pub fn mark_active(links: &[Element], hrefs: &[Option<String>], section_id: &str, class: &str) {
    for (link, active) in links.iter().zip(active_flags(hrefs, section_id)) {
        toggle_class(link, class, active);
    }
}

/// Returns `Ok(None)` when the page has no sections or no nav links.
pub fn init(
    document: &Document,
    config: &NavConfig,
    reveal: &RevealConfig,
) -> Result<Option<NavHandle>, SetupError> {
    let sections = document.query_all(&config.section_selector)?;
    let links = document.query_all(&config.link_selector)?;
    if sections.is_empty() || links.is_empty() {
        return Ok(None);
    }

    let hrefs: Vec<Option<String>> = links.iter().map(|l| l.get_attribute("href")).collect();
    let active_class = config.active_class.clone();
    let reveal = reveal.clone();
    let mut tracker = NavTracker::new();

    let observer = Observer::new(&config.root_margin, config.threshold, move |section, _| {
        let id = section.id();
        mark_active(&links, &hrefs, &id, &active_class);

        if tracker.activate(&id) {
            if let Err(err) = reveal_section(section, &reveal) {
                tracing::warn!(%err, section = %id, "section reveal failed");
            }
        }
    })?;
    for section in &sections {
        observer.observe(section);
    }

    tracing::info!(sections = sections.len(), "section navigation ready");
    Ok(Some(NavHandle {
        _observer: observer,
    }))
}
