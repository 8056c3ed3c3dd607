//! Active-section navigation highlighting.

use std::collections::HashSet;

/// The link `href` that points at a section id.
pub fn section_href(id: &str) -> String {
    format!("#{id}")
}

/// One flag per link: `true` for links pointing at `section_id`.
pub fn active_flags<S: AsRef<str>>(hrefs: &[Option<S>], section_id: &str) -> Vec<bool> {
    let target = section_href(section_id);
    hrefs
        .iter()
        .map(|href| matches!(href, Some(href) if <S as AsRef<str>>::as_ref(href) == target))
        .collect()
}

/// Remembers which sections have been activated at least once.
#[derive(Debug, Clone, Default)]
pub struct NavTracker {
    current: Option<String>,
    seen: HashSet<String>,
}

impl NavTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `section_id` as the active section.
    ///
    /// Returns `true` the first time a section is activated.
    pub fn activate(&mut self, section_id: &str) -> bool {
        self.current = Some(section_id.to_string());
        self.seen.insert(section_id.to_string())
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_flags_match_exact_href() {
        let hrefs = [
            Some("#intro"),
            Some("#attention"),
            None,
            Some("#attention-heads"),
            Some("attention"),
        ];
        assert_eq!(
            active_flags(&hrefs, "attention"),
            vec![false, true, false, false, false]
        );
    }

    #[test]
    fn test_no_match_clears_all() {
        let hrefs = [Some("#a".to_string()), Some("#b".to_string())];
        assert_eq!(active_flags(&hrefs, "c"), vec![false, false]);
    }

    #[test]
    fn test_tracker_reports_first_activation() {
        let mut tracker = NavTracker::new();
        assert!(tracker.activate("intro"));
        assert!(tracker.activate("attention"));
        assert!(!tracker.activate("intro"));
        assert_eq!(tracker.current(), Some("intro"));
    }
}
