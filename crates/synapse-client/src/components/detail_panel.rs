//! Detail panel shown when a card on the page is selected.

use synapse_core::{DetailCatalog, DetailEntry, DetailTarget};
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::AppHandle;
use yew::prelude::*;

use crate::dom::add_class;

#[derive(Properties, PartialEq)]
pub struct DetailPanelProps {
    pub entry: DetailEntry,
}

#[function_component(DetailPanel)]
pub fn detail_panel(props: &DetailPanelProps) -> Html {
    let entry = &props.entry;
    html! {
        <>
            <h3>{ &entry.title }</h3>
            <span class={classes!("tag", entry.tag.clone(), "detail-tag")}>{ &entry.tag_text }</span>
            <p>{ &entry.desc }</p>
            <ul>
                { for entry.details.iter().map(|detail| html! { <li>{ detail }</li> }) }
            </ul>
            <div class="prereqs">
                <div class="prereqs-label">{ "Prerequisites" }</div>
                <p>{ &entry.prereqs }</p>
            </div>
        </>
    }
}

/// A catalog bound to the panel element it renders into.
pub struct DetailView {
    catalog: DetailCatalog,
    panel: Element,
    visible_class: String,
    app: Option<AppHandle<DetailPanel>>,
}

impl DetailView {
    /// Loads the catalog embedded in the page.
    ///
    /// Returns `None` when the catalog or the panel is missing, or the
    /// catalog does not parse.
    pub fn load(document: &Document, target: &DetailTarget, visible_class: &str) -> Option<Self> {
        let json = document
            .get_element_by_id(&target.catalog_id)?
            .text_content()?;
        let panel = document.get_element_by_id(&target.panel_id)?;

        let catalog = match DetailCatalog::from_json(&json) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::warn!(%err, catalog = %target.catalog_id, "skipping detail catalog");
                return None;
            }
        };
        tracing::info!(entries = catalog.len(), panel = %target.panel_id, "detail panel ready");

        Some(Self {
            catalog,
            panel,
            visible_class: visible_class.to_string(),
            app: None,
        })
    }

    /// Renders the entry for `key` and scrolls the panel into view.
    /// Unknown keys are ignored.
    pub fn show(&mut self, key: &str) -> bool {
        let Some(entry) = self.catalog.get(key).cloned() else {
            tracing::debug!(key, "no detail entry");
            return false;
        };

        let props = DetailPanelProps { entry };
        match self.app.as_mut() {
            Some(app) => app.update(props),
            None => {
                self.panel.set_inner_html("");
                self.app = Some(
                    yew::Renderer::<DetailPanel>::with_root_and_props(self.panel.clone(), props)
                        .render(),
                );
            }
        }

        add_class(&self.panel, &self.visible_class);
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Nearest);
        self.panel
            .scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}

impl Drop for DetailView {
    fn drop(&mut self) {
        if let Some(app) = self.app.take() {
            app.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn target(suffix: &str) -> DetailTarget {
        DetailTarget {
            catalog_id: format!("catalog-{suffix}"),
            panel_id: format!("panel-{suffix}"),
        }
    }

    fn mount(suffix: &str, catalog: &str) {
        let document = gloo::utils::document();
        let script = document.create_element("script").unwrap();
        script.set_attribute("type", "application/json").unwrap();
        script.set_id(&format!("catalog-{suffix}"));
        script.set_text_content(Some(catalog));
        let panel = document.create_element("div").unwrap();
        panel.set_id(&format!("panel-{suffix}"));

        let body = document.body().unwrap();
        body.append_child(&script).unwrap();
        body.append_child(&panel).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_show_known_and_unknown_keys() {
        mount("a", r#"{"attention": {"title": "Self-Attention"}}"#);
        let document = gloo::utils::document();
        let mut view = DetailView::load(&document, &target("a"), "visible").unwrap();

        assert!(!view.show("missing"));
        assert!(!view.panel.class_list().contains("visible"));

        assert!(view.show("attention"));
        assert!(view.panel.class_list().contains("visible"));
    }

    #[wasm_bindgen_test]
    fn test_drop_unmounts_panel() {
        mount("c", r#"{"attention": {"title": "Self-Attention"}}"#);
        let document = gloo::utils::document();
        let mut view = DetailView::load(&document, &target("c"), "visible").unwrap();
        assert!(view.show("attention"));

        let panel = view.panel.clone();
        drop(view);

        assert_eq!(panel.child_element_count(), 0);
    }

    #[wasm_bindgen_test]
    fn test_invalid_catalog_is_skipped() {
        mount("b", "not json");
        let document = gloo::utils::document();
        assert!(DetailView::load(&document, &target("b"), "visible").is_none());
    }

    #[wasm_bindgen_test]
    fn test_missing_panel_is_skipped() {
        let document = gloo::utils::document();
        assert!(DetailView::load(&document, &target("none"), "visible").is_none());
    }
}
