//! Yew components rendered into the static page.

mod detail_panel;

pub use detail_panel::{DetailPanel, DetailPanelProps, DetailView};
