//! Synapse Client
//!
//! WASM enhancements for the static learning pages: scroll reveals, active
//! section navigation, steppers, detail panels and the animated particle
//! background.
//!
//! Build with `trunk build`; on other targets only a stub binary is built.

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod error;
#[cfg(target_arch = "wasm32")]
mod page;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[cfg(target_arch = "wasm32")]
fn main() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, Layer};
    use tracing_web::MakeWebConsoleWriter;

    console_error_panic_hook::set_once();

    // `<body data-log="debug">` raises verbosity for a single page.
    let directive = gloo::utils::document()
        .body()
        .and_then(|body| body.get_attribute("data-log"))
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    if let Err(err) = page::expose_globals() {
        tracing::error!(%err, "failed to expose page functions");
    }
    page::mount_when_ready(synapse_core::PageConfig::default());
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("synapse-client runs in the browser; build it with `trunk build`");
}
