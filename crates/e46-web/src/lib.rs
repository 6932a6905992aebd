//! E46 Web - browser frontend for the BMW E46 showcase page
//!
//! Mounts the page widgets (engine and design tabs, scroll reveal, lazy
//! images, lightbox, back-to-top) and runs the Bevy viewer in the page's
//! canvas. `exportJSON` and `closeLightbox` are exported for inline handlers.

mod app;
mod back_to_top;
mod config;
mod dom;
mod error;
mod export;
mod lightbox;
mod page;
mod perf_panel;
mod reveal;
mod tabs;
mod warning;

use e46_core::SpecDataset;
use wasm_bindgen::prelude::*;

pub use error::PageError;

use crate::page::{with_page, Page};

/// Entry point for WASM module
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Filter wgpu noise unless ?log= asks for more
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(config::log_level())
            .build(),
    );

    let config = config::load();

    match SpecDataset::builtin() {
        Ok(dataset) => match Page::mount(&config, dataset).and_then(Page::install) {
            Ok(()) => {}
            Err(e) => tracing::error!("Failed to mount page: {}", e),
        },
        Err(e) => tracing::error!("Built-in engine data is invalid: {}", e),
    }

    if let Err(e) = app::run(&config) {
        tracing::error!("Failed to start 3D viewer: {}", e);
    }
}

/// Download the spec sheet as JSON
#[wasm_bindgen(js_name = exportJSON)]
pub fn export_json() -> Result<(), JsValue> {
    match with_page(|page| page.export_json()) {
        Some(Ok(())) => Ok(()),
        Some(Err(e)) => {
            tracing::error!("Export failed: {}", e);
            Err(JsValue::from_str(&e.to_string()))
        }
        None => Err(JsValue::from_str("Page is not mounted")),
    }
}

/// Close the gallery lightbox
#[wasm_bindgen(js_name = closeLightbox)]
pub fn close_lightbox() {
    with_page(|page| page.close_lightbox());
}
