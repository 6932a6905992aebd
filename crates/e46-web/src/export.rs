//! JSON spec download

use e46_core::{ExportEnvelope, SpecDataset, EXPORT_MIME_TYPE};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlElement, Url};

use crate::dom;
use crate::error::PageError;

/// Milliseconds to keep the object URL alive after the download starts
const REVOKE_DELAY_MS: i32 = 1000;

/// Build the export document and hand it to the browser as a download
pub fn download_specs(dataset: &SpecDataset, filename: &str) -> Result<(), PageError> {
    let json = ExportEnvelope::new(dataset.clone()).to_pretty_json()?;
    save_file(filename, &json, EXPORT_MIME_TYPE)?;
    tracing::info!("Exported specs as {} ({} bytes)", filename, json.len());
    Ok(())
}

fn save_file(filename: &str, content: &str, mime_type: &str) -> Result<(), PageError> {
    let window = dom::window()?;
    let document = dom::document()?;

    let parts = Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;

    // Temporary anchor to trigger the download
    let anchor = document.create_element("a")?;
    anchor.set_attribute("href", &url)?;
    anchor.set_attribute("download", filename)?;

    let body = document.body().ok_or(PageError::NoDocument)?;
    body.append_child(&anchor)?;
    if let Some(anchor) = anchor.dyn_ref::<HtmlElement>() {
        anchor.click();
    }
    body.remove_child(&anchor)?;

    let revoke = Closure::once_into_js(move || {
        Url::revoke_object_url(&url).ok();
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), REVOKE_DELAY_MS)?;
    Ok(())
}
