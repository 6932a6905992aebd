//! Back-to-top button driven by the header's position

use e46_core::widgets::BackToTop;
use e46_core::DomConfig;
use js_sys::Array;
use wasm_bindgen::JsValue;
use web_sys::{Document, IntersectionObserverInit};

use crate::dom::{self, Observer};
use crate::error::PageError;

/// Show the button once the header has scrolled away, hide it when the header
/// is back at its natural position
pub fn mount_back_to_top(document: &Document, config: &DomConfig) -> Result<Observer, PageError> {
    let header = dom::query(document, &config.header)?;
    let button = dom::query(document, &config.back_to_top)?;

    // Full visibility is its own threshold so the return to the top is seen
    let options = IntersectionObserverInit::new();
    options.set_threshold(&Array::of2(&JsValue::from_f64(0.0), &JsValue::from_f64(1.0)));

    let mut state = BackToTop::default();
    let observer = Observer::new(&options, move |entries, _observer| {
        for entry in entries {
            let top = entry.bounding_client_rect().y();
            if let Some(visible) = state.observe(top, entry.is_intersecting()) {
                dom::set_class(&button, "visible", visible);
            }
        }
    })?;

    observer.observe(&header);
    Ok(observer)
}
