//! Scroll reveal and lazy image loading

use e46_core::widgets::{LazySource, OneShot};
use e46_core::PageConfig;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, IntersectionObserverInit};

use crate::dom::{self, Observer};
use crate::error::PageError;

/// Add `visible` to each reveal element the first time enough of it shows
pub fn mount_scroll_reveal(document: &Document, config: &PageConfig) -> Result<Option<Observer>, PageError> {
    let elements = dom::query_all(document, &config.dom.reveal)?;
    if elements.is_empty() {
        return Ok(None);
    }

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.widgets.reveal_threshold));

    let mut items: Vec<(Element, OneShot)> = elements
        .iter()
        .map(|el| (el.clone(), OneShot::default()))
        .collect();

    let observer = Observer::new(&options, move |entries, observer| {
        for entry in entries {
            let target = entry.target();
            let Some((_, reveal)) = items.iter_mut().find(|(el, _)| *el == target) else {
                continue;
            };
            if reveal.observe(entry.is_intersecting()) {
                dom::set_class(&target, "visible", true);
                observer.unobserve(&target);
            }
        }
    })?;

    for element in &elements {
        observer.observe(element);
    }
    tracing::debug!("Observing {} reveal elements", elements.len());
    Ok(Some(observer))
}

/// Swap `data-src` into `src` once an image nears the viewport
pub fn mount_lazy_images(document: &Document, config: &PageConfig) -> Result<Option<Observer>, PageError> {
    let images = dom::query_all(document, &config.dom.lazy_image)?;
    if images.is_empty() {
        return Ok(None);
    }

    let options = IntersectionObserverInit::new();
    options.set_root_margin(&config.widgets.lazy_root_margin);

    let mut items: Vec<(Element, LazySource)> = images
        .iter()
        .map(|img| (img.clone(), LazySource::new(img.get_attribute("data-src"))))
        .collect();

    let observer = Observer::new(&options, move |entries, observer| {
        for entry in entries {
            let img = entry.target();
            let Some((_, source)) = items.iter_mut().find(|(el, _)| *el == img) else {
                continue;
            };
            if let Some(src) = source.observe(entry.is_intersecting()) {
                if let Err(e) = img.set_attribute("src", &src) {
                    tracing::warn!("Failed to set image source {}: {:?}", src, e);
                }
                img.remove_attribute("data-src").ok();
            }
            if source.is_done() {
                observer.unobserve(&img);
            }
        }
    })?;

    for image in &images {
        observer.observe(image);
    }
    tracing::debug!("Observing {} lazy images", images.len());
    Ok(Some(observer))
}
