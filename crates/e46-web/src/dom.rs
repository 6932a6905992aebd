//! DOM lookups and subscription handles
//!
//! [`Listener`] and [`Observer`] own their JS callbacks and unsubscribe when
//! dropped, so a widget's wiring lives exactly as long as the value holding it.

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, NodeList, Window,
};

use crate::error::PageError;

pub fn window() -> Result<Window, PageError> {
    web_sys::window().ok_or(PageError::NoWindow)
}

pub fn document() -> Result<Document, PageError> {
    window()?.document().ok_or(PageError::NoDocument)
}

pub fn element_by_id(document: &Document, id: &str) -> Result<Element, PageError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PageError::MissingElement(format!("#{}", id)))
}

/// First element matching `selector`
pub fn query(document: &Document, selector: &str) -> Result<Element, PageError> {
    document
        .query_selector(selector)?
        .ok_or_else(|| PageError::MissingElement(selector.to_string()))
}

/// All elements matching `selector`, in document order
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, PageError> {
    Ok(collect_elements(&document.query_selector_all(selector)?))
}

/// All descendants of `root` matching `selector`
pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, PageError> {
    Ok(collect_elements(&root.query_selector_all(selector)?))
}

fn collect_elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Element an event was dispatched to
pub fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Nearest ancestor-or-self of the event target matching `selector`
pub fn closest(event: &Event, selector: &str) -> Option<Element> {
    event_element(event)?.closest(selector).ok().flatten()
}

/// Flip a class on or off
pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        tracing::warn!("Failed to toggle class {}: {:?}", class, e);
    }
}

/// An event listener that is removed when dropped
pub struct Listener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<Self, PageError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref())
            .ok();
    }
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An intersection observer that disconnects when dropped
pub struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Observer {
    pub fn new<F>(options: &IntersectionObserverInit, mut handler: F) -> Result<Self, PageError>
    where
        F: FnMut(Vec<IntersectionObserverEntry>, &IntersectionObserver) + 'static,
    {
        let callback: ObserverCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .collect();
            handler(entries, &observer);
        });
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), options)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
