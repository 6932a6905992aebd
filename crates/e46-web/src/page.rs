//! Page widgets and their lifetime
//!
//! [`Page::mount`] wires every DOM widget that finds its elements. A widget
//! whose markup is missing is logged and skipped; the others still mount.
//! The mounted page is kept in a thread-local until the document is unloaded,
//! when dropping it removes all listeners and disconnects all observers. A
//! `pagehide` into the back/forward cache keeps it, so a restored page is
//! still wired.

use std::cell::RefCell;
use std::rc::Rc;

use e46_core::{PageConfig, SpecDataset};
use wasm_bindgen::JsCast;
use web_sys::PageTransitionEvent;

use crate::back_to_top::mount_back_to_top;
use crate::dom::{self, Listener, Observer};
use crate::error::PageError;
use crate::export::download_specs;
use crate::lightbox::{mount_lightbox, LightboxHandle};
use crate::perf_panel::PerfPanel;
use crate::reveal::{mount_lazy_images, mount_scroll_reveal};
use crate::tabs::{mount_design_tabs, mount_engine_tabs};

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    /// The `pagehide` handler; it must outlive the page it tears down
    static TEARDOWN: RefCell<Option<Listener>> = const { RefCell::new(None) };
}

/// What a `pagehide` means for the mounted widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HideAction {
    /// Entering the back/forward cache; the page may be shown again
    Keep,
    TearDown,
}

impl HideAction {
    fn for_hide(persisted: bool) -> Self {
        if persisted {
            HideAction::Keep
        } else {
            HideAction::TearDown
        }
    }
}

pub struct Page {
    dataset: Rc<SpecDataset>,
    export_filename: String,
    lightbox: Option<LightboxHandle>,
    _listeners: Vec<Listener>,
    _observers: Vec<Observer>,
}

impl Page {
    pub fn mount(config: &PageConfig, dataset: SpecDataset) -> Result<Self, PageError> {
        let document = dom::document()?;
        let dataset = Rc::new(dataset);
        let mut listeners = Vec::new();
        let mut observers = Vec::new();

        let engine_tabs = PerfPanel::new(&document, &config.dom.perf_cards, dataset.clone())
            .map(Rc::new)
            .and_then(|panel| {
                mount_engine_tabs(&document, &config.dom, &config.widgets.default_engine, panel)
            });
        match engine_tabs {
            Ok(listener) => listeners.push(listener),
            Err(e) => tracing::warn!("Engine tabs not mounted: {}", e),
        }

        match mount_design_tabs(&document, &config.dom) {
            Ok(tabs) => listeners.extend(tabs),
            Err(e) => tracing::warn!("Design tabs not mounted: {}", e),
        }

        for (name, mounted) in [
            ("Scroll reveal", mount_scroll_reveal(&document, config)),
            ("Lazy images", mount_lazy_images(&document, config)),
        ] {
            match mounted {
                Ok(observer) => observers.extend(observer),
                Err(e) => tracing::warn!("{} not mounted: {}", name, e),
            }
        }

        let lightbox = match mount_lightbox(&document, &config.dom) {
            Ok((handle, lightbox_listeners)) => {
                listeners.extend(lightbox_listeners);
                Some(handle)
            }
            Err(e) => {
                tracing::warn!("Lightbox not mounted: {}", e);
                None
            }
        };

        match mount_back_to_top(&document, &config.dom) {
            Ok(observer) => observers.push(observer),
            Err(e) => tracing::warn!("Back-to-top not mounted: {}", e),
        }

        tracing::info!(
            "Page mounted with {} listeners and {} observers",
            listeners.len(),
            observers.len()
        );

        Ok(Self {
            dataset,
            export_filename: config.export.filename.clone(),
            lightbox,
            _listeners: listeners,
            _observers: observers,
        })
    }

    pub fn export_json(&self) -> Result<(), PageError> {
        download_specs(&self.dataset, &self.export_filename)
    }

    /// Close the lightbox if one was mounted and it is open
    pub fn close_lightbox(&self) {
        if let Some(lightbox) = &self.lightbox {
            lightbox.close();
        }
    }

    /// Keep the page alive until the document is unloaded
    pub fn install(self) -> Result<(), PageError> {
        PAGE.with(|page| *page.borrow_mut() = Some(self));

        let window = dom::window()?;
        let teardown = Listener::new(&window, "pagehide", |event| {
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(PageTransitionEvent::persisted);
            if HideAction::for_hide(persisted) == HideAction::Keep {
                tracing::debug!("Page cached, keeping widgets");
                return;
            }
            let page = PAGE.with(|page| page.borrow_mut().take());
            if page.is_some() {
                tracing::debug!("Tearing down page widgets");
            }
        })?;
        TEARDOWN.with(|slot| *slot.borrow_mut() = Some(teardown));
        Ok(())
    }
}

/// Run `f` against the installed page, if any
pub fn with_page<R>(f: impl FnOnce(&Page) -> R) -> Option<R> {
    PAGE.with(|page| page.borrow().as_ref().map(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_page_keeps_widgets() {
        assert_eq!(HideAction::for_hide(true), HideAction::Keep);
        assert_eq!(HideAction::for_hide(false), HideAction::TearDown);
    }
}
