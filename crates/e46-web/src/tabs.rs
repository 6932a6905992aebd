//! Engine and design tab switchers

use std::cell::RefCell;
use std::rc::Rc;

use e46_core::widgets::TabGroup;
use e46_core::DomConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::dom::{self, Listener};
use crate::error::PageError;
use crate::perf_panel::PerfPanel;

/// Tab controls paired with their group state
struct TabStrip {
    tabs: Vec<Element>,
    group: TabGroup,
}

impl TabStrip {
    fn new(tabs: Vec<Element>, attribute: &str) -> Self {
        let group = TabGroup::new(
            tabs.iter()
                .map(|tab| tab.get_attribute(attribute).unwrap_or_default()),
        );
        Self { tabs, group }
    }

    /// Activate the clicked control
    fn select(&mut self, tab: &Element) -> bool {
        let Some(index) = self.tabs.iter().position(|t| t == tab) else {
            return false;
        };
        if self.group.select_index(index).is_none() {
            return false;
        }
        self.apply();
        true
    }

    /// Activate the clicked control only if `commit` succeeds for its key
    fn select_with<E>(&mut self, tab: &Element, commit: impl FnOnce(&str) -> Result<(), E>) -> Result<(), E> {
        let Some(index) = self.tabs.iter().position(|t| t == tab) else {
            return Ok(());
        };
        if self.group.try_select_index(index, commit)?.is_some() {
            self.apply();
        }
        Ok(())
    }

    fn apply(&self) {
        for (i, tab) in self.tabs.iter().enumerate() {
            dom::set_class(tab, "active", self.group.is_active_index(i));
        }
    }
}

/// Wire the engine tab strip to the performance panel
///
/// The preset engine is rendered straight away. A chip only becomes active
/// once its cards rendered, so the active chip always matches the panel.
pub fn mount_engine_tabs(
    document: &Document,
    config: &DomConfig,
    default_engine: &str,
    panel: Rc<PerfPanel>,
) -> Result<Listener, PageError> {
    let strip_element = dom::element_by_id(document, &config.engine_tabs)?;
    let chips = dom::query_all_in(&strip_element, &config.engine_tab)?;
    let mut strip = TabStrip::new(chips, "data-engine");

    match panel.render(default_engine) {
        Ok(()) if strip.group.select(default_engine).is_some() => strip.apply(),
        Ok(()) => tracing::warn!("No engine tab for preset engine {}", default_engine),
        Err(e) => tracing::warn!("Failed to render preset engine: {}", e),
    }

    let strip = RefCell::new(strip);
    let selector = config.engine_tab.clone();
    Listener::new(&strip_element, "click", move |event| {
        let Some(chip) = dom::closest(&event, &selector) else {
            return;
        };
        if let Err(e) = strip.borrow_mut().select_with(&chip, |key| panel.render(key)) {
            tracing::warn!("Engine tab not switched: {}", e);
        }
    })
}

/// Wire the design tabs to their content panels
pub fn mount_design_tabs(document: &Document, config: &DomConfig) -> Result<Vec<Listener>, PageError> {
    let tabs = dom::query_all(document, &config.design_tab)?;
    let panels = dom::query_all(document, &config.design_panel)?;
    if tabs.is_empty() {
        return Ok(Vec::new());
    }

    let strip = Rc::new(RefCell::new(TabStrip::new(tabs.clone(), "data-design-tab")));
    let panels = Rc::new(panels);

    tabs.iter()
        .map(|tab| {
            let strip = strip.clone();
            let panels = panels.clone();
            let tab_clone = tab.clone();
            Listener::new(tab, "click", move |_event| {
                let mut strip = strip.borrow_mut();
                if !strip.select(&tab_clone) {
                    return;
                }
                for panel in panels.iter() {
                    let name = panel.get_attribute("data-panel").unwrap_or_default();
                    if let Some(panel) = panel.dyn_ref::<HtmlElement>() {
                        panel.set_hidden(strip.group.panel_hidden(&name));
                    }
                }
            })
        })
        .collect()
}
