//! Performance card panel

use std::rc::Rc;

use e46_core::{perf_fields_for, SpecDataset, SpecField};
use web_sys::{Document, Element};

use crate::dom;
use crate::error::PageError;

/// The `#perf-cards` container and the dataset it renders from
pub struct PerfPanel {
    document: Document,
    container: Element,
    dataset: Rc<SpecDataset>,
}

impl PerfPanel {
    pub fn new(document: &Document, container_id: &str, dataset: Rc<SpecDataset>) -> Result<Self, PageError> {
        Ok(Self {
            document: document.clone(),
            container: dom::element_by_id(document, container_id)?,
            dataset,
        })
    }

    /// Replace the panel content with the cards of `engine_key`
    ///
    /// An unknown key leaves the current cards in place.
    pub fn render(&self, engine_key: &str) -> Result<(), PageError> {
        let fields = perf_fields_for(&self.dataset, engine_key)?;
        let cards = fields
            .iter()
            .map(|field| self.spec_card(field))
            .collect::<Result<Vec<_>, _>>()?;

        self.container.set_text_content(None);
        for card in &cards {
            self.container.append_child(card)?;
        }
        tracing::debug!("Rendered performance cards for {}", engine_key);
        Ok(())
    }

    /// `<div class="spec"><div class="k">label</div><div class="v">value</div></div>`
    fn spec_card(&self, field: &SpecField) -> Result<Element, PageError> {
        let card = self.document.create_element("div")?;
        card.set_class_name("spec");

        let label = self.document.create_element("div")?;
        label.set_class_name("k");
        label.set_text_content(Some(field.label));

        let value = self.document.create_element("div")?;
        value.set_class_name("v");
        value.set_text_content(Some(&field.value));

        card.append_child(&label)?;
        card.append_child(&value)?;
        Ok(card)
    }
}
