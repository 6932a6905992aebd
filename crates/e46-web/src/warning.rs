//! Inline notice shown in the viewer when the model can't be loaded

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;
use crate::error::PageError;

const WARNING_ATTRIBUTE: &str = "data-model-warning";

/// Add a hint overlay with `message` to the viewer container
///
/// Only the first call has an effect.
pub fn show_model_warning(container_id: &str, message: &str) -> Result<(), PageError> {
    let document = dom::document()?;
    let container = dom::element_by_id(&document, container_id)?;
    if container.has_attribute(WARNING_ATTRIBUTE) {
        return Ok(());
    }

    let hint = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| PageError::WrongType("div".to_string()))?;
    hint.set_class_name("hint");
    hint.set_text_content(Some(message));

    let style = hint.style();
    style.set_property("bottom", "unset")?;
    style.set_property("top", "12px")?;
    style.set_property("right", "12px")?;

    container.append_child(&hint)?;
    container.set_attribute(WARNING_ATTRIBUTE, "")?;
    tracing::warn!("{}", message);
    Ok(())
}
