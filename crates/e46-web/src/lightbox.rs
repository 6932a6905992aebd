//! Gallery lightbox overlay

use std::cell::RefCell;
use std::rc::Rc;

use e46_core::widgets::{close_reason_for_key, resolve_image_source, CloseReason, LightboxState};
use e46_core::DomConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, KeyboardEvent};

use crate::dom::{self, Listener};
use crate::error::PageError;

/// The overlay element, its image and the open/closed state
struct Lightbox {
    overlay: Element,
    image: HtmlImageElement,
    state: LightboxState,
}

impl Lightbox {
    fn open(&mut self, src: String, alt: String) {
        self.image.set_src(&src);
        self.image.set_alt(&alt);
        self.state.open(src, alt);
        dom::set_class(&self.overlay, "active", true);
    }

    fn close(&mut self, reason: CloseReason) {
        if self.state.close(reason) {
            dom::set_class(&self.overlay, "active", false);
            self.image.set_src("");
        }
    }
}

/// Shared handle used by the script-facing `closeLightbox`
#[derive(Clone)]
pub struct LightboxHandle(Rc<RefCell<Lightbox>>);

impl LightboxHandle {
    pub fn close(&self) {
        self.0.borrow_mut().close(CloseReason::CloseAction);
    }
}

/// Wire gallery clicks, backdrop clicks and Escape to the overlay
pub fn mount_lightbox(document: &Document, config: &DomConfig) -> Result<(LightboxHandle, Vec<Listener>), PageError> {
    let overlay = dom::query(document, &config.lightbox)?;
    let image = overlay
        .query_selector("img")?
        .ok_or_else(|| PageError::MissingElement(format!("{} img", config.lightbox)))?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| PageError::WrongType(format!("{} img", config.lightbox)))?;
    let gallery = dom::element_by_id(document, &config.gallery_grid)?;

    let handle = LightboxHandle(Rc::new(RefCell::new(Lightbox {
        overlay: overlay.clone(),
        image,
        state: LightboxState::default(),
    })));

    let lightbox = handle.0.clone();
    let on_gallery = Listener::new(&gallery, "click", move |event| {
        let Some(img) = dom::closest(&event, "img") else {
            return;
        };
        let Some(img) = img.dyn_ref::<HtmlImageElement>() else {
            return;
        };
        let data_src = img.get_attribute("data-src");
        let Some(src) = resolve_image_source(&img.current_src(), &img.src(), data_src.as_deref()) else {
            return;
        };
        lightbox.borrow_mut().open(src, img.alt());
    })?;

    let lightbox = handle.0.clone();
    let backdrop = overlay.clone();
    let on_backdrop = Listener::new(&overlay, "click", move |event| {
        if dom::event_element(&event).as_ref() == Some(&backdrop) {
            lightbox.borrow_mut().close(CloseReason::Backdrop);
        }
    })?;

    let lightbox = handle.0.clone();
    let on_key = Listener::new(document, "keydown", move |event| {
        let Some(reason) = event
            .dyn_ref::<KeyboardEvent>()
            .and_then(|key_event| close_reason_for_key(&key_event.key()))
        else {
            return;
        };
        lightbox.borrow_mut().close(reason);
    })?;

    Ok((handle, vec![on_gallery, on_backdrop, on_key]))
}
