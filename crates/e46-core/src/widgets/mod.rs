//! Widget state machines
//!
//! The DOM layer mirrors these states onto classes and attributes; all the
//! transition rules live here so they can be tested without a browser.

pub mod back_to_top;
pub mod lightbox;
pub mod one_shot;
pub mod tabs;

pub use back_to_top::{BackToTop, HeaderTransition};
pub use lightbox::{close_reason_for_key, resolve_image_source, CloseReason, LightboxState};
pub use one_shot::{LazySource, OneShot};
pub use tabs::TabGroup;
