//! Gallery lightbox state

/// How the overlay was asked to close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Click on the overlay background itself
    Backdrop,
    /// Explicit close action (button or script call)
    CloseAction,
    /// Escape key
    Escape,
}

/// Overlay state: open with an image, or closed with no source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightboxState {
    active: bool,
    src: Option<String>,
    alt: String,
}

impl LightboxState {
    pub fn open(&mut self, src: String, alt: String) {
        self.active = true;
        self.src = Some(src);
        self.alt = alt;
    }

    /// Close the overlay and clear the displayed source
    ///
    /// Escape only applies while the overlay is open; the other reasons always
    /// close. Returns whether the close was applied.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if reason == CloseReason::Escape && !self.active {
            return false;
        }
        self.active = false;
        self.src = None;
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }
}

/// Map a key name to a close request
pub fn close_reason_for_key(key: &str) -> Option<CloseReason> {
    (key == "Escape").then_some(CloseReason::Escape)
}

/// Pick the source to enlarge: the resolved current source, then the
/// declared source, then a not-yet-loaded deferred source
pub fn resolve_image_source(
    current_src: &str,
    src: &str,
    data_src: Option<&str>,
) -> Option<String> {
    [Some(current_src), Some(src), data_src]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
