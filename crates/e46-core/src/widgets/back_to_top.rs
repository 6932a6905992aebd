//! Back-to-top button visibility driven by the page header

/// Named transitions of the back-to-top button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTransition {
    /// Header has left the viewport through the top edge: show the button
    ScrolledPast,
    /// Header is in view at or below its natural position: hide the button
    Returned,
}

/// Tracks whether the back-to-top button is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackToTop {
    visible: bool,
}

impl BackToTop {
    /// Classify a header observation
    ///
    /// `top` is the header's top edge relative to the viewport. Observations
    /// that match neither transition (header partly visible above its natural
    /// position) leave the button as it is.
    pub fn classify(top: f64, intersecting: bool) -> Option<HeaderTransition> {
        if !intersecting && top < 0.0 {
            Some(HeaderTransition::ScrolledPast)
        } else if intersecting && top >= 0.0 {
            Some(HeaderTransition::Returned)
        } else {
            None
        }
    }

    /// Apply an observation; returns the new visibility when it changed
    pub fn observe(&mut self, top: f64, intersecting: bool) -> Option<bool> {
        let visible = match Self::classify(top, intersecting)? {
            HeaderTransition::ScrolledPast => true,
            HeaderTransition::Returned => false,
        };
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(BackToTop::classify(-120.0, false), Some(HeaderTransition::ScrolledPast));
        assert_eq!(BackToTop::classify(0.0, true), Some(HeaderTransition::Returned));
        assert_eq!(BackToTop::classify(35.0, true), Some(HeaderTransition::Returned));
        assert_eq!(BackToTop::classify(-20.0, true), None);
        assert_eq!(BackToTop::classify(900.0, false), None);
    }

    #[test]
    fn test_scroll_down_and_back() {
        let mut button = BackToTop::default();
        assert!(!button.is_visible());

        // Initial observation at the top of the page
        assert_eq!(button.observe(0.0, true), None);

        assert_eq!(button.observe(-80.0, false), Some(true));
        assert!(button.is_visible());

        // Header peeking back in from above keeps the button
        assert_eq!(button.observe(-30.0, true), None);
        assert!(button.is_visible());

        assert_eq!(button.observe(0.0, true), Some(false));
        assert!(!button.is_visible());
    }
}
