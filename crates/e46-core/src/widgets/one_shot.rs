//! One-way visibility triggers for scroll reveal and lazy images

/// Pending until the first intersecting observation, then triggered forever
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OneShot {
    #[default]
    Pending,
    Triggered,
}

impl OneShot {
    /// Feed an observation; returns true only on the transition itself
    pub fn observe(&mut self, intersecting: bool) -> bool {
        match self {
            OneShot::Pending if intersecting => {
                *self = OneShot::Triggered;
                true
            }
            _ => false,
        }
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self, OneShot::Triggered)
    }
}

/// Deferred image source, handed out at most once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LazySource {
    pending: Option<String>,
    trigger: OneShot,
}

impl LazySource {
    /// `data_src` is the deferred source; an empty value counts as none
    pub fn new(data_src: Option<String>) -> Self {
        Self {
            pending: data_src.filter(|s| !s.is_empty()),
            trigger: OneShot::Pending,
        }
    }

    /// Feed an observation; yields the source to assign on the first hit
    pub fn observe(&mut self, intersecting: bool) -> Option<String> {
        if self.trigger.observe(intersecting) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Whether observation can stop
    pub fn is_done(&self) -> bool {
        self.trigger.is_triggered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_fires_once() {
        let mut reveal = OneShot::default();
        assert!(!reveal.observe(false));
        assert!(reveal.observe(true));
        assert!(!reveal.observe(true));
        assert!(!reveal.observe(false));
        assert!(reveal.is_triggered());
    }

    #[test]
    fn test_reveal_never_reverts() {
        let mut reveal = OneShot::default();
        reveal.observe(true);
        for intersecting in [false, true, false, false] {
            reveal.observe(intersecting);
            assert_eq!(reveal, OneShot::Triggered);
        }
    }

    #[test]
    fn test_lazy_source_assigned_once() {
        let mut image = LazySource::new(Some("img/side.jpg".to_string()));
        assert_eq!(image.observe(false), None);
        assert!(!image.is_done());

        assert_eq!(image.observe(true).as_deref(), Some("img/side.jpg"));
        assert!(image.is_done());
        assert_eq!(image.observe(true), None);
        assert_eq!(image.observe(false), None);
    }

    #[test]
    fn test_lazy_source_without_data_src() {
        let mut image = LazySource::new(Some(String::new()));
        assert_eq!(image.observe(true), None);
        assert!(image.is_done());

        let mut image = LazySource::new(None);
        assert_eq!(image.observe(true), None);
        assert!(image.is_done());
    }
}
