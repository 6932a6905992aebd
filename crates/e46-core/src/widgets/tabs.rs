//! Mutually exclusive tab groups

/// A group of tabs of which at most one is active
///
/// Tabs are tracked by position so duplicated keys in the markup still end
/// up with a single active control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabGroup {
    keys: Vec<String>,
    active: Option<usize>,
}

impl TabGroup {
    /// Create a group with no active tab
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    /// Activate the first tab carrying `key`
    ///
    /// Unknown keys leave the group untouched and return `None`.
    pub fn select(&mut self, key: &str) -> Option<usize> {
        let index = self.keys.iter().position(|k| k == key)?;
        self.active = Some(index);
        Some(index)
    }

    /// Activate the tab at `index`, returning its key
    pub fn select_index(&mut self, index: usize) -> Option<&str> {
        let key = self.keys.get(index)?;
        self.active = Some(index);
        Some(key.as_str())
    }

    /// Activate the tab at `index` once `commit` accepts its key
    ///
    /// A failing `commit` leaves the current selection in place.
    pub fn try_select_index<E>(
        &mut self,
        index: usize,
        commit: impl FnOnce(&str) -> Result<(), E>,
    ) -> Result<Option<&str>, E> {
        let Some(key) = self.keys.get(index) else {
            return Ok(None);
        };
        commit(key)?;
        self.active = Some(index);
        Ok(self.keys.get(index).map(String::as_str))
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active.and_then(|i| self.keys.get(i)).map(String::as_str)
    }

    pub fn is_active_index(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Whether a content panel named `panel` should be hidden
    pub fn panel_hidden(&self, panel: &str) -> bool {
        self.active_key() != Some(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(group: &TabGroup) -> usize {
        (0..group.keys.len()).filter(|&i| group.is_active_index(i)).count()
    }

    #[test]
    fn test_starts_without_active_tab() {
        let group = TabGroup::new(["318i", "320i"]);
        assert_eq!(group.active_key(), None);
        assert_eq!(active_count(&group), 0);
    }

    #[test]
    fn test_exactly_one_active_after_any_selection() {
        let keys = ["318i", "320i", "325i", "330i", "330i-zhp", "320d", "330xd"];
        let mut group = TabGroup::new(keys);

        for key in keys {
            group.select(key).unwrap();
            assert_eq!(active_count(&group), 1);
            assert_eq!(group.active_key(), Some(key));
        }
    }

    #[test]
    fn test_unknown_key_keeps_selection() {
        let mut group = TabGroup::new(["318i", "320i"]);
        group.select("320i");
        assert_eq!(group.select("m3"), None);
        assert_eq!(group.active_key(), Some("320i"));
    }

    #[test]
    fn test_duplicate_keys_by_index() {
        let mut group = TabGroup::new(["exterior", "interior", "exterior"]);
        assert_eq!(group.select_index(2), Some("exterior"));
        assert!(group.is_active_index(2));
        assert!(!group.is_active_index(0));
        assert_eq!(active_count(&group), 1);
        assert_eq!(group.select_index(9), None);
        assert!(group.is_active_index(2));
    }

    #[test]
    fn test_rejected_commit_keeps_selection() {
        let mut group = TabGroup::new(["318i", "m3-csl", "330i"]);
        group.select("318i");

        let result = group.try_select_index(1, |key| Err(format!("no data for {}", key)));
        assert_eq!(result, Err("no data for m3-csl".to_string()));
        assert_eq!(group.active_key(), Some("318i"));
        assert_eq!(active_count(&group), 1);

        let result = group.try_select_index(2, |_| Ok::<(), String>(()));
        assert_eq!(result, Ok(Some("330i")));
        assert_eq!(group.active_key(), Some("330i"));

        assert_eq!(group.try_select_index(7, |_| Ok::<(), String>(())), Ok(None));
        assert_eq!(group.active_key(), Some("330i"));
    }

    #[test]
    fn test_exactly_one_panel_visible() {
        let panels = ["exterior", "interior", "wheels"];
        let mut group = TabGroup::new(panels);

        for tab in panels {
            group.select(tab);
            let visible: Vec<&str> = panels
                .iter()
                .copied()
                .filter(|p| !group.panel_hidden(p))
                .collect();
            assert_eq!(visible, vec![tab]);
        }
    }
}
