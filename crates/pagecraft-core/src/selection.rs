//! Selection state: the active element, the multi-selection and multi-select mode.

use crate::element::ElementId;
use std::collections::HashSet;

/// Tracks which elements are active and selected.
///
/// The active element is the single one eligible for property editing. The selected
/// set drives multi-element operations (delete, marquee) and handle visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    active: Option<ElementId>,
    selected: HashSet<ElementId>,
    multi_select: bool,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active element, if any.
    pub fn active(&self) -> Option<ElementId> {
        self.active
    }

    /// All selected element IDs.
    pub fn selected(&self) -> &HashSet<ElementId> {
        &self.selected
    }

    /// Check if an element is selected.
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    /// Check if an element is active or selected (shows resize handles).
    pub fn is_highlighted(&self, id: ElementId) -> bool {
        self.active == Some(id) || self.is_selected(id)
    }

    /// Whether multi-select mode is on.
    pub fn multi_select_mode(&self) -> bool {
        self.multi_select
    }

    /// Turn multi-select mode on or off.
    pub fn set_multi_select_mode(&mut self, enabled: bool) {
        self.multi_select = enabled;
    }

    /// Flip multi-select mode (toolbar toggle).
    pub fn toggle_multi_select_mode(&mut self) {
        self.multi_select = !self.multi_select;
    }

    /// Pointer click on an element.
    pub fn click_element(&mut self, id: ElementId) {
        if self.multi_select {
            if !self.selected.remove(&id) {
                self.selected.insert(id);
            }
        } else {
            self.active = Some(id);
            self.selected.clear();
            self.selected.insert(id);
        }
    }

    /// Pointer click on empty canvas.
    pub fn click_canvas(&mut self) {
        self.active = None;
        if !self.multi_select {
            self.selected.clear();
        }
    }

    /// Apply the result of a marquee: union in multi-select mode, replace otherwise.
    pub fn apply_marquee(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        if !self.multi_select {
            self.selected.clear();
        }
        self.selected.extend(ids);
    }

    /// Replace the selected set.
    pub fn set_selected(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.selected = ids.into_iter().collect();
    }

    /// Select every given ID (select-all shortcut).
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.set_selected(ids);
    }

    /// Set or clear the active element without touching the selected set.
    pub fn set_active(&mut self, id: Option<ElementId>) {
        self.active = id;
    }

    /// Forget a deleted element.
    pub fn remove(&mut self, id: ElementId) {
        self.selected.remove(&id);
        if self.active == Some(id) {
            self.active = None;
        }
    }

    /// Drop any IDs not satisfying `exists` (after undo/redo or a bulk replace).
    pub fn retain(&mut self, exists: impl Fn(ElementId) -> bool) {
        self.selected.retain(|&id| exists(id));
        if self.active.is_some_and(|id| !exists(id)) {
            self.active = None;
        }
    }

    /// Clear active and selected. Multi-select mode is left alone.
    pub fn clear(&mut self) {
        self.active = None;
        self.selected.clear();
    }

    /// IDs a delete key press should remove: the selected set, else the active element.
    pub fn deletion_targets(&self) -> Vec<ElementId> {
        if !self.selected.is_empty() {
            self.selected.iter().copied().collect()
        } else {
            self.active.into_iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_click_single_mode() {
        let mut sel = Selection::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        sel.click_element(a);
        sel.click_element(b);
        assert_eq!(sel.active(), Some(b));
        assert_eq!(sel.selected().len(), 1);
        assert!(sel.is_selected(b));
    }

    #[test]
    fn test_click_multi_mode_toggles() {
        let mut sel = Selection::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        sel.click_element(a);
        sel.set_multi_select_mode(true);

        sel.click_element(b);
        assert!(sel.is_selected(a) && sel.is_selected(b));
        assert_eq!(sel.active(), Some(a));

        sel.click_element(a);
        assert!(!sel.is_selected(a));
        assert_eq!(sel.active(), Some(a));
    }

    #[test]
    fn test_click_canvas() {
        let mut sel = Selection::new();
        let a = Uuid::new_v4();
        sel.click_element(a);
        sel.click_canvas();
        assert_eq!(sel.active(), None);
        assert!(sel.selected().is_empty());

        sel.click_element(a);
        sel.set_multi_select_mode(true);
        sel.click_canvas();
        assert_eq!(sel.active(), None);
        assert!(sel.is_selected(a));
    }

    #[test]
    fn test_marquee_replace_vs_union() {
        let mut sel = Selection::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        sel.set_selected([a]);

        sel.apply_marquee([b]);
        assert!(!sel.is_selected(a) && sel.is_selected(b));

        sel.set_multi_select_mode(true);
        sel.apply_marquee([a]);
        assert!(sel.is_selected(a) && sel.is_selected(b));
    }

    #[test]
    fn test_remove_clears_active() {
        let mut sel = Selection::new();
        let a = Uuid::new_v4();
        sel.click_element(a);
        sel.remove(a);
        assert_eq!(sel.active(), None);
        assert!(!sel.is_selected(a));
    }

    #[test]
    fn test_deletion_targets() {
        let mut sel = Selection::new();
        assert!(sel.deletion_targets().is_empty());

        let a = Uuid::new_v4();
        sel.set_active(Some(a));
        assert_eq!(sel.deletion_targets(), vec![a]);

        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        sel.set_selected([b, c]);
        let mut targets = sel.deletion_targets();
        targets.sort();
        let mut expected = vec![b, c];
        expected.sort();
        assert_eq!(targets, expected);
    }

    #[test]
    fn test_retain() {
        let mut sel = Selection::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        sel.set_selected([a, b]);
        sel.set_active(Some(a));
        sel.retain(|id| id == b);
        assert_eq!(sel.active(), None);
        assert_eq!(sel.selected().len(), 1);
    }

    #[test]
    fn test_toggle_multi_select_mode() {
        let mut sel = Selection::new();
        sel.toggle_multi_select_mode();
        assert!(sel.multi_select_mode());
        sel.toggle_multi_select_mode();
        assert!(!sel.multi_select_mode());
    }
}
