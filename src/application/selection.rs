// Series selector - tracks which categories are charted, in selection order
use crate::domain::category::{Category, CategoryId};

/// Maintains the category list and the ordered set of selected ids.
///
/// Selection order drives legend and colour assignment: ids append on
/// select and are removed on deselect, so reselecting a category moves it
/// to the end rather than restoring its old position.
#[derive(Debug, Default)]
pub struct SeriesSelector {
    categories: Vec<Category>,
    selected: Vec<CategoryId>,
}

impl SeriesSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the category list, e.g. after the initial `categories` fetch.
    /// Any selection referring to ids no longer present is dropped.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.selected
            .retain(|id| categories.iter().any(|c| c.id == *id));
        for category in &categories {
            if category.selected && !self.selected.contains(&category.id) {
                self.selected.push(category.id);
            }
        }
        self.categories = categories;
    }

    /// Flip the `selected` flag of exactly one category and recompute the
    /// ordered id list. Returns `true` when the selection changed; toggling
    /// an unknown id is a no-op.
    pub fn toggle(&mut self, id: CategoryId) -> bool {
        let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
            tracing::debug!(%id, "toggle ignored, unknown category");
            return false;
        };

        category.selected = !category.selected;
        if category.selected {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        } else {
            self.selected.retain(|s| *s != id);
        }
        true
    }

    /// Selected ids in the order they were most recently selected.
    pub fn selected_ids(&self) -> &[CategoryId] {
        &self.selected
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn display_name(&self, id: CategoryId) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.display_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector_with(names: &[(i64, &str)]) -> SeriesSelector {
        let mut selector = SeriesSelector::new();
        selector.set_categories(
            names
                .iter()
                .map(|(id, name)| Category::new(CategoryId(*id), name.to_string()))
                .collect(),
        );
        selector
    }

    #[test]
    fn test_toggle_appends_in_selection_order() {
        let mut selector = selector_with(&[(1, "Accelerator"), (2, "Brake"), (3, "RPM")]);
        selector.toggle(CategoryId(3));
        selector.toggle(CategoryId(1));
        assert_eq!(selector.selected_ids(), &[CategoryId(3), CategoryId(1)]);
    }

    #[test]
    fn test_toggle_twice_restores_flag_and_ordering() {
        let mut selector = selector_with(&[(1, "A"), (2, "B"), (3, "C")]);
        selector.toggle(CategoryId(1));
        selector.toggle(CategoryId(2));

        // Deselect-then-reselect of the most recent entry keeps the list identical.
        selector.toggle(CategoryId(2));
        selector.toggle(CategoryId(2));
        assert_eq!(selector.selected_ids(), &[CategoryId(1), CategoryId(2)]);
        assert!(selector.categories()[1].selected);
    }

    #[test]
    fn test_reselect_appends_to_the_end() {
        let mut selector = selector_with(&[(1, "A"), (2, "B")]);
        selector.toggle(CategoryId(1));
        selector.toggle(CategoryId(2));
        selector.toggle(CategoryId(1));
        selector.toggle(CategoryId(1));
        assert_eq!(selector.selected_ids(), &[CategoryId(2), CategoryId(1)]);
    }

    #[test]
    fn test_unknown_id_is_a_no_op() {
        let mut selector = selector_with(&[(1, "A")]);
        assert!(!selector.toggle(CategoryId(99)));
        assert!(selector.selected_ids().is_empty());
    }

    #[test]
    fn test_no_duplicate_ids() {
        let mut selector = selector_with(&[(1, "A")]);
        selector.toggle(CategoryId(1));
        selector.toggle(CategoryId(1));
        selector.toggle(CategoryId(1));
        assert_eq!(selector.selected_ids(), &[CategoryId(1)]);
    }

    #[test]
    fn test_set_categories_drops_stale_selection() {
        let mut selector = selector_with(&[(1, "A"), (2, "B")]);
        selector.toggle(CategoryId(2));
        selector.set_categories(vec![Category::new(CategoryId(1), "A".to_string())]);
        assert!(selector.selected_ids().is_empty());
    }
}
