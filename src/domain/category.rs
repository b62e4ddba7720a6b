// Category domain model
use std::fmt;

/// Opaque identifier for a logging category, as assigned by the data logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub i64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One toggleable variable on the device. `selected` is the only field that
/// changes after the category list is loaded.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub display_name: String,
    pub selected: bool,
}

impl Category {
    pub fn new(id: CategoryId, display_name: String) -> Self {
        Self {
            id,
            display_name,
            selected: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_starts_unselected() {
        let category = Category::new(CategoryId(3), "Accelerator".to_string());
        assert!(!category.selected);
        assert_eq!(category.id.to_string(), "3");
    }
}
