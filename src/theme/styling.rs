//! Document root styling marker.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::error::Result;

/// Something that carries a class list, typically `<html>`.
pub trait StylingTarget {
    /// Add `name` when `present`, remove it otherwise.
    fn toggle_class(&self, name: &str, present: bool) -> Result<()>;

    fn has_class(&self, name: &str) -> bool;
}

/// In-memory class list. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ClassList {
    classes: Rc<RefCell<BTreeSet<String>>>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Space-separated, sorted; mirrors the `class` attribute.
    pub fn to_class_attr(&self) -> String {
        self.classes
            .borrow()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl StylingTarget for ClassList {
    fn toggle_class(&self, name: &str, present: bool) -> Result<()> {
        let mut classes = self.classes.borrow_mut();
        if present {
            classes.insert(name.to_string());
        } else {
            classes.remove(name);
        }
        Ok(())
    }

    fn has_class(&self, name: &str) -> bool {
        self.classes.borrow().contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_class() {
        let list = ClassList::new();
        list.toggle_class("dark", true).unwrap();
        list.toggle_class("dark", true).unwrap();
        list.toggle_class("compact", true).unwrap();
        assert!(list.has_class("dark"));
        assert_eq!(list.to_class_attr(), "compact dark");

        list.toggle_class("dark", false).unwrap();
        assert!(!list.has_class("dark"));
        assert_eq!(list.to_class_attr(), "compact");

        // Removing an absent class is fine
        list.toggle_class("dark", false).unwrap();
    }
}
