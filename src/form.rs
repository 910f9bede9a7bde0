//! The form surface the router mutates fields through.

use std::collections::{HashMap, HashSet};

#[cfg(test)]
use mockall::automock;

// The `FormAccessor` trait is the only field-mutation surface in the crate:
// the router never touches field values directly, which keeps the visual
// concern (whatever renders the form and highlights the active field) out of
// the dispatch logic and lets the state machine run headless in tests.
#[cfg_attr(test, automock)]
pub trait FormAccessor {
    /// Current textual value of the field, empty if never written.
    fn value(&self, field: &str) -> String;

    fn set_value(&mut self, field: &str, value: &str);

    /// Toggle the field's visual "active" marking.
    fn mark_active(&mut self, field: &str, active: bool);

    /// Append dictated text, inserting a single separating space when the
    /// field already has content.
    fn append_text(&mut self, field: &str, text: &str) {
        let current = self.value(field);
        if current.is_empty() {
            self.set_value(field, text);
        } else {
            self.set_value(field, &format!("{current} {text}"));
        }
    }
}

/// In-memory form with no rendering surface.
#[derive(Debug, Default)]
pub struct HeadlessForm {
    values: HashMap<String, String>,
    active: HashSet<String>,
}

impl HeadlessForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, field: &str) -> bool {
        self.active.contains(field)
    }
}

impl FormAccessor for HeadlessForm {
    fn value(&self, field: &str) -> String {
        self.values.get(field).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, field: &str, value: &str) {
        self.values.insert(field.to_string(), value.to_string());
    }

    fn mark_active(&mut self, field: &str, active: bool) {
        if active {
            self.active.insert(field.to_string());
        } else {
            self.active.remove(field);
        }
    }
}
