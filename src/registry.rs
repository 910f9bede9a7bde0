//! Ordered field list and the active-field cursor.

use crate::form::FormAccessor;
use crate::types::Report;

/// The operation-report fields, in dictation order. Declaration order is the
/// tie-break for ambiguous selector fragments.
pub const MEDICAL_REPORT_FIELDS: [&str; 6] = [
    "patientFullName",
    "doctorFullName",
    "diagnosis",
    "operationDescription",
    "fillerFullName",
    "personalNumber",
];

/// One named, ordered slot of the report being dictated.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The fixed field sequence plus the single "active field" cursor.
///
/// The cursor always satisfies `0 <= active_index < field_count`; navigation
/// clamps at both ends instead of wrapping.
#[derive(Debug)]
pub struct FieldRegistry {
    fields: Vec<Field>,
    active_index: usize,
}

impl FieldRegistry {
    /// Field names must be unique; ordering is fixed for the registry's
    /// lifetime.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<Field> = names
            .into_iter()
            .map(|name| Field { name: name.into() })
            .collect();
        assert!(!fields.is_empty(), "a form needs at least one field");
        Self {
            fields,
            active_index: 0,
        }
    }

    pub fn medical_report() -> Self {
        Self::new(MEDICAL_REPORT_FIELDS)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_field(&self) -> &Field {
        &self.fields[self.active_index]
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Advance the cursor, clamped at the last field.
    pub fn next(&mut self) {
        self.active_index = (self.active_index + 1).min(self.fields.len() - 1);
    }

    /// Move the cursor back, clamped at the first field.
    pub fn previous(&mut self) {
        self.active_index = self.active_index.saturating_sub(1);
    }

    /// Focus the first field (in declaration order) whose name contains
    /// `fragment`, case-insensitively. An unmatched fragment leaves the
    /// cursor unchanged and returns false.
    pub fn set_active_by_name(&mut self, fragment: &str) -> bool {
        let fragment = fragment.to_lowercase();
        match self
            .fields
            .iter()
            .position(|field| field.name.to_lowercase().contains(&fragment))
        {
            Some(index) => {
                self.active_index = index;
                true
            }
            None => {
                tracing::warn!("no field matches selector fragment: {fragment}");
                false
            }
        }
    }

    /// Snapshot every field's current value into a [`Report`].
    pub fn snapshot(&self, form: &dyn FormAccessor) -> Report {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), form.value(&field.name)))
            .collect()
    }

    /// Clear every field and rewind the cursor to the first one.
    pub fn reset_all(&mut self, form: &mut dyn FormAccessor) {
        for (index, field) in self.fields.iter().enumerate() {
            form.set_value(&field.name, "");
            form.mark_active(&field.name, index == 0);
        }
        self.active_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::HeadlessForm;

    #[test]
    fn cursor_stays_in_bounds() {
        let mut registry = FieldRegistry::medical_report();
        for _ in 0..10 {
            registry.next();
            assert!(registry.active_index() < registry.field_count());
        }
        assert_eq!(registry.active_index(), 5);
        for _ in 0..10 {
            registry.previous();
        }
        assert_eq!(registry.active_index(), 0);
    }

    #[test]
    fn selector_matches_first_field_in_declared_order() {
        let mut registry = FieldRegistry::medical_report();
        assert!(registry.set_active_by_name("diag"));
        assert_eq!(registry.active_index(), 2);

        // "fullname" matches three fields; the first declared wins.
        assert!(registry.set_active_by_name("FULLNAME"));
        assert_eq!(registry.active_index(), 0);
    }

    #[test]
    fn unmatched_selector_leaves_cursor_unchanged() {
        let mut registry = FieldRegistry::medical_report();
        registry.next();
        assert!(!registry.set_active_by_name("zzz"));
        assert_eq!(registry.active_index(), 1);
    }

    #[test]
    fn snapshot_keys_match_registry_names() {
        let registry = FieldRegistry::medical_report();
        let mut form = HeadlessForm::new();
        form.set_value("patientFullName", "Иванов Иван Иванович");
        form.set_value("personalNumber", "12345");

        let report = registry.snapshot(&form);
        assert_eq!(report.len(), 6);
        assert_eq!(report.value("patientFullName"), Some("Иванов Иван Иванович"));
        assert_eq!(report.value("personalNumber"), Some("12345"));
        assert_eq!(report.value("diagnosis"), Some(""));
    }

    #[test]
    fn reset_clears_values_and_rewinds() {
        let mut registry = FieldRegistry::medical_report();
        let mut form = HeadlessForm::new();
        form.set_value("diagnosis", "Острый аппендицит");
        registry.set_active_by_name("diag");
        form.mark_active("diagnosis", true);

        registry.reset_all(&mut form);
        assert_eq!(registry.active_index(), 0);
        assert_eq!(form.value("diagnosis"), "");
        assert!(form.is_active("patientFullName"));
        assert!(!form.is_active("diagnosis"));
    }
}
