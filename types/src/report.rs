//! The report snapshot sent to the persistence endpoint.

use std::collections::BTreeMap;

/// A snapshot of every form field at save time, keyed by field name.
///
/// Serialises as a flat JSON object (`{"patientFullName": "...", ...}`),
/// matching the persistence endpoint's request body. Key uniqueness is what
/// matters; the endpoint does not depend on key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Report(BTreeMap<String, String>);

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Report {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The persistence endpoint's save acknowledgement.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SavedReport {
    status: String,

    #[serde(rename = "reportId")]
    report_id: i64,

    #[serde(rename = "createdAt", default)]
    created_at: Option<String>,
}

impl SavedReport {
    pub fn new(status: impl Into<String>, report_id: i64, created_at: Option<String>) -> Self {
        Self {
            status: status.into(),
            report_id,
            created_at,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn report_id(&self) -> i64 {
        self.report_id
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_as_flat_object() {
        let mut report = Report::new();
        report.insert("patientFullName", "Иванов Иван Иванович");
        report.insert("diagnosis", "Острый аппендицит");

        let json = serde_json::to_value(&report).expect("serialises");
        assert_eq!(json["patientFullName"], "Иванов Иван Иванович");
        assert_eq!(json["diagnosis"], "Острый аппендицит");
    }

    #[test]
    fn save_ack_decodes_backend_response() {
        let json = r#"{"status":"saved","reportId":42,"createdAt":"2024-05-01T12:00:00"}"#;
        let saved: SavedReport = serde_json::from_str(json).expect("valid ack");
        assert_eq!(saved.status(), "saved");
        assert_eq!(saved.report_id(), 42);
        assert_eq!(saved.created_at(), Some("2024-05-01T12:00:00"));
    }
}
