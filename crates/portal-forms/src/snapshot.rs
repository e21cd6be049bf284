// File: src/snapshot.rs
// Purpose: Values of every control, read from the document at event time

use crate::dom::{FieldValue, FormDom};
use portal_forms_validation::FileInfo;
use serde::Serialize;
use std::collections::BTreeMap;

/// Current value of every named control in a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    values: BTreeMap<String, FieldValue>,
}

impl FormSnapshot {
    /// Read every named control of the form
    pub fn read<D: FormDom>(dom: &D) -> Self {
        let values = dom
            .controls()
            .iter()
            .map(|node| (dom.name_of(node), dom.read(node)))
            .collect();
        Self { values }
    }

    pub fn from_values(values: impl IntoIterator<Item = (String, FieldValue)>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Raw text of a field; empty when absent
    pub fn text(&self, field: &str) -> &str {
        self.get(field).map(FieldValue::as_text).unwrap_or("")
    }

    /// Trimmed text of a field; empty when absent
    pub fn trimmed(&self, field: &str) -> &str {
        self.text(field).trim()
    }

    pub fn is_checked(&self, field: &str) -> bool {
        self.get(field).is_some_and(FieldValue::is_checked)
    }

    pub fn file(&self, field: &str) -> Option<&FileInfo> {
        self.get(field).and_then(FieldValue::file)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON object of field name to value, for logging
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_read_snapshot() {
        let mut dom = MemoryDom::signup_form();
        dom.set_value("first_name", "  Anna ");
        dom.set_checked("isResident", true);

        let snapshot = FormSnapshot::read(&dom);
        assert_eq!(snapshot.len(), 9);
        assert_eq!(snapshot.text("first_name"), "  Anna ");
        assert_eq!(snapshot.trimmed("first_name"), "Anna");
        assert!(snapshot.is_checked("isResident"));
        assert_eq!(snapshot.text("missing"), "");
        assert!(!snapshot.contains("missing"));
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = FormSnapshot::from_values([
            ("email".to_string(), FieldValue::Text("a@b.com".to_string())),
            ("isResident".to_string(), FieldValue::Checked(true)),
            ("scan".to_string(), FieldValue::File(None)),
        ]);
        assert_eq!(
            snapshot.to_json(),
            json!({ "email": "a@b.com", "isResident": true, "scan": null })
        );
    }
}
