//! Record layout for metadata and content panels.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{Classifier, PresentationEntry};
use crate::probe::{decode_value, probe_structured};

/// Fields of a record split by how they should be shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordLayout {
    /// `Primitive` and `ShortText` fields, shown together in a grid.
    pub grid: Vec<PresentationEntry>,

    /// Everything else, one collapsible section per field.
    pub sections: Vec<PresentationEntry>,
}

impl RecordLayout {
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty() && self.sections.is_empty()
    }
}

impl Classifier {
    /// Decode and classify every non-reserved field of a record.
    ///
    /// Each field is classified as its own root. Field order is preserved
    /// within `grid` and within `sections`.
    pub fn layout_record<S: AsRef<str>>(&self, record: &Map<String, Value>, reserved: &[S]) -> RecordLayout {
        let mut layout = RecordLayout::default();

        for (key, raw) in record {
            if reserved.iter().any(|name| name.as_ref() == key.as_str()) {
                continue;
            }

            let value = decode_value(raw, Some(key.as_str())).into_value();
            let entry = PresentationEntry::new(key.clone(), self.classify(&value));

            if entry.node.kind.is_simple() {
                layout.grid.push(entry);
            } else {
                layout.sections.push(entry);
            }
        }

        layout
    }

    /// Probe a content field and classify the entries of its mapping.
    ///
    /// `None` means the caller should show the raw text.
    pub fn content_sections(&self, text: &str) -> Option<Vec<PresentationEntry>> {
        let map = probe_structured(text)?;
        Some(self.classify(&Value::Object(map)).children)
    }
}

/// [`Classifier::layout_record`] with default settings.
pub fn layout_record<S: AsRef<str>>(record: &Map<String, Value>, reserved: &[S]) -> RecordLayout {
    Classifier::default().layout_record(record, reserved)
}

/// [`Classifier::content_sections`] with default settings.
pub fn content_sections(text: &str) -> Option<Vec<PresentationEntry>> {
    Classifier::default().content_sections(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::PresentationKind;
    use serde_json::json;

    fn labels(entries: &[PresentationEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_layout_splits_grid_and_sections() {
        let record = json!({
            "id": "run-1",
            "latency_ms": 420,
            "model": "judge-small",
            "context": "{'docs': ['a', 'b'], 'k': 2}",
            "transcript": "x".repeat(500),
            "flags": []
        });
        let layout = layout_record(record.as_object().unwrap(), &["id"]);
        assert_eq!(labels(&layout.grid), vec!["latency_ms", "model", "flags"]);
        assert_eq!(labels(&layout.sections), vec!["context", "transcript"]);
        assert_eq!(layout.sections[0].node.kind, PresentationKind::Mapping);
    }

    #[test]
    fn test_layout_multiline_field_is_object_list() {
        let record = json!({"log": "step one\nstep two"});
        let layout = layout_record::<&str>(record.as_object().unwrap(), &[]);
        assert_eq!(layout.sections[0].node.kind, PresentationKind::ObjectList);
    }

    #[test]
    fn test_layout_all_reserved_is_empty() {
        let record = json!({"id": 1});
        assert!(layout_record(record.as_object().unwrap(), &["id".to_string()]).is_empty());
    }

    #[test]
    fn test_content_sections() {
        let entries = content_sections("{'question': 'why?', 'answer': {'text': 'because'}}").unwrap();
        assert_eq!(labels(&entries), vec!["question", "answer"]);
        assert!(!entries[0].block);
        assert!(entries[1].block);
    }

    #[test]
    fn test_content_sections_plain_text() {
        assert!(content_sections("not a mapping").is_none());
        assert!(content_sections("[1, 2]").is_none());
    }
}
