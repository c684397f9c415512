//! Presentation Classifier
//!
//! Derives a [`PresentationNode`] tree describing how a decoded value
//! should be shown: inline or as its own block, truncated or in full, and
//! how deep to recurse. It does not render anything.
//!
//! ## Rules
//!
//! | Value | Kind |
//! |-------|------|
//! | null, boolean, number | `Primitive` |
//! | text up to `short_text_limit` chars | `ShortText` |
//! | longer text | `LongText` with a collapsed preview |
//! | empty sequence or mapping | `Primitive` placeholder |
//! | sequence of scalars | `ScalarList` |
//! | sequence holding containers | `ObjectList`, elements numbered from 1 |
//! | mapping deeper than `max_mapping_depth` | `Truncated` |
//! | other mappings | `Mapping` |

mod record;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClassifierConfig;

pub use record::{content_sections, layout_record, RecordLayout};

/// Preview shown for empty sequences and mappings.
pub const EMPTY_PLACEHOLDER: &str = "(empty)";

/// Marker appended to shortened previews.
pub const ELLIPSIS: &str = "…";

/// Separator for scalar list previews.
const LIST_SEPARATOR: &str = ", ";

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// How a value should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationKind {
    Primitive,
    ShortText,
    LongText,
    ScalarList,
    ObjectList,
    Mapping,
    Truncated,
}

impl PresentationKind {
    /// Whether an entry of this kind gets its own block instead of an
    /// inline `key: value` line.
    pub fn needs_block(self) -> bool {
        matches!(
            self,
            PresentationKind::LongText | PresentationKind::ObjectList | PresentationKind::Mapping
        )
    }

    /// Whether the value fits a simple key/value grid.
    pub fn is_simple(self) -> bool {
        matches!(self, PresentationKind::Primitive | PresentationKind::ShortText)
    }
}

/// Presentation shape for one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationNode {
    pub kind: PresentationKind,

    /// Single-line text to show in place of (or before) the full value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,

    /// Child entries of `Mapping` and `ObjectList` nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PresentationEntry>,
}

/// A labelled child of a [`PresentationNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationEntry {
    /// Mapping key, or 1-based position for list elements.
    pub label: String,

    /// Whether this entry needs its own block.
    pub block: bool,

    pub node: PresentationNode,
}

impl PresentationNode {
    fn leaf(kind: PresentationKind, preview: impl Into<String>) -> Self {
        Self {
            kind,
            preview: Some(preview.into()),
            children: Vec::new(),
        }
    }

    fn container(kind: PresentationKind, children: Vec<PresentationEntry>) -> Self {
        Self {
            kind,
            preview: None,
            children,
        }
    }
}

impl PresentationEntry {
    fn new(label: impl Into<String>, node: PresentationNode) -> Self {
        Self {
            label: label.into(),
            block: node.kind.needs_block(),
            node,
        }
    }
}

/// Classifies decoded values under a [`ClassifierConfig`].
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a value at the root.
    pub fn classify(&self, value: &Value) -> PresentationNode {
        self.classify_at(value, 0)
    }

    /// Classify a value found `depth` levels below the root.
    pub fn classify_at(&self, value: &Value, depth: usize) -> PresentationNode {
        match value {
            Value::Null => PresentationNode::leaf(PresentationKind::Primitive, "null"),
            Value::Bool(b) => PresentationNode::leaf(PresentationKind::Primitive, b.to_string()),
            Value::Number(n) => PresentationNode::leaf(PresentationKind::Primitive, n.to_string()),
            Value::String(text) => self.classify_text(text),
            Value::Array(items) if items.is_empty() => {
                PresentationNode::leaf(PresentationKind::Primitive, EMPTY_PLACEHOLDER)
            }
            Value::Array(items) if items.iter().all(is_scalar) => {
                let joined = items.iter().map(scalar_text).collect::<Vec<_>>().join(LIST_SEPARATOR);
                PresentationNode::leaf(PresentationKind::ScalarList, joined)
            }
            Value::Array(_) if depth > self.config.max_depth => truncated(value),
            Value::Array(items) => {
                let children = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        PresentationEntry::new((index + 1).to_string(), self.classify_at(item, depth + 1))
                    })
                    .collect();
                PresentationNode::container(PresentationKind::ObjectList, children)
            }
            Value::Object(map) if map.is_empty() => {
                PresentationNode::leaf(PresentationKind::Primitive, EMPTY_PLACEHOLDER)
            }
            Value::Object(_) if depth > self.config.max_mapping_depth => truncated(value),
            Value::Object(map) => {
                let children = map
                    .iter()
                    .map(|(key, item)| PresentationEntry::new(key.clone(), self.classify_at(item, depth + 1)))
                    .collect();
                PresentationNode::container(PresentationKind::Mapping, children)
            }
        }
    }

    fn classify_text(&self, text: &str) -> PresentationNode {
        if text.chars().count() <= self.config.short_text_limit {
            PresentationNode::leaf(PresentationKind::ShortText, text)
        } else {
            PresentationNode::leaf(
                PresentationKind::LongText,
                preview_text(text, self.config.preview_chars),
            )
        }
    }
}

/// Classify a value at the root with default settings.
pub fn classify(value: &Value) -> PresentationNode {
    Classifier::default().classify(value)
}

/// Single-line preview: whitespace runs collapsed, cut to `max_chars`,
/// ellipsis appended.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text.trim(), " ");
    let mut preview: String = collapsed.chars().take(max_chars).collect();
    preview.push_str(ELLIPSIS);
    preview
}

fn truncated(value: &Value) -> PresentationNode {
    // Serializing a `Value` cannot fail; the fallback only keeps this total.
    let dump = serde_json::to_string(value).unwrap_or_default();
    PresentationNode::leaf(PresentationKind::Truncated, dump)
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
