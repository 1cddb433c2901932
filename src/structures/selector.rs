// ============================================================================
// spark-structures - Text Selectors
// Project a stored word (string or structured value) into its trie key
// ============================================================================

use std::borrow::Cow;

use serde_json::Value;

/// Maps a stored item to the text it is indexed under.
pub trait TextSelector<W> {
    fn select<'a>(&self, word: &'a W) -> Cow<'a, str>;
}

/// Index a string-like word by its own text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<W: AsRef<str>> TextSelector<W> for Identity {
    #[inline]
    fn select<'a>(&self, word: &'a W) -> Cow<'a, str> {
        Cow::Borrowed(word.as_ref())
    }
}

impl<W, F> TextSelector<W> for F
where
    F: Fn(&W) -> String,
{
    fn select<'a>(&self, word: &'a W) -> Cow<'a, str> {
        Cow::Owned(self(word))
    }
}

/// Index JSON objects by one of their string fields.
///
/// Objects without the field (or with a non-string value there) project to
/// the empty string and are never indexed. Bare JSON strings index as
/// themselves.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use spark_structures::{JsonField, TextSelector};
///
/// let selector = JsonField::new("text");
/// assert_eq!(selector.select(&json!({"id": 1, "text": "hello"})), "hello");
/// assert_eq!(selector.select(&json!({"id": 2})), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonField {
    field: String,
}

impl JsonField {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl TextSelector<Value> for JsonField {
    fn select<'a>(&self, word: &'a Value) -> Cow<'a, str> {
        let text = match word {
            Value::String(text) => Some(text.as_str()),
            Value::Object(map) => map.get(&self.field).and_then(Value::as_str),
            _ => None,
        };
        Cow::Borrowed(text.unwrap_or(""))
    }
}
