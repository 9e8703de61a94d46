//! Ordered query-string builder.
//!
//! Keys keep insertion order. A key whose value is `None` is dropped from
//! the rendered string; an empty string is kept. Values are form-encoded
//! the same way browsers encode `URLSearchParams`.

use std::fmt::Display;

use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), Some(value.to_string())));
        self
    }

    pub fn push_opt<V: Display>(mut self, key: &str, value: Option<V>) -> Self {
        self.pairs.push((key.to_string(), value.map(|v| v.to_string())));
        self
    }

    /// True when nothing would be rendered.
    pub fn is_empty(&self) -> bool {
        self.pairs.iter().all(|(_, value)| value.is_none())
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, Option<V>)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.map(|v| v.to_string())))
                .collect(),
        }
    }
}
