//! Query parameter types

use serde::{Deserialize, Serialize};

/// A query parameter key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    /// The parameter key
    pub key: String,
    /// The parameter value
    pub value: String,
}

impl QueryParam {
    /// Creates a new query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered collection of query parameters.
///
/// Order is preserved so the serialized query string is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    items: Vec<QueryParam>,
}

impl QueryParams {
    /// Creates an empty query parameter collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds a query parameter to the collection.
    pub fn add(&mut self, param: QueryParam) {
        self.items.push(param);
    }

    /// Appends a key-value pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.items.push(QueryParam::new(key, value.to_string()));
    }

    /// Appends a key-value pair only when a value is present.
    pub fn push_opt(&mut self, key: impl Into<String>, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Returns the first value for the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Returns all parameters.
    #[must_use]
    pub fn all(&self) -> &[QueryParam] {
        &self.items
    }

    /// Returns the parameters as borrowed key-value pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items
            .iter()
            .map(|p| (p.key.as_str(), p.value.as_str()))
    }

    /// Returns the number of parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<QueryParam> for QueryParams {
    fn from_iter<T: IntoIterator<Item = QueryParam>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
