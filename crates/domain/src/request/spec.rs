//! Request specification type

use serde::{Deserialize, Serialize};

use super::{Headers, HttpMethod, QueryParams, RequestBody};
use crate::error::{DomainError, DomainResult};
use crate::pagination::Page;

/// Complete specification of one call against the backend REST surface.
///
/// The path is relative to the configured API base address; the transport
/// joins the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the API base address, starting with `/`
    pub path: String,
    /// Query parameters in serialization order
    #[serde(default)]
    pub query: QueryParams,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
    /// Zero for the first attempt of a logical request, incremented per retry
    #[serde(default)]
    pub attempt: u32,
}

impl ApiRequest {
    /// Creates a request with no query, headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            headers: Headers::new(),
            body: RequestBody::None,
            attempt: 0,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push(key, value);
        self
    }

    /// Appends a query parameter when a value is present.
    #[must_use]
    pub fn with_optional_query(mut self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.query.push_opt(key, value);
        self
    }

    /// Appends the `skip` and `limit` parameters for a page.
    #[must_use]
    pub fn with_page(self, page: Page) -> Self {
        self.with_query("skip", page.skip()).with_query("limit", page.limit)
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets a JSON body from a serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> DomainResult<Self> {
        Ok(self.with_body(RequestBody::json(value)?))
    }

    /// Returns true if this is a retry of an earlier attempt.
    #[must_use]
    pub const fn is_retry(&self) -> bool {
        self.attempt > 0
    }

    /// Returns a copy marked as the next attempt of the same logical request.
    #[must_use]
    pub fn retry(&self) -> Self {
        let mut next = self.clone();
        next.attempt = self.attempt.saturating_add(1);
        next
    }

    /// Checks that the path is relative to the base address and stays below it.
    ///
    /// Query and fragment belong in [`query`](Self::query), so `?` and `#`
    /// are rejected along with `.` and `..` segments.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPath` for empty, absolute or traversing paths.
    pub fn validate(&self) -> DomainResult<()> {
        let traverses = self
            .path
            .split('/')
            .any(|segment| segment == "." || segment == "..");
        if !self.path.starts_with('/')
            || self.path.contains("://")
            || self.path.contains(['?', '#'])
            || traverses
        {
            return Err(DomainError::InvalidPath(self.path.clone()));
        }
        Ok(())
    }
}
