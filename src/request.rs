//! Incoming HTTP request record.

use std::borrow::Cow;

use bytes::Bytes;

/// An incoming request, detached from any HTTP server framework.
///
/// The server fills one in per wire request; tests and embedders build them
/// directly:
///
/// ```rust
/// use kvgate::Request;
///
/// let req = Request::new("POST", "/notes/today.json")
///     .with_header("content-type", "application/json")
///     .with_body(r#"{"done":false}"#);
/// assert_eq!(req.content_type().as_deref(), Some("application/json"));
/// ```
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &Bytes { &self.body }

    /// Case-insensitive header lookup.
    ///
    /// A repeated header yields all of its values joined with `", "`, in the
    /// order received. Only that case allocates.
    pub fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        let mut values = self.headers.iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str());

        let first = values.next()?;
        let Some(second) = values.next() else {
            return Some(Cow::Borrowed(first));
        };

        let mut joined = format!("{first}, {second}");
        for value in values {
            joined.push_str(", ");
            joined.push_str(value);
        }
        Some(Cow::Owned(joined))
    }

    /// The `Content-Type` header, if present.
    pub fn content_type(&self) -> Option<Cow<'_, str>> {
        self.header("content-type")
    }
}
