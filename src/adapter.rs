//! Read and write operations against the store.
//!
//! The request path is the store key, verbatim. Reads infer the response
//! content type from the key's extension; writes record the caller's declared
//! content type as metadata and normalize bodies declared as JSON.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::json::normalize;
use crate::mime::ContentType;
use crate::response::Response;
use crate::store::{Metadata, Store};

/// Declared type used when a write carries no `Content-Type`.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Wraps a [`Store`] with the gateway's read and write semantics.
#[derive(Clone)]
pub struct Adapter {
    store: Arc<dyn Store>,
}

impl Adapter {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Fetches the object at `path`.
    ///
    /// The `Content-Type` of the response comes from the path extension only;
    /// metadata recorded at write time is ignored.
    pub async fn read(&self, path: &str) -> Result<Response, Error> {
        let content_type = ContentType::for_path(path);

        let value = self.store.get(path).await?
            .ok_or_else(|| Error::NotFound(path.to_owned()))?;

        debug!(key = path, bytes = value.len(), content_type = content_type.as_str(), "read object");
        Ok(Response::builder().bytes(content_type, value))
    }

    /// Stores `body` at `path`, overwriting whatever was there.
    ///
    /// A missing or empty `declared` type is recorded as
    /// `application/octet-stream`. Only an exact `application/json` triggers
    /// parsing; the parsed document is stored in compact form and a parse
    /// failure stores nothing.
    pub async fn write(
        &self,
        path: &str,
        declared: Option<&str>,
        body: Bytes,
    ) -> Result<Response, Error> {
        let content_type = declared
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        let value = if content_type == ContentType::Json.as_str() {
            normalize(&body)?
        } else {
            body
        };

        let bytes = value.len();
        let metadata = Metadata { content_type: content_type.to_owned() };
        self.store.put(path, value, metadata).await?;
        debug!(key = path, bytes, content_type, "stored object");

        Ok(Response::json(receipt(content_type)))
    }
}

/// `{"success":true,"contentType":"..."}`
fn receipt(content_type: &str) -> String {
    json!({ "success": true, "contentType": content_type }).to_string()
}
