//! Method-based request router.
//!
//! Every path is a store key, so routing looks at the method alone. `GET`
//! reads, `POST` writes, anything else gets the fixed `500`. No path table,
//! no middleware stack.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapter::Adapter;
use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::store::Store;

/// The application router.
///
/// Build it once at startup around a store; pass it to
/// [`Server::serve`](crate::Server::serve) or call [`Router::handle`]
/// directly.
///
/// ```rust
/// use kvgate::{MemoryStore, Request, Router};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let router = Router::new(MemoryStore::new());
///
/// let res = router.handle(Request::new("GET", "/missing.txt")).await;
/// assert_eq!(res.status_code(), 404);
/// # }
/// ```
#[derive(Clone)]
pub struct Router {
    adapter: Adapter,
}

impl Router {
    pub fn new(store: impl Store) -> Self {
        Self::with_store(Arc::new(store))
    }

    /// Builds a router over a store the caller keeps a handle to.
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self { adapter: Adapter::new(store) }
    }

    /// Routes one request and produces one response. Never fails: errors are
    /// turned into their HTTP form here.
    pub async fn handle(&self, req: Request) -> Response {
        let res = match self.dispatch(&req).await {
            Ok(res) => res,
            Err(e) => {
                if matches!(e, Error::UnsupportedMethod(_)) {
                    warn!(method = req.method(), path = req.path(), "unsupported method");
                }
                e.into_response()
            }
        };

        debug!(method = req.method(), path = req.path(), status = res.status_code(), "handled");
        res
    }

    async fn dispatch(&self, req: &Request) -> Result<Response, Error> {
        match req.method().parse::<Method>() {
            Ok(Method::Get) => self.adapter.read(req.path()).await,
            Ok(Method::Post) => {
                let content_type = req.content_type();
                self.adapter
                    .write(req.path(), content_type.as_deref(), req.body().clone())
                    .await
            }
            _ => Err(Error::UnsupportedMethod(req.method().to_owned())),
        }
    }
}
