//! # kvgate
//!
//! A minimal HTTP gateway over a key-value blob store.
//!
//! ## The contract
//!
//! - `GET /any/path.ext` returns the bytes stored under `/any/path.ext`, with a
//!   `Content-Type` inferred from the extension (`json`, `pdf`, `txt`, else
//!   `application/octet-stream`). Missing keys answer `404`.
//! - `POST /any/path.ext` stores the request body under that path and answers
//!   `{"success":true,"contentType":"<declared>"}`. Bodies declared as
//!   `application/json` must parse, and are stored in compact form.
//! - Any other method answers `500`.
//!
//! Durability, replication and consistency belong to the [`Store`] behind
//! the gateway. TLS, authentication and body-size limits belong to the proxy
//! in front of it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use kvgate::{MemoryStore, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = Router::new(MemoryStore::new());
//!
//!     Server::bind(([127, 0, 0, 1], 8787).into())
//!         .serve(router)
//!         .await
//!         .unwrap();
//! }
//! ```

mod adapter;
mod error;
mod json;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod mime;
pub mod store;

pub use adapter::{Adapter, DEFAULT_CONTENT_TYPE};
pub use error::Error;
pub use method::Method;
pub use mime::ContentType;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::{MemoryStore, Metadata, Store, StoreError};
