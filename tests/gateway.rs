use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};

use kvgate::{MemoryStore, Metadata, Request, Router, Store, StoreError};

/// Counts every call before forwarding to a [`MemoryStore`].
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

#[async_trait]
impl Store for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: Bytes, metadata: Metadata) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, value, metadata).await
    }
}

struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<Bytes>, StoreError> {
        Err(StoreError::new("kv namespace 7f3a unreachable"))
    }

    async fn put(&self, _key: &str, _value: Bytes, _metadata: Metadata) -> Result<(), StoreError> {
        Err(StoreError::new("kv namespace 7f3a unreachable"))
    }
}

fn setup() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (Router::new(Arc::clone(&store)), store)
}

fn post(path: &str, content_type: Option<&str>, body: impl Into<Bytes>) -> Request {
    let req = Request::new("POST", path).with_body(body);
    match content_type {
        Some(ct) => req.with_header("Content-Type", ct),
        None => req,
    }
}

fn get(path: &str) -> Request {
    Request::new("GET", path)
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("response body is JSON")
}

#[tokio::test]
async fn binary_round_trip_is_identity() {
    let (router, _) = setup();
    let payload: Vec<u8> = (0..=255).collect();

    let res = router.handle(post("/blob.bin", Some("image/png"), payload.clone())).await;
    assert_eq!(res.status_code(), 200);

    let res = router.handle(get("/blob.bin")).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(&res.body()[..], &payload[..]);
    assert_eq!(res.header("content-type"), Some("application/octet-stream"));
}

#[tokio::test]
async fn write_reports_declared_content_type() {
    let (router, store) = setup();

    let res = router.handle(post("/notes.txt", Some("text/plain"), "hello")).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(json_body(res.body()), json!({ "success": true, "contentType": "text/plain" }));

    let meta = store.metadata("/notes.txt").unwrap().unwrap();
    assert_eq!(meta.content_type, "text/plain");
}

#[tokio::test]
async fn json_round_trip_preserves_content() {
    let (router, _) = setup();
    let doc = json!({ "name": "alice", "tags": ["a", "b"], "nested": { "n": 1.5, "ok": null } });
    let pretty = serde_json::to_vec_pretty(&doc).unwrap();

    let res = router.handle(post("/users/alice.json", Some("application/json"), pretty.clone())).await;
    assert_eq!(res.status_code(), 200);

    let res = router.handle(get("/users/alice.json")).await;
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(json_body(res.body()), doc);
    // Stored compact, not as sent.
    assert!(res.body().len() < pretty.len());
}

#[tokio::test]
async fn unwritten_path_is_not_found() {
    let (router, _) = setup();

    let res = router.handle(get("/never/written.txt")).await;
    assert_eq!(res.status_code(), 404);
    assert!(res.body().is_empty());
}

#[tokio::test]
async fn malformed_json_is_rejected_and_not_stored() {
    let (router, store) = setup();

    let res = router.handle(post("/bad.json", Some("application/json"), "{\"a\": ")).await;
    assert_eq!(res.status_code(), 400);
    assert_eq!(json_body(res.body())["success"], false);

    assert_eq!(store.get("/bad.json").await.unwrap(), None);
    assert_eq!(router.handle(get("/bad.json")).await.status_code(), 404);
}

#[tokio::test]
async fn malformed_json_does_not_clobber_existing_value() {
    let (router, _) = setup();
    router.handle(post("/doc.json", Some("application/json"), r#"{"v":1}"#)).await;

    let res = router.handle(post("/doc.json", Some("application/json"), "not json")).await;
    assert_eq!(res.status_code(), 400);

    let res = router.handle(get("/doc.json")).await;
    assert_eq!(&res.body()[..], br#"{"v":1}"#);
}

#[tokio::test]
async fn read_content_type_follows_extension_not_declaration() {
    let (router, store) = setup();

    router.handle(post("/a.pdf", Some("text/plain"), "%PDF-1.7")).await;

    let res = router.handle(get("/a.pdf")).await;
    assert_eq!(res.header("content-type"), Some("application/pdf"));
    assert_eq!(store.metadata("/a.pdf").unwrap().unwrap().content_type, "text/plain");
}

#[tokio::test]
async fn extension_mapping_is_case_insensitive() {
    let (router, _) = setup();
    router.handle(post("/README.TXT", None, "hi")).await;

    let res = router.handle(get("/README.TXT")).await;
    assert_eq!(res.header("content-type"), Some("text/plain"));
}

#[tokio::test]
async fn other_methods_fail_without_touching_store() {
    let store = Arc::new(CountingStore::default());
    let router = Router::new(Arc::clone(&store));

    for method in ["DELETE", "PUT", "HEAD", "PATCH", "OPTIONS", "PURGE", "get"] {
        let res = router.handle(Request::new(method, "/a.txt").with_body("x")).await;
        assert_eq!(res.status_code(), 500, "method {method}");
        assert!(res.body().is_empty());
    }

    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn last_write_wins() {
    let (router, _) = setup();

    router.handle(post("/k.txt", Some("text/plain"), "first")).await;
    router.handle(post("/k.txt", Some("text/plain"), "second")).await;

    let res = router.handle(get("/k.txt")).await;
    assert_eq!(&res.body()[..], b"second");
}

#[tokio::test]
async fn missing_or_empty_content_type_defaults_to_octet_stream() {
    let (router, store) = setup();

    let res = router.handle(post("/none", None, "raw")).await;
    assert_eq!(json_body(res.body())["contentType"], "application/octet-stream");

    let res = router.handle(post("/empty", Some(""), "raw")).await;
    assert_eq!(json_body(res.body())["contentType"], "application/octet-stream");

    assert_eq!(
        store.metadata("/empty").unwrap().unwrap().content_type,
        "application/octet-stream",
    );
}

#[tokio::test]
async fn json_with_parameters_is_stored_raw() {
    let (router, _) = setup();

    let res = router.handle(post("/x.json", Some("application/json; charset=utf-8"), "{ not json")).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(json_body(res.body())["contentType"], "application/json; charset=utf-8");

    let res = router.handle(get("/x.json")).await;
    assert_eq!(&res.body()[..], b"{ not json");
}

#[tokio::test]
async fn keys_are_paths_verbatim() {
    let (router, _) = setup();
    router.handle(post("/dir/file.txt", None, "a")).await;

    assert_eq!(router.handle(get("/dir/file.txt")).await.status_code(), 200);
    assert_eq!(router.handle(get("/dir//file.txt")).await.status_code(), 404);
    assert_eq!(router.handle(get("/Dir/file.txt")).await.status_code(), 404);
}

#[tokio::test]
async fn store_failure_is_service_unavailable() {
    let router = Router::new(FailingStore);

    for req in [get("/a.txt"), post("/a.txt", Some("text/plain"), "x")] {
        let res = router.handle(req).await;
        assert_eq!(res.status_code(), 503);

        let body = json_body(res.body());
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "store unavailable");
    }
}

#[tokio::test]
async fn json_keeps_key_order() {
    let (router, _) = setup();
    router.handle(post("/o.json", Some("application/json"), r#"{ "z": 1, "a": 2, "m": 3 }"#)).await;

    let res = router.handle(get("/o.json")).await;
    assert_eq!(&res.body()[..], br#"{"z":1,"a":2,"m":3}"#);
}

#[tokio::test]
async fn every_json_value_kind_round_trips() {
    let (router, _) = setup();
    let docs = [
        json!(null),
        json!(true),
        json!(false),
        json!(0),
        json!(-17),
        json!(3.25),
        json!("a string with \"quotes\" and \u{e9}"),
        json!([]),
        json!([1, "two", null, [false], { "k": 3 }]),
        json!({}),
    ];

    for (i, doc) in docs.iter().enumerate() {
        let path = format!("/kinds/{i}.json");
        let sent = serde_json::to_vec_pretty(doc).unwrap();

        let res = router.handle(post(&path, Some("application/json"), sent)).await;
        assert_eq!(res.status_code(), 200, "{doc}");

        let res = router.handle(get(&path)).await;
        assert_eq!(&json_body(res.body()), doc);
    }
}

#[tokio::test]
async fn deeply_nested_json_is_accepted() {
    let (router, _) = setup();
    let depth = 1000;
    let sent = format!("{}{}", "[ ".repeat(depth), " ]".repeat(depth));

    let res = router.handle(post("/deep.json", Some("application/json"), sent)).await;
    assert_eq!(res.status_code(), 200);

    let res = router.handle(get("/deep.json")).await;
    let expected = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert_eq!(&res.body()[..], expected.as_bytes());
}

#[tokio::test]
async fn repeated_content_type_headers_are_joined() {
    let (router, store) = setup();
    let req = Request::new("POST", "/twice.json")
        .with_header("Content-Type", "application/json")
        .with_header("Content-Type", "application/json")
        .with_body("not json");

    let res = router.handle(req).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(json_body(res.body())["contentType"], "application/json, application/json");

    // The joined type is not exactly `application/json`, so the body is kept raw.
    let res = router.handle(get("/twice.json")).await;
    assert_eq!(&res.body()[..], b"not json");
    assert_eq!(
        store.metadata("/twice.json").unwrap().unwrap().content_type,
        "application/json, application/json",
    );
}
