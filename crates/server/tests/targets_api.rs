mod common;

use common::TestServer;
use indoc::indoc;
use reachard::storage::Target;
use serde_json::json;

#[tokio::test]
async fn create_then_list() {
    let server = TestServer::start().await;

    let reply = server.post("application/json", r#"{"name":"alpha"}"#).await;
    assert_eq!(reply.status, 200);
    assert!(reply.body.is_empty(), "{reply:?}");

    let reply = server.list().await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.header("content-type"), Some("application/json"));
    assert_eq!(reply.json(), json!([{"id": 1, "name": "alpha"}]));

    server.stop().await;
}

#[tokio::test]
async fn delete_then_list() {
    let server = TestServer::start().await;
    server.post("application/json", r#"{"name":"alpha"}"#).await;

    let reply = server.delete("application/json", r#"{"id":1}"#).await;
    assert_eq!(reply.status, 200);
    assert!(reply.body.is_empty(), "{reply:?}");

    assert_eq!(server.list().await.body, "[]");
    server.stop().await;
}

#[tokio::test]
async fn wrong_content_type_is_unsupported() {
    let server = TestServer::start().await;

    let reply = server.post("text/plain", r#"{"name":"alpha"}"#).await;
    assert_eq!(reply.status, 415);
    assert_eq!(reply.body, "unsupported media type");

    let reply = server.delete("text/plain", r#"{"id":1}"#).await;
    assert_eq!(reply.status, 415);

    assert!(server.store.snapshot().is_empty());
}

#[tokio::test]
async fn malformed_json_changes_nothing() {
    let server = TestServer::start().await;
    server.post("application/json", r#"{"name":"alpha"}"#).await;

    let reply = server.post("application/json", "not json").await;
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body, "failed to parse as JSON");

    let reply = server.delete("application/json", "{\"id\":").await;
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body, "failed to parse as JSON");

    assert_eq!(server.store.snapshot(), vec![Target::new(1, "alpha")]);
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let server = TestServer::start().await;

    let reply = server.post("application/json", r#"{"title":"alpha"}"#).await;
    assert_eq!((reply.status, reply.body.as_str()), (400, "failed to parse target name"));

    let reply = server.delete("application/json; charset=utf-8", r#"{"name":"alpha"}"#).await;
    assert_eq!((reply.status, reply.body.as_str()), (400, "failed to parse target ID"));
}

#[tokio::test]
async fn unknown_url_and_method() {
    let server = TestServer::start().await;

    let reply = server.send("GET /unknown/ HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").await;
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body, "url not allowed");

    let reply = server.send("PUT /targets/ HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").await;
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body, "method not allowed");
}

#[tokio::test]
async fn ids_are_fresh_after_delete() {
    let server = TestServer::start().await;

    for name in ["alpha", "beta", "gamma"] {
        assert_eq!(server.post("application/json", &json!({ "name": name }).to_string()).await.status, 200);
    }
    assert_eq!(server.delete("application/json", r#"{"id":3}"#).await.status, 200);
    assert_eq!(server.delete("application/json", r#"{"id":3}"#).await.status, 200);
    assert_eq!(server.post("application/json", r#"{"name":"delta"}"#).await.status, 200);

    assert_eq!(
        server.list().await.json(),
        json!([{"id": 1, "name": "alpha"}, {"id": 2, "name": "beta"}, {"id": 4, "name": "delta"}])
    );
}

#[tokio::test]
async fn chunked_request_body() {
    let server = TestServer::start().await;

    let request = indoc! {"
        POST /targets/ HTTP/1.1\r
        Host: localhost\r
        Content-Type: application/json\r
        Transfer-Encoding: chunked\r
        Connection: close\r
        \r
        4\r
        {\"na\r
        9\r
        me\":\"alph\r
        3\r
        a\"}\r
        0\r
        \r
    "};

    let reply = server.send(request).await;
    assert_eq!(reply.status, 200, "{reply:?}");
    assert_eq!(server.store.snapshot(), vec![Target::new(1, "alpha")]);
}

#[tokio::test]
async fn keep_alive_serves_several_requests() {
    let server = TestServer::start().await;

    let request = indoc! {"
        POST /targets/ HTTP/1.1\r
        Host: localhost\r
        Content-Type: application/json\r
        Content-Length: 16\r
        \r
        {\"name\":\"alpha\"}GET /targets/ HTTP/1.1\r
        Host: localhost\r
        Connection: close\r
        \r
    "};

    let reply = server.send(request).await;
    assert_eq!(reply.status, 200);
    assert!(reply.body.ends_with(r#"[{"id":1,"name":"alpha"}]"#), "{reply:?}");
}
