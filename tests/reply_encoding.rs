//! Reply layer behavior through a real axum router.

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use reply_encoder::{
    EncodeError, Encoder, EncoderOptions, ErrorBody, JsonEncoder, Payload, Record, Records, Reply,
    ReplyContext, ReplyEncoderLayer, SharedEncoder,
};

mod common;

use common::{get as send, User};

async fn friend_handler() -> Record<User> {
    Record(User::named("Zach"))
}

async fn user_handler() -> Record<User> {
    let Record(friend) = friend_handler().await;
    Record(User {
        name: "John".into(),
        friend: friend.name,
    })
}

fn app(layer: ReplyEncoderLayer) -> Router {
    Router::new()
        .route("/user", get(user_handler))
        .route("/friend", get(friend_handler))
        .route("/created", get(|| async { (StatusCode::CREATED, Record(User::named("Ann"))) }))
        .route("/accepted", get(|| async { Reply::with_status(StatusCode::ACCEPTED, json!({ "queued": 3 })) }))
        .route(
            "/missing",
            get(|| async {
                let mut ctx = ReplyContext::new();
                ctx.write_header(StatusCode::NOT_FOUND);
                ctx.finish()
            }),
        )
        .route("/broken", get(|| async { Reply::empty() }))
        .route("/bytes", get(|| async { Payload::bytes(&b"<raw & bytes>"[..]) }))
        .route("/count", get(|| async { Payload::scalar(42) }))
        .route(
            "/people",
            get(|| async { Records(vec![User::named("Joe"), User::named("Heather")]) }),
        )
        .route("/html", get(|| async { Record(json!({ "markup": "<b>&</b>", "tags": ["i"] })) }))
        .route("/plain", get(|| async { "untouched" }))
        .route("/state", get(|| async { Reply::new(json!("ready")) }))
        .layer(layer)
}

#[tokio::test]
async fn test_simple_handler() {
    let res = send(app(ReplyEncoderLayer::new()), "/friend").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers[header::CONTENT_TYPE], "application/json; charset=utf-8");
    assert_eq!(res.json::<User>(), User::named("Zach"));
}

#[tokio::test]
async fn test_multi_calling_handler() {
    let layer = ReplyEncoderLayer::new().encoder(JsonEncoder::new());
    let res = send(app(layer), "/user").await;
    assert_eq!(res.text(), r#"{"name":"John","friend":"Zach"}"#);

    let res = send(app(ReplyEncoderLayer::new()), "/friend").await;
    assert_eq!(res.json::<User>().name, "Zach");
}

#[tokio::test]
async fn test_default_layer_pretty_prints() {
    let res = send(app(ReplyEncoderLayer::new()), "/user").await;
    assert_eq!(res.text(), "{\n  \"name\": \"John\",\n  \"friend\": \"Zach\"\n}");
}

#[tokio::test]
async fn test_route_miss_untouched() {
    let res = send(app(ReplyEncoderLayer::new()), "/nobody").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.is_empty());
    assert!(res.headers.get(header::CONTENT_TYPE).is_none());
}

#[tokio::test]
async fn test_status_and_value() {
    let res = send(app(ReplyEncoderLayer::new()), "/created").await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json::<User>(), User::named("Ann"));

    let res = send(app(ReplyEncoderLayer::new()), "/accepted").await;
    assert_eq!(res.status, StatusCode::ACCEPTED);
    assert_eq!(res.json::<Value>(), json!({ "queued": 3 }));
}

#[tokio::test]
async fn test_captured_status_without_body() {
    let res = send(app(ReplyEncoderLayer::new()), "/missing").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<ErrorBody>(),
        ErrorBody {
            error: 404,
            message: "Not Found".into()
        }
    );
}

#[tokio::test]
async fn test_no_status_no_body_aborts() {
    let res = send(app(ReplyEncoderLayer::new()), "/broken").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.is_empty());
}

#[tokio::test]
async fn test_bytes_written_verbatim() {
    let layer = ReplyEncoderLayer::with_options(EncoderOptions {
        html_escape: true,
        indent: true,
    });
    let res = send(app(layer), "/bytes").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), "<raw & bytes>");
    assert!(res.headers.get(header::CONTENT_TYPE).is_none());
}

#[tokio::test]
async fn test_scalar_and_list() {
    let res = send(app(ReplyEncoderLayer::new()), "/count").await;
    assert_eq!(res.text(), "42");

    let res = send(app(ReplyEncoderLayer::new()), "/people").await;
    assert_eq!(
        res.json::<Vec<User>>(),
        vec![User::named("Joe"), User::named("Heather")]
    );
}

#[tokio::test]
async fn test_json_string_written_as_text() {
    let res = send(app(ReplyEncoderLayer::new()), "/state").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), "ready");
    assert!(res.headers.get(header::CONTENT_TYPE).is_none());
}

#[tokio::test]
async fn test_plain_axum_response_passes_through() {
    let res = send(app(ReplyEncoderLayer::new()), "/plain").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    assert_eq!(res.text(), "untouched");
}

#[tokio::test]
async fn test_html_escape_option() {
    let layer = ReplyEncoderLayer::with_options(EncoderOptions {
        html_escape: true,
        indent: false,
    })
    .encoder(JsonEncoder::new());
    let res = send(app(layer), "/html").await;
    assert_eq!(
        res.text(),
        r#"{"markup":"\u003cb\u003e\u0026\u003c/b\u003e","tags":["i"]}"#
    );
    // Still the same document once decoded.
    assert_eq!(res.json::<Value>(), json!({ "markup": "<b>&</b>", "tags": ["i"] }));
}

#[tokio::test]
async fn test_indent_option() {
    let layer = ReplyEncoderLayer::with_options(EncoderOptions {
        html_escape: false,
        indent: true,
    });
    let res = send(app(layer), "/html").await;
    assert_eq!(
        res.text(),
        "{\n\t\"markup\": \"<b>&</b>\",\n\t\"tags\": [\n\t\t\"i\"\n\t]\n}"
    );
}

/// Writes the top-level keys of an object as a comma-separated line.
#[derive(Debug)]
struct KeysEncoder;

impl Encoder for KeysEncoder {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let map = value
            .as_object()
            .ok_or_else(|| EncodeError::custom("keys", "expected an object"))?;
        Ok(map.keys().cloned().collect::<Vec<_>>().join(",").into_bytes())
    }

    fn content_type(&self) -> &'static str {
        "text/csv"
    }
}

#[tokio::test]
async fn test_custom_encoder() {
    let res = send(app(ReplyEncoderLayer::new().encoder(KeysEncoder)), "/user").await;
    assert_eq!(res.headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(res.text(), "name,friend");
}

#[tokio::test]
async fn test_indent_over_custom_encoder_aborts() {
    let layer = ReplyEncoderLayer::with_options(EncoderOptions {
        html_escape: false,
        indent: true,
    })
    .encoder(KeysEncoder);
    let res = send(app(layer), "/user").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.is_empty());
}

#[tokio::test]
async fn test_custom_encoder_failure_aborts() {
    let res = send(app(ReplyEncoderLayer::new().encoder(KeysEncoder)), "/people").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.is_empty());
}

async fn map_keys_encoder(mut req: Request, next: Next) -> Response {
    req.extensions_mut().insert(SharedEncoder::new(KeysEncoder));
    next.run(req).await
}

#[tokio::test]
async fn test_per_request_encoder_override() {
    let router = app(ReplyEncoderLayer::new()).layer(middleware::from_fn(map_keys_encoder));
    let res = send(router, "/accepted").await;
    assert_eq!(res.status, StatusCode::ACCEPTED);
    assert_eq!(res.text(), "queued");
}
