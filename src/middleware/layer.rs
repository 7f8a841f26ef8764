//! Tower layer that encodes handler replies.

use std::task::{Context, Poll};

use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::config::EncoderConfig;
use crate::encoder::{Encoder, EncoderOptions, JsonEncoder, SharedEncoder};
use crate::middleware::dispatch::encode_response;

/// Registers reply encoding on a router.
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use reply_encoder::{EncoderOptions, Record, ReplyEncoderLayer};
///
/// let app: Router = Router::new()
///     .route("/user", get(|| async { Record(serde_json::json!({ "name": "John" })) }))
///     .layer(ReplyEncoderLayer::with_options(EncoderOptions { html_escape: true, indent: false }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReplyEncoderLayer {
    encoder: SharedEncoder,
    options: EncoderOptions,
}

impl ReplyEncoderLayer {
    /// Pretty-printed JSON, no post-processing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self {
            encoder: SharedEncoder::default(),
            options,
        }
    }

    pub fn from_config(config: &EncoderConfig) -> Self {
        Self::with_options(config.options()).encoder(JsonEncoder {
            pretty_print: config.pretty_print,
        })
    }

    /// Replace the default encoder.
    pub fn encoder(mut self, encoder: impl Encoder + 'static) -> Self {
        self.encoder = SharedEncoder::new(encoder);
        self
    }

    pub fn options(&self) -> EncoderOptions {
        self.options
    }
}

impl<S> Layer<S> for ReplyEncoderLayer {
    type Service = ReplyEncoderService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ReplyEncoderService {
            inner,
            encoder: self.encoder.clone(),
            options: self.options,
        }
    }
}

/// Service produced by [`ReplyEncoderLayer`].
#[derive(Debug, Clone)]
pub struct ReplyEncoderService<S> {
    inner: S,
    encoder: SharedEncoder,
    options: EncoderOptions,
}

impl<S, ReqBody> Service<Request<ReqBody>> for ReplyEncoderService<S>
where
    S: Service<Request<ReqBody>, Response = Response>,
    S::Future: Send + 'static,
    S::Error: 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // An encoder mapped onto the request by an outer layer wins.
        let encoder = req
            .extensions()
            .get::<SharedEncoder>()
            .cloned()
            .unwrap_or_else(|| self.encoder.clone());
        let options = self.options;
        let future = self.inner.call(req);

        Box::pin(async move {
            let response = future.await?;
            Ok(encode_response(response, encoder.encoder(), options))
        })
    }
}
