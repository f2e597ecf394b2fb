//! Request relay to the fixed origin.
//!
//! # Responsibilities
//! - Build the destination URL (origin base + inbound path + re-encoded query)
//! - Frame the outbound body as JSON (omitted for GET)
//! - Send with the inbound method and a bounded wait
//! - Parse the origin's JSON reply and keep its status

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{Method, Request, Uri},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde_json::Value;
use url::form_urlencoded;

use crate::config::GatewayConfig;
use crate::http::request::{outbound_headers, X_REQUEST_ID};
use crate::http::response::{RelayError, RelayedResponse};

/// Decode a raw query string into ordered key/value pairs.
pub fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    raw.map(|q| {
        form_urlencoded::parse(q.as_bytes())
            .into_owned()
            .collect()
    })
    .unwrap_or_default()
}

/// Origin base with the inbound path appended verbatim, plus the query
/// re-encoded as `application/x-www-form-urlencoded` when non-empty.
pub fn destination_url(origin: &str, path: &str, query: &[(String, String)]) -> String {
    let mut url = format!("{}{}", origin.trim_end_matches('/'), path);
    if !query.is_empty() {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query)
            .finish();
        url.push('?');
        url.push_str(&encoded);
    }
    url
}

/// JSON body to send upstream, or `None` for GET.
///
/// An empty inbound body relays as `{}`.
pub fn outbound_body(method: &Method, inbound: &[u8]) -> Result<Option<Bytes>, RelayError> {
    if method == Method::GET {
        return Ok(None);
    }
    let value: Value = if inbound.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(inbound).map_err(RelayError::InvalidBody)?
    };
    let text = serde_json::to_vec(&value).map_err(RelayError::InvalidBody)?;
    Ok(Some(Bytes::from(text)))
}

/// Forwards inbound requests to a single origin.
#[derive(Clone)]
pub struct Relay {
    origin: String,
    client: Client<HttpConnector, Body>,
    timeout: Duration,
    max_body_bytes: usize,
    max_response_bytes: usize,
}

impl Relay {
    pub fn new(config: &GatewayConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            origin: config.origin.base_url.clone(),
            client,
            timeout: Duration::from_secs(config.timeouts.origin_secs),
            max_body_bytes: config.limits.max_body_bytes,
            max_response_bytes: config.limits.max_response_bytes,
        }
    }

    /// Relay one inbound request and return the origin's status and body.
    pub async fn forward(
        &self,
        request: Request<Body>,
        request_id: &str,
    ) -> Result<RelayedResponse, RelayError> {
        let (parts, body) = request.into_parts();

        let query = query_pairs(parts.uri.query());
        let destination = destination_url(&self.origin, parts.uri.path(), &query);

        let inbound = axum::body::to_bytes(body, self.max_body_bytes)
            .await
            .map_err(|_| RelayError::BodyTooLarge(self.max_body_bytes))?;
        let outbound = outbound_body(&parts.method, &inbound)?;

        let uri: Uri = destination.parse().map_err(|e: axum::http::uri::InvalidUri| {
            RelayError::InvalidRequest {
                url: destination.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut builder = Request::builder().method(parts.method.clone()).uri(uri);
        if let Some(headers) = builder.headers_mut() {
            *headers = outbound_headers(&parts.headers);
            if let Ok(value) = request_id.parse() {
                headers.insert(X_REQUEST_ID, value);
            }
        }
        let upstream_request = builder
            .body(outbound.map(Body::from).unwrap_or_else(Body::empty))
            .map_err(|e| RelayError::InvalidRequest {
                url: destination.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(
            request_id = %request_id,
            method = %parts.method,
            destination = %destination,
            "Proxying request"
        );

        match tokio::time::timeout(self.timeout, self.exchange(upstream_request)).await {
            Ok(result) => result,
            Err(_) => Err(RelayError::Timeout(self.timeout.as_secs())),
        }
    }

    async fn exchange(&self, request: Request<Body>) -> Result<RelayedResponse, RelayError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| RelayError::Upstream(e.to_string()))?;

        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(Body::new(body), self.max_response_bytes)
            .await
            .map_err(|_| RelayError::ResponseTooLarge(self.max_response_bytes))?;
        let body: Value = serde_json::from_slice(&bytes).map_err(RelayError::InvalidResponse)?;

        Ok(RelayedResponse {
            status: parts.status,
            body,
        })
    }
}
