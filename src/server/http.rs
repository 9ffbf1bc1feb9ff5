//! HTTP server implementation.

use crate::account::Credentials;
use crate::endpoint::{Endpoint, FormParams};
use crate::matcher::ApiRequest;
use crate::mock::StubRegistry;
use crate::responder::{not_found, ResponseBody};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Shared state for the HTTP server.
struct AppState {
    registry: Arc<StubRegistry>,
    base_path: String,
}

/// Run the HTTP server.
pub async fn run_http_server(
    listener: TcpListener,
    registry: Arc<StubRegistry>,
    shutdown_rx: oneshot::Receiver<()>,
) {
    let base_path = registry.account().credentials.base_path();
    let state = Arc::new(AppState {
        registry,
        base_path,
    });

    // Every path goes through the registry so unknown endpoints are
    // reported the same way as unmatched stubs.
    let app = Router::new()
        .fallback(handle_api_request)
        .with_state(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await
        .ok();
}

/// Handle any API request.
async fn handle_api_request(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = parse_api_request(method, &uri, &headers, &body, &state.base_path);

    match state.registry.find_response(&request).await {
        Some(response) => {
            tracing::debug!("Stub answered {} with {}", request.describe(), response.status);
            json_response(response)
        }
        None => {
            tracing::warn!("No stub matches request: {}", request.describe());
            json_response(not_found(&request))
        }
    }
}

fn json_response(response: ResponseBody) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Body::from(response.json),
    )
        .into_response()
}

/// Parse the raw request parts into an [`ApiRequest`].
fn parse_api_request(
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &[u8],
    base_path: &str,
) -> ApiRequest {
    let path = uri.path().to_string();
    let endpoint = Endpoint::resolve(&method, &path, base_path);
    let query: BTreeMap<String, String> = uri
        .query()
        .map(|query| parse_urlencoded(query).collect())
        .unwrap_or_default();

    let form = match std::str::from_utf8(body) {
        Ok(text) => parse_urlencoded(text).collect(),
        Err(e) => {
            tracing::warn!("Ignoring non UTF-8 request body: {}", e);
            FormParams::new()
        }
    };

    let headers: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_ascii_lowercase(), value.to_string()))
        })
        .collect();

    let credentials = headers
        .get("authorization")
        .and_then(|value| Credentials::from_basic_auth(value));

    ApiRequest {
        method,
        path,
        endpoint,
        query,
        form,
        headers,
        credentials,
    }
}

/// Parse `application/x-www-form-urlencoded` data, decoding keys and values.
fn parse_urlencoded(input: &str) -> impl Iterator<Item = (String, String)> + '_ {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced.clone(),
    }
}
