//! Event → request conversion steps.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use lambda_runtime::tracing::debug;

use crate::config::MultiValueHeaderPolicy;
use crate::models::{AdapterError, GatewayEvent, ORIGINAL_PATH_HEADER};
use crate::utils::{encode_query_string, split_host_port, strip_base_path};

/// Server name reported when the event carries no `Host` header.
pub const DEFAULT_SERVER_NAME: &str = "localhost";

/// Scheme assumed when `x-forwarded-proto` is absent; the gateway terminates TLS.
pub const DEFAULT_SCHEME: &str = "https";

const COOKIE_HEADER: &str = "cookie";

/// Decodes the event body into raw bytes.
///
/// # Errors
///
/// Returns `AdapterError::BodyDecode` if `is_base64` is set and the body is not
/// valid standard base64.
pub fn decode_body(body: Option<&str>, is_base64: bool) -> Result<Vec<u8>, AdapterError> {
    match body {
        None | Some("") => Ok(Vec::new()),
        Some(body) if is_base64 => Ok(STANDARD.decode(body)?),
        Some(body) => Ok(body.as_bytes().to_vec()),
    }
}

/// Merges `headers`, `multiValueHeaders` and `cookies` into one lower-cased map.
///
/// Multi-value entries replace single-value entries of the same name. Cookie
/// values are joined with `"; "` and the `cookies` list is appended to them,
/// skipping pairs already present.
#[must_use]
pub fn normalize_headers(
    event: &GatewayEvent,
    policy: MultiValueHeaderPolicy,
) -> IndexMap<String, String> {
    let mut headers: IndexMap<String, String> = event
        .headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect();

    if let Some(multi_value_headers) = &event.multi_value_headers {
        for (name, values) in multi_value_headers {
            if values.is_empty() {
                continue;
            }
            let name = name.to_ascii_lowercase();
            let folded = fold_header_values(&name, values, policy);
            headers.insert(name, folded);
        }
    }

    if let Some(cookies) = event.cookies.as_ref().filter(|cookies| !cookies.is_empty()) {
        let mut pairs: Vec<&str> = headers
            .get(COOKIE_HEADER)
            .map(|value| {
                value
                    .split(';')
                    .map(str::trim)
                    .filter(|pair| !pair.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        for cookie in cookies.iter().map(|cookie| cookie.trim()) {
            if !cookie.is_empty() && !pairs.contains(&cookie) {
                pairs.push(cookie);
            }
        }
        let cookie = pairs.join("; ");
        headers.insert(COOKIE_HEADER.to_string(), cookie);
    }

    headers
}

fn fold_header_values(name: &str, values: &[String], policy: MultiValueHeaderPolicy) -> String {
    if name == COOKIE_HEADER {
        return values.join("; ");
    }
    match policy {
        MultiValueHeaderPolicy::Join => values.join(", "),
        MultiValueHeaderPolicy::Last => values.last().cloned().unwrap_or_default(),
    }
}

/// Resolves the application-relative path from the original-path header.
///
/// # Errors
///
/// Returns `AdapterError::MalformedEvent` if the `X-Envoy-Original-Path`
/// header is missing.
#[allow(clippy::implicit_hasher)]
pub fn resolve_path(
    headers: &IndexMap<String, String>,
    base_path: &str,
) -> Result<String, AdapterError> {
    let original = headers
        .get(&ORIGINAL_PATH_HEADER.to_ascii_lowercase())
        .ok_or_else(|| {
            AdapterError::MalformedEvent(format!("missing `{ORIGINAL_PATH_HEADER}` header"))
        })?;

    let without_query = original
        .split_once('?')
        .map_or(original.as_str(), |(path, _)| path);

    let path = strip_base_path(without_query, base_path);
    debug!(original = %original, resolved = %path, "Resolved request path");
    Ok(path)
}

/// Builds the raw query string from whichever parameter map the event supplies.
#[must_use]
pub fn query_string(event: &GatewayEvent) -> String {
    if let Some(params) = event
        .multi_value_query_string_parameters
        .as_ref()
        .filter(|params| !params.is_empty())
    {
        return encode_query_string(params);
    }

    event
        .query_string_parameters
        .as_ref()
        .filter(|params| !params.is_empty())
        .map(|params| {
            let params: IndexMap<String, Vec<String>> = params
                .iter()
                .map(|(key, value)| (key.clone(), vec![value.clone()]))
                .collect();
            encode_query_string(&params)
        })
        .unwrap_or_default()
}

/// Scheme from `x-forwarded-proto`, defaulting to `https`.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn resolve_scheme(headers: &IndexMap<String, String>) -> String {
    headers
        .get("x-forwarded-proto")
        .map(|proto| proto.split(',').next().unwrap_or_default().trim())
        .filter(|proto| !proto.is_empty())
        .unwrap_or(DEFAULT_SCHEME)
        .to_ascii_lowercase()
}

/// Server `(host, port)` from the `Host` header.
///
/// Without an explicit port, `x-forwarded-port` is used, then the scheme's
/// default port.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn resolve_server(headers: &IndexMap<String, String>, scheme: &str) -> (String, u16) {
    let default_port = if scheme == "http" { 80 } else { 443 };
    let forwarded_port = || {
        headers
            .get("x-forwarded-port")
            .and_then(|port| port.split(',').next())
            .and_then(|port| port.trim().parse::<u16>().ok())
    };

    let Some(host) = headers.get("host").map(|host| host.trim()).filter(|host| !host.is_empty())
    else {
        return (
            DEFAULT_SERVER_NAME.to_string(),
            forwarded_port().unwrap_or(default_port),
        );
    };

    let (name, port) = split_host_port(host);
    let port = port
        .and_then(|port| port.parse::<u16>().ok())
        .or_else(forwarded_port)
        .unwrap_or(default_port);
    (name.to_string(), port)
}
