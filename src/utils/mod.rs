//! Small string helpers shared by the decode and encode paths.

use indexmap::IndexMap;

/// Strips the configured gateway base path from a request path.
///
/// Format: `/api/users/5` with base path `/api` → `/users/5`
///
/// An empty or `/` base path is a no-op, as is a path that does not start with
/// the prefix. A base path without a leading slash is treated as if it had one.
/// The result is percent-decoded and never empty.
#[must_use]
pub fn strip_base_path(path: &str, base_path: &str) -> String {
    let stripped = match base_path {
        "" | "/" => path,
        prefix if prefix.starts_with('/') => path.strip_prefix(prefix).unwrap_or(path),
        prefix => path
            .strip_prefix('/')
            .and_then(|rest| rest.strip_prefix(prefix))
            .unwrap_or(path),
    };

    let decoded = urlencoding::decode(stripped).map_or_else(
        |_| stripped.to_string(),
        std::borrow::Cow::into_owned,
    );

    if decoded.is_empty() {
        "/".to_string()
    } else {
        decoded
    }
}

/// Form-encodes query parameters, keeping the order they were given in.
///
/// Spaces become `+`; unreserved characters (`A-Z a-z 0-9 - _ . ~`) are kept.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn encode_query_string(params: &IndexMap<String, Vec<String>>) -> String {
    params
        .iter()
        .flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| format!("{}={}", form_encode(key), form_encode(value)))
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn form_encode(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// Splits a `Host` header into host name and optional port.
///
/// Bracketed IPv6 literals (`[::1]:8080`) are returned without brackets.
#[must_use]
pub fn split_host_port(host: &str) -> (&str, Option<&str>) {
    if let Some(rest) = host.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((address, tail)) => (address, tail.strip_prefix(':')),
            None => (host, None),
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') => (name, Some(port)),
        _ => (host, None),
    }
}

/// Returns `true` if `content_type` matches one of `patterns`.
///
/// Parameters such as `; charset=utf-8` are ignored and comparison is
/// case-insensitive. A pattern ending in `/*` or `/` matches every subtype of
/// that type; any other pattern must equal the media type.
#[must_use]
pub fn is_text_mime_type(content_type: &str, patterns: &[String]) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if media_type.is_empty() {
        return false;
    }

    patterns.iter().any(|pattern| {
        let pattern = pattern.trim().to_ascii_lowercase();
        pattern
            .strip_suffix('*')
            .or_else(|| pattern.strip_suffix('/').map(|_| pattern.as_str()))
            .map_or_else(
                || media_type == pattern,
                |prefix| media_type.starts_with(prefix),
            )
    })
}
