//! Response → gateway result conversion steps.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;

use crate::models::AdapterError;
use crate::utils::is_text_mime_type;

/// Single-value and multi-value views of the response headers.
pub type FoldedHeaders = (IndexMap<String, String>, IndexMap<String, Vec<String>>);

/// Folds raw response headers into the two maps the gateway accepts.
///
/// Names are lower-cased. The single-value map keeps the last value seen for a
/// name; the multi-value map keeps every value in order.
///
/// # Errors
///
/// Returns `AdapterError::Encoding` if a header name or value is not UTF-8.
pub fn fold_headers(headers: &[(Vec<u8>, Vec<u8>)]) -> Result<FoldedHeaders, AdapterError> {
    let mut single: IndexMap<String, String> = IndexMap::with_capacity(headers.len());
    let mut multi: IndexMap<String, Vec<String>> = IndexMap::with_capacity(headers.len());

    for (name, value) in headers {
        let name = std::str::from_utf8(name)
            .map_err(|e| {
                AdapterError::Encoding(format!(
                    "header name {:?}: {e}",
                    String::from_utf8_lossy(name)
                ))
            })?
            .to_ascii_lowercase();
        let value = std::str::from_utf8(value)
            .map_err(|e| AdapterError::Encoding(format!("value of header `{name}`: {e}")))?
            .to_string();

        multi.entry(name.clone()).or_default().push(value.clone());
        single.insert(name, value);
    }

    Ok((single, multi))
}

/// Encodes the response body for transport.
///
/// Returns the body string and whether it is base64. Empty bodies are sent as
/// `""`. Bodies whose content type matches `text_mime_types` and that are valid
/// UTF-8 are sent as text; everything else is base64.
#[must_use]
pub fn encode_body(
    body: &[u8],
    content_type: Option<&str>,
    text_mime_types: &[String],
) -> (String, bool) {
    if body.is_empty() {
        return (String::new(), false);
    }

    let is_text = content_type.is_some_and(|ct| is_text_mime_type(ct, text_mime_types));
    if is_text && let Ok(text) = std::str::from_utf8(body) {
        return (text.to_string(), false);
    }

    (STANDARD.encode(body), true)
}
