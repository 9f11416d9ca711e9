//! Adapter configuration.
//!
//! Built once at cold start and shared read-only by every invocation.

use serde::Deserialize;

use crate::models::AdapterError;

/// MIME types whose bodies are returned as plain text instead of base64.
pub const DEFAULT_TEXT_MIME_TYPES: &[&str] = &[
    "text/*",
    "application/json",
    "application/javascript",
    "application/xml",
    "application/vnd.api+json",
    "application/vnd.oai.openapi",
];

const BASE_PATH_ENV: &str = "API_GATEWAY_BASE_PATH";
const TEXT_MIME_TYPES_ENV: &str = "TEXT_MIME_TYPES";
const HEADER_POLICY_ENV: &str = "MULTI_VALUE_HEADER_POLICY";

/// How repeated request header values (other than `cookie`) are folded into one.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MultiValueHeaderPolicy {
    /// Join all values with `", "`.
    #[default]
    Join,
    /// Keep only the final value.
    Last,
}

impl std::str::FromStr for MultiValueHeaderPolicy {
    type Err = AdapterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "join" => Ok(Self::Join),
            "last" => Ok(Self::Last),
            other => Err(AdapterError::Config(format!(
                "unknown multi-value header policy `{other}`, expected `join` or `last`"
            ))),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AdapterConfig {
    /// Prefix removed from request paths before they reach the application.
    pub api_gateway_base_path: String,
    pub text_mime_types: Vec<String>,
    pub multi_value_header_policy: MultiValueHeaderPolicy,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            api_gateway_base_path: String::new(),
            text_mime_types: DEFAULT_TEXT_MIME_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
            multi_value_header_policy: MultiValueHeaderPolicy::default(),
        }
    }
}

impl AdapterConfig {
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.api_gateway_base_path = base_path.into();
        self
    }

    #[must_use]
    pub fn with_text_mime_types<I, S>(mut self, mime_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_mime_types = mime_types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_multi_value_header_policy(mut self, policy: MultiValueHeaderPolicy) -> Self {
        self.multi_value_header_policy = policy;
        self
    }

    /// Loads configuration from the function's environment variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Config` if `MULTI_VALUE_HEADER_POLICY` holds an
    /// unknown value.
    pub fn from_env() -> Result<Self, AdapterError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AdapterConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Config` on an unknown header policy.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdapterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_path) = lookup(BASE_PATH_ENV) {
            config.api_gateway_base_path = base_path.trim().to_string();
        }

        if let Some(mime_types) = lookup(TEXT_MIME_TYPES_ENV) {
            config.text_mime_types = mime_types
                .split(',')
                .map(str::trim)
                .filter(|mime| !mime.is_empty())
                .map(ToString::to_string)
                .collect();
        }

        if let Some(policy) = lookup(HEADER_POLICY_ENV) {
            config.multi_value_header_policy = policy.parse()?;
        }

        Ok(config)
    }
}
