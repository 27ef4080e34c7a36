use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

/// Default ingestion host. The API is reached over plain HTTP.
pub const DEFAULT_ENDPOINT: &str = "http://api.mixpanel.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Caller-supplied properties attached to an event or profile mutation.
///
/// Sorted keys keep the encoded payload deterministic.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A single property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Map(Properties),
}

impl PropertyValue {
    /// Empty strings count as absent for required identifiers.
    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, PropertyValue::String(s) if s.is_empty())
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        PropertyValue::Integer(v.into())
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Integer(v)
    }
}

impl From<u32> for PropertyValue {
    fn from(v: u32) -> Self {
        PropertyValue::Integer(v.into())
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<Properties> for PropertyValue {
    fn from(v: Properties) -> Self {
        PropertyValue::Map(v)
    }
}

/// Profile update operation carried by an engage request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationVerb {
    Set,
    SetOnce,
    Add,
    /// Recognized by the API surface but not supported; always fails.
    Append,
}

impl MutationVerb {
    /// Key holding the property payload in the engage envelope.
    pub fn as_key(&self) -> &'static str {
        match self {
            MutationVerb::Set => "$set",
            MutationVerb::SetOnce => "$set_once",
            MutationVerb::Add => "$add",
            MutationVerb::Append => "$append",
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        &self.as_key()[1..]
    }
}

impl fmt::Display for MutationVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Parses `set`, `set_once`, `add` or `append`, with or without the `$`
/// prefix. Anything else is `Error::UnknownVerb`.
impl FromStr for MutationVerb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('$') {
            "set" => Ok(MutationVerb::Set),
            "set_once" => Ok(MutationVerb::SetOnce),
            "add" => Ok(MutationVerb::Add),
            "append" => Ok(MutationVerb::Append),
            other => Err(Error::UnknownVerb(other.to_string())),
        }
    }
}

/// How the encoded payload travels to the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// POST to the endpoint path with the query string as the body.
    #[default]
    Post,
    /// GET the endpoint with the query string appended to the URL.
    Get,
}

/// Configuration for the activity logger.
#[derive(Debug, Clone)]
pub struct Options {
    /// Project token attached to every envelope (required).
    pub token: String,
    /// Base URL of the ingestion API. Default: `http://api.mixpanel.com`.
    pub endpoint: String,
    /// Per-request deadline. Default: 10s.
    pub timeout: Duration,
    /// Request method. Default: POST.
    pub method: HttpMethod,
    /// Query parameters sent alongside `data` on every request.
    pub query_params: Vec<(String, String)>,
}

impl Options {
    /// Create options with the token only; all others use defaults.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            method: HttpMethod::Post,
            query_params: Vec::new(),
        }
    }

    /// Override the base endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Read `MIXPANEL_TOKEN` (required) and `MIXPANEL_API_URL` (optional).
    pub fn from_env() -> Result<Self, Error> {
        let token = std::env::var("MIXPANEL_TOKEN")
            .map_err(|_| Error::InvalidConfig("MIXPANEL_TOKEN is not set".to_string()))?;
        let mut opts = Self::new(token);
        if let Ok(endpoint) = std::env::var("MIXPANEL_API_URL") {
            opts.endpoint = endpoint;
        }
        Ok(opts)
    }
}
