use crate::error::{Error, Result};

/// Path of the event ingestion endpoint.
pub const TRACK_PATH: &str = "/track/";
/// Path of the profile update endpoint.
pub const ENGAGE_PATH: &str = "/engage/";

/// Validate and normalize the API base URL.
///
/// Returns the base without a trailing `/`, or an error for:
///   - Schemes other than `http`/`https`
///   - Embedded credentials
///   - A query string or fragment
///   - Malformed URLs
pub fn validate_endpoint(endpoint: &str) -> Result<String> {
    if endpoint.is_empty() {
        return Err(Error::InvalidConfig("'endpoint' is required".to_string()));
    }

    let url = url_parse(endpoint)?;

    if url.scheme != "http" && url.scheme != "https" {
        return Err(Error::InvalidConfig(format!(
            "endpoint must use http or https: {endpoint}"
        )));
    }

    // Host with optional port; `user:pass@` is rejected below.
    let host_port = url.authority.rsplit('@').next().unwrap_or(url.authority);
    if host_port.is_empty() || host_port.starts_with(':') {
        return Err(invalid_url(endpoint));
    }

    if url.authority.contains('@') {
        return Err(Error::InvalidConfig(
            "endpoint URL must not contain credentials".to_string(),
        ));
    }

    if endpoint.contains('?') || endpoint.contains('#') {
        return Err(Error::InvalidConfig(format!(
            "endpoint must not carry a query or fragment: {endpoint}"
        )));
    }

    Ok(endpoint.trim_end_matches('/').to_string())
}

/// Reject empty tokens and tokens that would break a request.
pub fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(Error::InvalidConfig("'token' is required".to_string()));
    }
    if token.contains('\0') || token.contains('\r') || token.contains('\n') {
        return Err(Error::InvalidConfig(
            "'token' contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

struct ParsedUrl<'a> {
    scheme: String,
    authority: &'a str,
}

fn url_parse(endpoint: &str) -> Result<ParsedUrl<'_>> {
    let (scheme, rest) = endpoint
        .split_once("://")
        .filter(|(scheme, _)| !scheme.is_empty())
        .ok_or_else(|| invalid_url(endpoint))?;

    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);

    Ok(ParsedUrl {
        scheme: scheme.to_lowercase(),
        authority,
    })
}

fn invalid_url(endpoint: &str) -> Error {
    Error::InvalidConfig(format!("invalid endpoint URL: {endpoint}"))
}
