//! Wire encoding: JSON, then base64 with whitespace removed, carried in the
//! `data` query parameter.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::error::Result;

/// Name of the mandatory payload parameter.
pub const DATA_PARAM: &str = "data";

/// Serialize `envelope` to the base64 form the API expects.
pub fn encode_payload<T: Serialize>(envelope: &T) -> Result<String> {
    let json = serde_json::to_vec(envelope)?;
    let mut encoded = STANDARD.encode(json);
    // The API rejects whitespace inside the query value.
    encoded.retain(|c| !c.is_whitespace());
    Ok(encoded)
}

/// Build the full query string for `envelope`.
///
/// `extra` keeps its order. A caller-supplied `data` entry is replaced in
/// place; otherwise `data` is appended last. Every value is
/// percent-encoded.
pub fn encode_query<T: Serialize>(envelope: &T, extra: &[(String, String)]) -> Result<String> {
    let data = encode_payload(envelope)?;

    let mut params: Vec<(&str, &str)> = extra
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    match params.iter_mut().find(|p| p.0 == DATA_PARAM) {
        Some(slot) => slot.1 = data.as_str(),
        None => params.push((DATA_PARAM, data.as_str())),
    }

    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    Ok(query)
}
