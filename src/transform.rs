//! Envelope construction for the track and engage endpoints.
//!
//! Engage requests split the caller's properties into two namespaces:
//! service-level keys lifted to the outer envelope, and profile keys left
//! in the nested payload. Both get a `$` prefix; everything else passes
//! through untouched.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{MutationVerb, Properties, PropertyValue};

/// Keys lifted out of the bag into the outer engage envelope.
pub const BASE_KEYS: [&str; 2] = ["ip", "user_id"];

/// Profile keys renamed in place inside the nested engage payload.
pub const PEOPLE_KEYS: [&str; 5] = ["email", "first_name", "last_name", "created", "username"];

const USER_ID: &str = "user_id";

/// Body of a `/track/` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackEnvelope {
    pub event: String,
    pub properties: Properties,
}

/// Body of an `/engage/` request.
///
/// Serializes as `{"$ip", "$token", "$user_id", "<verb>": {...}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngageEnvelope {
    pub token: String,
    /// `$`-prefixed service keys (`$ip`, `$user_id`).
    pub service: Properties,
    pub verb: MutationVerb,
    pub payload: Properties,
}

impl EngageEnvelope {
    pub fn ip(&self) -> Option<&PropertyValue> {
        self.service.get("$ip")
    }
}

impl Serialize for EngageEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.service.len() + 2))?;
        for (key, value) in &self.service {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("$token", &self.token)?;
        map.serialize_entry(self.verb.as_key(), &self.payload)?;
        map.end()
    }
}

/// Build a track envelope.
///
/// `user_id` and the token are written into the event properties. A
/// creation timestamp (explicit, or an integer `created_at` key in the
/// bag) is renamed to `time` so the event is backdated. A non-integer
/// `created_at` in the bag is sent as an ordinary property.
pub fn track_envelope(
    token: &str,
    event_name: &str,
    user_id: &str,
    mut properties: Properties,
    created_at: Option<i64>,
) -> Result<TrackEnvelope> {
    if event_name.is_empty() {
        return Err(Error::MissingField("event_name"));
    }
    if user_id.is_empty() {
        return Err(Error::MissingField(USER_ID));
    }

    properties.insert(USER_ID.to_string(), user_id.into());
    properties.insert("token".to_string(), token.into());

    let bag_created_at = match properties.get("created_at") {
        Some(PropertyValue::Integer(ts)) => Some(*ts),
        _ => None,
    };
    if let Some(ts) = created_at.or(bag_created_at) {
        properties.remove("created_at");
        properties.insert("time".to_string(), ts.into());
    }

    Ok(TrackEnvelope {
        event: event_name.to_string(),
        properties,
    })
}

/// Build an engage envelope for `verb` from the caller's properties.
///
/// The caller's map is never modified.
pub fn engage_envelope(
    token: &str,
    verb: MutationVerb,
    properties: &Properties,
) -> Result<EngageEnvelope> {
    match properties.get(USER_ID) {
        Some(v) if !v.is_blank() => {}
        _ => return Err(Error::MissingField(USER_ID)),
    }
    if verb == MutationVerb::Append {
        return Err(Error::NotImplemented(verb.name()));
    }

    let mut payload = properties.clone();
    let mut service = Properties::new();

    for key in BASE_KEYS {
        if let Some(value) = payload.remove(key) {
            service.insert(format!("${key}"), value);
        }
    }
    for key in PEOPLE_KEYS {
        if let Some(value) = payload.remove(key) {
            payload.insert(format!("${key}"), value);
        }
    }

    // "0" tells the API not to geolocate from the sender's (server) address.
    service
        .entry("$ip".to_string())
        .or_insert(PropertyValue::Integer(0));

    Ok(EngageEnvelope {
        token: token.to_string(),
        service,
        verb,
        payload,
    })
}
