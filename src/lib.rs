//! Mixpanel activity logger for Rust.
//!
//! Turns event and profile calls into encoded requests against the
//! Mixpanel ingestion API (`/track/` and `/engage/`). Each call is one
//! synchronous request; the payload travels as base64 JSON in the `data`
//! query parameter and success is decided by the HTTP status alone.
//!
//! ```rust,no_run
//! use mixpanel_activity::{ActivityLogger, Options, Properties};
//!
//! let logger = ActivityLogger::new(Options::new("project-token"))?;
//! logger.record_event("signup", "u1", Properties::new(), None)?;
//!
//! let mut profile = Properties::new();
//! profile.insert("user_id".into(), "u1".into());
//! profile.insert("email".into(), "a@b.com".into());
//! logger.set_user(&profile)?;
//! # Ok::<(), mixpanel_activity::Error>(())
//! ```

mod client;
mod dispatch;
mod encode;
mod endpoint;
mod error;
mod transform;
mod types;

pub use client::ActivityLogger;
pub use dispatch::{HttpDispatcher, Request, Transport};
pub use encode::{encode_payload, encode_query, DATA_PARAM};
pub use endpoint::{validate_endpoint, ENGAGE_PATH, TRACK_PATH};
pub use error::{Error, Result};
pub use transform::{engage_envelope, track_envelope, EngageEnvelope, TrackEnvelope};
pub use types::{HttpMethod, MutationVerb, Options, Properties, PropertyValue, DEFAULT_ENDPOINT};
