use crate::dispatch::{HttpDispatcher, Request, Transport};
use crate::encode::encode_query;
use crate::endpoint::{validate_endpoint, validate_token, ENGAGE_PATH, TRACK_PATH};
use crate::error::Result;
use crate::transform::{engage_envelope, track_envelope};
use crate::types::{HttpMethod, MutationVerb, Options, Properties};

/// Mixpanel activity logger.
///
/// Every call validates its input, builds a fresh envelope, encodes it and
/// sends exactly one request. Nothing is buffered or retried, and the only
/// state shared between calls is the immutable configuration.
pub struct ActivityLogger {
    opts: ClientOpts,
    transport: Box<dyn Transport>,
}

/// Validated configuration extracted from Options.
struct ClientOpts {
    token: String,
    track_url: String,
    engage_url: String,
    method: HttpMethod,
    query_params: Vec<(String, String)>,
}

impl ActivityLogger {
    /// Create a logger that sends requests over HTTP.
    pub fn new(opts: Options) -> Result<Self> {
        let transport = HttpDispatcher::new(opts.timeout);
        Self::with_transport(opts, transport)
    }

    /// Create a logger with a caller-provided transport.
    pub fn with_transport(opts: Options, transport: impl Transport + 'static) -> Result<Self> {
        validate_token(&opts.token)?;
        let base = validate_endpoint(&opts.endpoint)?;

        let client_opts = ClientOpts {
            token: opts.token,
            track_url: format!("{base}{TRACK_PATH}"),
            engage_url: format!("{base}{ENGAGE_PATH}"),
            method: opts.method,
            query_params: opts.query_params,
        };

        Ok(Self {
            opts: client_opts,
            transport: Box::new(transport),
        })
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Record an event for `user_id`.
    ///
    /// `created_at` (unix seconds) backdates the event; a `created_at` key
    /// in `properties` is honored when the argument is `None`. Optional
    /// `ip` and `name_tag` properties are sent as-is.
    pub fn record_event(
        &self,
        event_name: &str,
        user_id: &str,
        properties: Properties,
        created_at: Option<i64>,
    ) -> Result<()> {
        let envelope = track_envelope(
            &self.opts.token,
            event_name,
            user_id,
            properties,
            created_at,
        )?;
        let query = encode_query(&envelope, &self.opts.query_params)?;
        self.dispatch(&self.opts.track_url, query)
    }

    // ------------------------------------------------------------------
    // People
    // ------------------------------------------------------------------

    /// Apply `verb` to the profile identified by the `user_id` property.
    ///
    /// `ip` and `user_id` go to the outer envelope; `email`, `first_name`,
    /// `last_name`, `created` and `username` are `$`-prefixed; any other
    /// property is sent under the verb unchanged.
    pub fn mutate_profile(&self, verb: MutationVerb, properties: &Properties) -> Result<()> {
        let envelope = engage_envelope(&self.opts.token, verb, properties)?;
        let query = encode_query(&envelope, &self.opts.query_params)?;
        self.dispatch(&self.opts.engage_url, query)
    }

    /// Set profile properties, overwriting existing values.
    pub fn set_user(&self, properties: &Properties) -> Result<()> {
        self.mutate_profile(MutationVerb::Set, properties)
    }

    /// Set profile properties only where not already set.
    pub fn set_once(&self, properties: &Properties) -> Result<()> {
        self.mutate_profile(MutationVerb::SetOnce, properties)
    }

    /// Increment numeric profile properties.
    pub fn add(&self, properties: &Properties) -> Result<()> {
        self.mutate_profile(MutationVerb::Add, properties)
    }

    /// Record a charge against the profile. Not supported; always fails.
    pub fn append(&self, properties: &Properties) -> Result<()> {
        self.mutate_profile(MutationVerb::Append, properties)
    }

    fn dispatch(&self, endpoint: &str, query: String) -> Result<()> {
        let request = Request {
            method: self.opts.method,
            endpoint: endpoint.to_string(),
            query,
        };
        self.transport.send(&request)
    }
}
