use thiserror::Error;

/// Errors surfaced by commands to the host.
///
/// None of these are retried or downgraded to a partial reply: a failed
/// command produces no message at all.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing arguments")]
    MissingArguments,

    #[error("no location found for '{0}'")]
    LocationNotFound(String),

    #[error("geocoding request failed: {0}")]
    Geocoding(String),

    #[error("timezone lookup failed: {0}")]
    TimezoneLookup(String),

    #[error("forecast fetch failed: {0}")]
    ForecastFetch(String),

    #[error("malformed upstream payload: {0}")]
    MalformedUpstreamPayload(String),

    #[error(
        "No API key configured for service '{0}'.\n\
         Hint: run `botcmd configure {0}` and enter your API key."
    )]
    MissingApiKey(String),

    #[error("command '{0}' was executed before init")]
    NotInitialized(&'static str),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("command name or alias '{0}' is registered twice")]
    DuplicateCommand(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, CommandError>;
