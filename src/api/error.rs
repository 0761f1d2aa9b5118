use reqwest::StatusCode;

/// Substituted when a failed response carries no parseable JSON body.
pub const GENERIC_ERROR: &str = "Request failed";

/// The one way a request can fail: either the server answered outside the
/// success range, or the request never produced a usable answer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{msg} (status {status})", msg = .error.as_deref().unwrap_or(GENERIC_ERROR))]
    Status {
        status: StatusCode,
        error: Option<String>,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// Build the error for a non-success response from its raw body.
    ///
    /// A JSON body is kept as the server sent it, even when it has no
    /// `error` field. Anything else (including `null`) becomes the generic
    /// `Request failed` error.
    pub fn from_failure(status: StatusCode, body: &[u8]) -> Error {
        let error = match serde_json::from_slice::<Option<serde_json::Value>>(body) {
            Ok(Some(value)) => match value.get("error") {
                Some(serde_json::Value::String(text)) => Some(text.clone()),
                Some(serde_json::Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            },
            Ok(None) | Err(_) => Some(GENERIC_ERROR.to_string()),
        };

        Error::Status { status, error }
    }

    /// The server-supplied error text, if there is a non-empty one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Status { error, .. } => error.as_deref().filter(|text| !text.is_empty()),
            Error::Transport(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport(err) => err.status(),
        }
    }
}
