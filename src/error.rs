use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Durable credential storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to access credential storage at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("credential storage at {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures reported by a live channel session.
#[derive(Error, Debug, Clone)]
pub enum ChannelError {
    /// An inbound frame was not a JSON document. The session stays open.
    #[error("malformed frame ({bytes} bytes): {reason}")]
    MalformedFrame { bytes: usize, reason: String },

    /// The transport reported a failure.
    #[error("channel transport error: {0}")]
    Transport(String),

    /// A send was attempted on a session that is not open.
    #[error("channel for bot {bot_id} is not open")]
    NotOpen { bot_id: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// The remote service answered with a non-2xx status.
    #[error("remote rejected request with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),

    /// The navigation guard refused the destination view.
    #[error("cannot open '{route}': {}", denial(.redirect))]
    NavigationDenied {
        route: String,
        redirect: Option<String>,
    },
}

impl Error {
    /// True when the remote service rejected the credential (401 or 403).
    ///
    /// The gateway never acts on this itself; callers decide whether to
    /// clear the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Remote { status: 401 | 403, .. })
    }

    /// HTTP status carried by a remote rejection, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn denial(redirect: &Option<String>) -> String {
    match redirect {
        Some(to) => format!("redirected to '{to}'"),
        None => "no such route".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::WebSocket(Box::new(err))
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
