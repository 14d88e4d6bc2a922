use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// ErrSessionClosed indicates an operation executed after the session
    /// has already been torn down, or a pending negotiation that was
    /// abandoned by the teardown.
    #[error("negotiation session closed")]
    ErrSessionClosed,

    /// ErrNegotiationSuperseded indicates that a pending offer/answer was
    /// replaced by a newer negotiation round before its ICE gathering
    /// completed.
    #[error("negotiation superseded by a newer round")]
    ErrNegotiationSuperseded,

    /// ErrNoLocalDescription indicates the engine reported completion of
    /// gathering without a local description installed.
    #[error("local description is not set")]
    ErrNoLocalDescription,

    /// ErrNoTurnCredentials indicates that a TURN server URL was provided
    /// without required credentials.
    #[error("turn server credentials required")]
    ErrNoTurnCredentials,

    /// ErrInvalidIceServerUrl indicates an ICE server URL whose scheme is
    /// neither stun(s) nor turn(s).
    #[error("invalid ice server url: {0}")]
    ErrInvalidIceServerUrl(String),

    /// ErrGetUserMedia indicates that local capture devices could not be
    /// acquired. The underlying cause is only logged.
    #[error("unable to get user media")]
    ErrGetUserMedia,

    /// ErrNoUserMediaProvider indicates get_user_media was called on a
    /// session built without a media provider.
    #[error("no user media provider configured")]
    ErrNoUserMediaProvider,

    /// Engine carries a failure reported by the transport engine, verbatim.
    #[error("engine: {0}")]
    Engine(String),

    /// Stream carries a failure to attach a media stream to the engine.
    #[error("stream: {0}")]
    Stream(String),

    #[error("json: {0}")]
    Json(String),

    #[error("url: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn new(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
