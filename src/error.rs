use thiserror::Error;

/// Failure below the HTTP layer: the request never produced a usable
/// response. Per check this becomes an `error` outcome, not a `fail`.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid request path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// Failure to obtain a credential. Always fatal: no check can run
/// without a bearer token.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("registration transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("registration rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("no token at {pointer} in register response")]
    MissingToken { pointer: String },
}
