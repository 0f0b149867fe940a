use thiserror::Error;

use crate::response::HttpResponse;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Stable machine-readable identifier for every [`Error`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCode {
    InvalidUrl,
    InvalidQuery,
    Encode,
    Interceptor,
    Status,
    Transport,
    TransportInit,
    Decode,
    MissingBody,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUrl => "invalid_url",
            Self::InvalidQuery => "invalid_query",
            Self::Encode => "encode",
            Self::Interceptor => "interceptor",
            Self::Status => "status",
            Self::Transport => "transport",
            Self::TransportInit => "transport_init",
            Self::Decode => "decode",
            Self::MissingBody => "missing_body",
        }
    }
}

/// Every way a dispatched call can fail. All variants are terminal: the only
/// signal that restarts a call is [`Outcome::Retry`](crate::Outcome::Retry),
/// which is not an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The descriptor endpoint did not parse as an http/https URL, or the
    /// derived URL was invalid.
    #[error("invalid request url: {url}")]
    InvalidUrl { url: String },
    /// The descriptor query object could not be represented as flat
    /// key/value pairs.
    #[error("failed to encode request query: {source}")]
    InvalidQuery {
        #[source]
        source: serde_urlencoded::ser::Error,
    },
    /// The request body failed to serialize in the resolved format.
    #[error("failed to encode request body: {source}")]
    Encode {
        #[source]
        source: BoxError,
    },
    /// A request or response interceptor failed; aborts the whole send.
    #[error("interceptor failed: {source}")]
    Interceptor {
        #[source]
        source: BoxError,
    },
    /// A response interceptor rejected the status code. Carries the full
    /// response so callers can inspect headers and body.
    #[error("http status error {status} for {} {}", .response.request().method(), .response.request().url())]
    Status {
        status: u16,
        response: Box<HttpResponse>,
    },
    /// The transport failed to produce a well-formed HTTP response.
    #[error("http transport error for {method} {url}: {source}")]
    Transport {
        method: http::Method,
        url: String,
        #[source]
        source: BoxError,
    },
    /// The stock transport could not be constructed (TLS roots, connector).
    #[error("failed to initialize transport: {message}")]
    TransportInit { message: String },
    /// A response body was present but did not decode as the declared type.
    #[error("failed to decode response body: {source}; body={body}")]
    Decode {
        #[source]
        source: BoxError,
        body: String,
    },
    /// A response type was declared but the response carried no body bytes.
    #[error("response declared a typed body but none was returned")]
    MissingBody,
}

impl Error {
    /// Wraps an arbitrary failure raised inside a caller-supplied
    /// interceptor.
    pub fn interceptor(source: impl Into<BoxError>) -> Self {
        Self::Interceptor {
            source: source.into(),
        }
    }

    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidUrl { .. } => ErrorCode::InvalidUrl,
            Self::InvalidQuery { .. } => ErrorCode::InvalidQuery,
            Self::Encode { .. } => ErrorCode::Encode,
            Self::Interceptor { .. } => ErrorCode::Interceptor,
            Self::Status { .. } => ErrorCode::Status,
            Self::Transport { .. } => ErrorCode::Transport,
            Self::TransportInit { .. } => ErrorCode::TransportInit,
            Self::Decode { .. } => ErrorCode::Decode,
            Self::MissingBody => ErrorCode::MissingBody,
        }
    }
}
