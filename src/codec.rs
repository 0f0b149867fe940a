use bytes::Bytes;
use http::HeaderValue;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::TyreqResult;
use crate::error::Error;
use crate::util::truncate_body;

/// Wire format applied to typed request and response bodies.
///
/// The client carries one default for each direction; descriptors may
/// override either per call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BodyFormat {
    /// `application/json` via `serde_json`.
    #[default]
    Json,
    /// `application/x-www-form-urlencoded` via `serde_urlencoded`.
    Form,
}

impl BodyFormat {
    /// The `Content-Type` the dispatch engine stamps on encoded bodies when
    /// the descriptor did not set one itself.
    pub fn content_type(self) -> HeaderValue {
        match self {
            Self::Json => HeaderValue::from_static("application/json"),
            Self::Form => HeaderValue::from_static("application/x-www-form-urlencoded"),
        }
    }

    /// Serializes `value` into wire bytes.
    pub fn encode<T: Serialize>(self, value: &T) -> TyreqResult<Bytes> {
        match self {
            Self::Json => serde_json::to_vec(value)
                .map(Bytes::from)
                .map_err(|source| Error::Encode {
                    source: source.into(),
                }),
            Self::Form => serde_urlencoded::to_string(value)
                .map(|encoded| Bytes::from(encoded.into_bytes()))
                .map_err(|source| Error::Encode {
                    source: source.into(),
                }),
        }
    }

    /// Deserializes wire bytes into `T`. Failures carry a bounded preview of
    /// the offending body for diagnostics.
    pub fn decode<T: DeserializeOwned>(self, body: &[u8]) -> TyreqResult<T> {
        match self {
            Self::Json => serde_json::from_slice(body).map_err(|source| Error::Decode {
                source: source.into(),
                body: truncate_body(body),
            }),
            Self::Form => serde_urlencoded::from_bytes(body).map_err(|source| Error::Decode {
                source: source.into(),
                body: truncate_body(body),
            }),
        }
    }
}

/// Serializes a descriptor's query value into an url-encoded string, ready to
/// append to the endpoint.
pub fn encode_query<T: Serialize>(query: &T) -> TyreqResult<String> {
    serde_urlencoded::to_string(query).map_err(|source| Error::InvalidQuery { source })
}
