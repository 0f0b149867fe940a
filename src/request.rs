use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use http::{HeaderMap, Method};
use url::Url;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Identity token of a single send attempt.
///
/// Every attempt carries its own id, including retries of the same logical
/// call: the dispatch engine rebuilds the request from its descriptor before
/// resending, and rebuilding allocates a fresh id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    fn next() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "req-{}", self.0)
    }
}

/// An outgoing request during the interceptor phase.
///
/// Request interceptors may rewrite any field except the [`id`](Self::id);
/// once the request is handed to the transport it is no longer touched.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    id: RequestId,
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl HttpRequest {
    /// Creates a request with a fresh id, no headers, and no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            id: RequestId::next(),
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn method_mut(&mut self) -> &mut Method {
        &mut self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn body_mut(&mut self) -> &mut Option<Bytes> {
        &mut self.body
    }
}
