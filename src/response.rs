use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use crate::request::HttpRequest;

/// An incoming response during the interceptor phase.
///
/// Owns the request that produced it. Response interceptors may rewrite the
/// status, headers, and body; the originating request is read-only.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    request: HttpRequest,
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl HttpResponse {
    /// Creates a response for `request` with no headers and no body.
    pub fn new(request: HttpRequest, status: StatusCode) -> Self {
        Self {
            request,
            status,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// The request this response answers.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusCode {
        &mut self.status
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

    /// Body bytes as text, lossily; empty when no body was returned.
    pub fn text_lossy(&self) -> String {
        match &self.body {
            Some(body) => String::from_utf8_lossy(body).into_owned(),
            None => String::new(),
        }
    }
}
