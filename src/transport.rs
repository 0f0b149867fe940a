use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client as HyperClient;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;

use crate::TyreqResult;
use crate::error::{BoxError, Error};
use crate::request::HttpRequest;

/// Raw result of one wire exchange, before any response interceptor runs.
///
/// `body` is `None` when the server returned no body bytes at all.
pub struct WireResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

/// Performs one HTTP exchange.
///
/// This is the only seam the dispatch engine talks to the network through, so
/// swapping it out (for a scripted double in tests, or another HTTP stack)
/// changes nothing above it. Implementations hold no call state; every
/// [`execute`](Self::execute) stands alone.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> TyreqResult<WireResponse>;
}

type Connector = HttpsConnector<HttpConnector>;

/// Production [`Transport`] backed by hyper with rustls for `https`.
pub struct HyperTransport {
    client: HyperClient<Connector, Full<Bytes>>,
}

impl HyperTransport {
    /// Builds a transport with the ring crypto provider and the bundled
    /// webpki root certificates.
    pub fn new() -> TyreqResult<Self> {
        let https = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())
            .map_err(|source| Error::TransportInit {
                message: source.to_string(),
            })?
            .https_or_http()
            .enable_http1()
            .build();
        let client = HyperClient::builder(TokioExecutor::new()).build(https);
        Ok(Self { client })
    }

    async fn perform(
        &self,
        request: http::Request<Full<Bytes>>,
    ) -> Result<http::Response<Incoming>, hyper_util::client::legacy::Error> {
        self.client.request(request).await
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn execute(&self, request: &HttpRequest) -> TyreqResult<WireResponse> {
        let mut builder = http::Request::builder()
            .method(request.method().clone())
            .uri(request.url().as_str());
        if let Some(headers) = builder.headers_mut() {
            *headers = request.headers().clone();
        }
        let body = Full::new(request.body().cloned().unwrap_or_default());
        let wire = builder
            .body(body)
            .map_err(|source| transport_error(request, source.into()))?;

        let response = self
            .perform(wire)
            .await
            .map_err(|source| transport_error(request, source.into()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let collected = response
            .into_body()
            .collect()
            .await
            .map_err(|source| transport_error(request, source.into()))?;
        let bytes = collected.to_bytes();
        let body = if bytes.is_empty() { None } else { Some(bytes) };

        Ok(WireResponse {
            status,
            headers,
            body,
        })
    }
}

fn transport_error(request: &HttpRequest, source: BoxError) -> Error {
    Error::Transport {
        method: request.method().clone(),
        url: request.url().to_string(),
        source,
    }
}
