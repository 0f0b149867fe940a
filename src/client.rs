use std::sync::Arc;

use http::HeaderMap;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use tracing::{debug, info_span, warn};

use crate::TyreqResult;
use crate::codec::BodyFormat;
use crate::descriptor::{Descriptor, TypedDescriptor};
use crate::error::Error;
use crate::interceptor::{
    NoopRequestInterceptor, Outcome, RequestInterceptor, RequestInterceptorExt,
    ResponseInterceptor, ResponseInterceptorExt,
};
use crate::request::HttpRequest;
use crate::response::HttpResponse;
use crate::transport::{HyperTransport, Transport};
use crate::util::{append_query, merge_headers, parse_endpoint};
use crate::validate::ValidateStatusInterceptor;

const DEFAULT_CLIENT_NAME: &str = "tyreq";

pub struct ClientBuilder {
    client_name: String,
    default_headers: HeaderMap,
    transport: Option<Arc<dyn Transport>>,
    body_format: BodyFormat,
    response_format: BodyFormat,
    request_interceptor: Arc<dyn RequestInterceptor>,
    response_interceptor: Arc<dyn ResponseInterceptor>,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            client_name: DEFAULT_CLIENT_NAME.to_owned(),
            default_headers: HeaderMap::new(),
            transport: None,
            body_format: BodyFormat::default(),
            response_format: BodyFormat::default(),
            request_interceptor: Arc::new(NoopRequestInterceptor),
            response_interceptor: Arc::new(ValidateStatusInterceptor::default()),
        }
    }

    pub fn client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn body_format(mut self, body_format: BodyFormat) -> Self {
        self.body_format = body_format;
        self
    }

    pub fn response_format(mut self, response_format: BodyFormat) -> Self {
        self.response_format = response_format;
        self
    }

    pub fn request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptor = interceptor;
        self
    }

    pub fn response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptor = interceptor;
        self
    }

    pub fn build(self) -> TyreqResult<Client> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HyperTransport::new()?),
        };

        Ok(Client {
            client_name: self.client_name,
            default_headers: self.default_headers,
            transport,
            body_format: self.body_format,
            response_format: self.response_format,
            request_interceptor: self.request_interceptor,
            response_interceptor: self.response_interceptor,
        })
    }
}

/// Sends descriptors and drives each one through its interceptor chains.
///
/// A client carries four defaults: one request interceptor, one response
/// interceptor, and a body format for each direction. Descriptors may add
/// their own interceptors and override either format per call. The defaults
/// are replaceable between calls via the `set_` methods.
#[derive(Clone)]
pub struct Client {
    client_name: String,
    default_headers: HeaderMap,
    transport: Arc<dyn Transport>,
    body_format: BodyFormat,
    response_format: BodyFormat,
    request_interceptor: Arc<dyn RequestInterceptor>,
    response_interceptor: Arc<dyn ResponseInterceptor>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// A client with stock defaults: hyper transport, no request
    /// interceptor, 2xx status validation, JSON both ways.
    pub fn new() -> TyreqResult<Self> {
        Self::builder().build()
    }

    pub fn set_request_interceptor(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.request_interceptor = interceptor;
    }

    pub fn set_response_interceptor(&mut self, interceptor: Arc<dyn ResponseInterceptor>) {
        self.response_interceptor = interceptor;
    }

    pub fn set_body_format(&mut self, body_format: BodyFormat) {
        self.body_format = body_format;
    }

    pub fn set_response_format(&mut self, response_format: BodyFormat) {
        self.response_format = response_format;
    }

    /// Sends `descriptor` and discards the response body.
    ///
    /// The response still runs the full response interceptor chain, so status
    /// validation and retries behave exactly as in
    /// [`send_typed`](Self::send_typed).
    pub async fn send<R: Descriptor>(&self, descriptor: &R) -> TyreqResult<()> {
        self.dispatch(descriptor).await?;
        Ok(())
    }

    /// Sends `descriptor` and decodes the response body into
    /// [`R::Response`](TypedDescriptor::Response).
    ///
    /// Fails with [`Error::MissingBody`] when the accepted response carried
    /// no body at all.
    pub async fn send_typed<R: TypedDescriptor>(&self, descriptor: &R) -> TyreqResult<R::Response> {
        let response = self.dispatch(descriptor).await?;
        let format = descriptor.response_format().unwrap_or(self.response_format);
        let body = response.body().ok_or(Error::MissingBody)?;
        format.decode(body)
    }

    /// Runs one descriptor to completion: build the request, run the request
    /// chain, exchange over the transport, run the response chain, then hand
    /// back or start over on a retry verdict.
    ///
    /// Interceptor chains are resolved once up front; every attempt rebuilds
    /// the request itself from the descriptor, so retries carry fresh ids and
    /// never reuse an intercepted request.
    async fn dispatch<R: Descriptor>(&self, descriptor: &R) -> TyreqResult<HttpResponse> {
        let request_chain = match descriptor.request_interceptor() {
            Some(custom) => custom.chain_before(Arc::clone(&self.request_interceptor)),
            None => Arc::clone(&self.request_interceptor),
        };
        let response_chain = match descriptor.response_interceptor() {
            Some(custom) => custom.chain_after(Arc::clone(&self.response_interceptor)),
            None => Arc::clone(&self.response_interceptor),
        };

        let mut attempt: u32 = 1;
        loop {
            let mut request = self.build_request(descriptor)?;
            let span = info_span!(
                "tyreq.send",
                client = %self.client_name,
                id = %request.id(),
                method = %request.method(),
                url = %request.url(),
                attempt = attempt
            );
            let _enter = span.enter();

            request_chain.intercept(&mut request).await?;
            debug!("sending request");
            let wire = self.transport.execute(&request).await?;

            let mut response = HttpResponse::new(request, wire.status);
            *response.headers_mut() = wire.headers;
            *response.body_mut() = wire.body;

            match response_chain.intercept(&mut response).await? {
                Outcome::Proceed => return Ok(response),
                Outcome::Retry => {
                    warn!(attempt, "response chain requested retry; rebuilding request");
                    attempt += 1;
                }
            }
        }
    }

    fn build_request<R: Descriptor>(&self, descriptor: &R) -> TyreqResult<HttpRequest> {
        let mut url = parse_endpoint(&descriptor.endpoint())?;
        if let Some(query) = descriptor.query()? {
            append_query(&mut url, &query);
        }
        let format = descriptor.body_format().unwrap_or(self.body_format);
        let body = descriptor.encode_body(format)?;

        let mut request = HttpRequest::new(descriptor.method(), url);
        *request.headers_mut() = merge_headers(&self.default_headers, &descriptor.headers());
        if body.is_some() && !request.headers().contains_key(CONTENT_TYPE) {
            request
                .headers_mut()
                .insert(CONTENT_TYPE, format.content_type());
        }
        *request.body_mut() = body;
        Ok(request)
    }
}
