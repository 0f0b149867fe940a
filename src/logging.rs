use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::TyreqResult;
use crate::interceptor::{Outcome, RequestInterceptor, ResponseInterceptor};
use crate::request::HttpRequest;
use crate::response::HttpResponse;
use crate::util::truncate_body;

type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Request interceptor that records every outgoing request.
///
/// By default lines go to the `tyreq` tracing target at debug level; a custom
/// sink diverts them wholesale, which keeps tests and embedders free to
/// capture the output.
pub struct LogRequestInterceptor {
    sink: Option<LogSink>,
}

impl LogRequestInterceptor {
    pub fn new() -> Self {
        Self { sink: None }
    }

    pub fn with_sink(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            sink: Some(Arc::new(sink)),
        }
    }
}

impl Default for LogRequestInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestInterceptor for LogRequestInterceptor {
    async fn intercept(&self, request: &mut HttpRequest) -> TyreqResult<()> {
        let body = request
            .body()
            .map(|body| truncate_body(body))
            .unwrap_or_default();
        match &self.sink {
            Some(sink) => sink(&format!(
                "request {} {} {} headers={:?} body={body}",
                request.id(),
                request.method(),
                request.url(),
                request.headers(),
            )),
            None => debug!(
                target: "tyreq",
                id = %request.id(),
                method = %request.method(),
                url = %request.url(),
                headers = ?request.headers(),
                body = %body,
                "sending request"
            ),
        }
        Ok(())
    }
}

/// Response interceptor that records every incoming response and always
/// reports [`Outcome::Proceed`].
pub struct LogResponseInterceptor {
    sink: Option<LogSink>,
}

impl LogResponseInterceptor {
    pub fn new() -> Self {
        Self { sink: None }
    }

    pub fn with_sink(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            sink: Some(Arc::new(sink)),
        }
    }
}

impl Default for LogResponseInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseInterceptor for LogResponseInterceptor {
    async fn intercept(&self, response: &mut HttpResponse) -> TyreqResult<Outcome> {
        let body = response
            .body()
            .map(|body| truncate_body(body))
            .unwrap_or_default();
        match &self.sink {
            Some(sink) => sink(&format!(
                "response {} status={} body={body}",
                response.request().id(),
                response.status(),
            )),
            None => debug!(
                target: "tyreq",
                id = %response.request().id(),
                status = %response.status(),
                body = %body,
                "received response"
            ),
        }
        Ok(Outcome::Proceed)
    }
}
