use std::ops::Range;

use async_trait::async_trait;

use crate::TyreqResult;
use crate::error::Error;
use crate::interceptor::{Outcome, ResponseInterceptor};
use crate::response::HttpResponse;

/// Response interceptor that accepts statuses inside a half-open range and
/// fails the send for everything else.
///
/// A [`Client`](crate::Client) installs `ValidateStatusInterceptor::default()`
/// (the 2xx range) as its response interceptor unless configured otherwise.
/// The error it raises carries the full response, so callers can inspect the
/// rejected status, headers, and body.
#[derive(Clone, Debug)]
pub struct ValidateStatusInterceptor {
    allowed: Range<u16>,
}

impl ValidateStatusInterceptor {
    /// Accepts exactly the statuses in `allowed`.
    pub const fn new(allowed: Range<u16>) -> Self {
        Self { allowed }
    }
}

impl Default for ValidateStatusInterceptor {
    fn default() -> Self {
        Self::new(200..300)
    }
}

#[async_trait]
impl ResponseInterceptor for ValidateStatusInterceptor {
    async fn intercept(&self, response: &mut HttpResponse) -> TyreqResult<Outcome> {
        let status = response.status().as_u16();
        if self.allowed.contains(&status) {
            Ok(Outcome::Proceed)
        } else {
            Err(Error::Status {
                status,
                response: Box::new(response.clone()),
            })
        }
    }
}
