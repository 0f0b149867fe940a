use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Method};

use crate::TyreqResult;
use crate::codec::BodyFormat;
use crate::interceptor::{RequestInterceptor, ResponseInterceptor};

/// A declarative description of one HTTP call.
///
/// Implementations state what to send; the [`Client`](crate::Client) turns a
/// descriptor into a fresh request on every attempt, so a retried call never
/// reuses a stale request.
///
/// Only [`method`](Self::method) and [`endpoint`](Self::endpoint) are
/// mandatory. Everything else defaults to "nothing": no extra headers, no
/// query, no body, no per-call interceptors, client-level formats.
///
/// ```
/// use bytes::Bytes;
/// use http::Method;
/// use serde::{Deserialize, Serialize};
/// use tyreq::{BodyFormat, Descriptor, TypedDescriptor, TyreqResult};
///
/// #[derive(Serialize)]
/// struct CreateUser {
///     name: String,
/// }
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// struct CreateUserCall {
///     body: CreateUser,
/// }
///
/// impl Descriptor for CreateUserCall {
///     fn method(&self) -> Method {
///         Method::POST
///     }
///
///     fn endpoint(&self) -> String {
///         "https://api.example.com/users".to_owned()
///     }
///
///     fn encode_body(&self, format: BodyFormat) -> TyreqResult<Option<Bytes>> {
///         format.encode(&self.body).map(Some)
///     }
/// }
///
/// impl TypedDescriptor for CreateUserCall {
///     type Response = User;
/// }
/// ```
pub trait Descriptor: Send + Sync {
    /// HTTP method of the call.
    fn method(&self) -> Method;

    /// Absolute `http` or `https` endpoint, before any query is appended.
    fn endpoint(&self) -> String;

    /// Headers specific to this call. Merged over the client's default
    /// headers; on a name collision the descriptor wins.
    fn headers(&self) -> HeaderMap {
        HeaderMap::new()
    }

    /// Url-encoded query string to append to the endpoint, typically built
    /// with [`encode_query`](crate::encode_query). `None` leaves the endpoint
    /// untouched.
    fn query(&self) -> TyreqResult<Option<String>> {
        Ok(None)
    }

    /// Serialized request body. `format` is the resolved body format for this
    /// call; typed implementations usually delegate to it:
    /// `format.encode(&self.payload).map(Some)`.
    fn encode_body(&self, format: BodyFormat) -> TyreqResult<Option<Bytes>> {
        let _ = format;
        Ok(None)
    }

    /// Overrides the client's default request body format for this call.
    fn body_format(&self) -> Option<BodyFormat> {
        None
    }

    /// Interceptor to run before the client's request interceptor.
    fn request_interceptor(&self) -> Option<Arc<dyn RequestInterceptor>> {
        None
    }

    /// Interceptor to run after the client's response interceptor.
    fn response_interceptor(&self) -> Option<Arc<dyn ResponseInterceptor>> {
        None
    }
}

/// A [`Descriptor`] whose response body decodes into a known type.
///
/// Send these through [`Client::send_typed`](crate::Client::send_typed) to
/// get the decoded value back; [`Client::send`](crate::Client::send) still
/// works when the body does not matter.
pub trait TypedDescriptor: Descriptor {
    /// The decoded response body type.
    type Response: serde::de::DeserializeOwned;

    /// Overrides the client's default response body format for this call.
    fn response_format(&self) -> Option<BodyFormat> {
        None
    }
}
