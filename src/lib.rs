//! `tyreq` is a typed HTTP client: each API call is declared as a descriptor
//! value, sent through chained request and response interceptors, and decoded
//! into a typed response.
//!
//! # Quick Start
//!
//! ```no_run
//! use http::Method;
//! use serde::Deserialize;
//! use tyreq::prelude::{Client, Descriptor, TypedDescriptor};
//!
//! #[derive(Debug, Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! struct GetUser {
//!     id: u64,
//! }
//!
//! impl Descriptor for GetUser {
//!     fn method(&self) -> Method {
//!         Method::GET
//!     }
//!
//!     fn endpoint(&self) -> String {
//!         format!("https://api.example.com/users/{}", self.id)
//!     }
//! }
//!
//! impl TypedDescriptor for GetUser {
//!     type Response = User;
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new()?;
//!     let user: User = client.send_typed(&GetUser { id: 1 }).await?;
//!     println!("fetched {}", user.name);
//!     Ok(())
//! }
//! ```
//!
//! # Interceptors
//!
//! - Request interceptors rewrite outgoing requests; response interceptors
//!   inspect responses and vote [`Outcome::Proceed`] or [`Outcome::Retry`].
//! - A descriptor's request interceptor runs before the client's; a
//!   descriptor's response interceptor runs after the client's.
//! - The stock response interceptor is [`ValidateStatusInterceptor`], which
//!   accepts 2xx and fails everything else with the full response attached.

mod client;
mod codec;
mod descriptor;
mod error;
mod interceptor;
mod logging;
mod request;
mod response;
mod transport;
mod util;
mod validate;

pub use crate::client::{Client, ClientBuilder};
pub use crate::codec::{BodyFormat, encode_query};
pub use crate::descriptor::{Descriptor, TypedDescriptor};
pub use crate::error::{Error, ErrorCode};
pub use crate::interceptor::{
    ChainedRequestInterceptor, ChainedResponseInterceptor, FnRequestInterceptor,
    FnResponseInterceptor, NoopRequestInterceptor, NoopResponseInterceptor, Outcome,
    RequestInterceptor, RequestInterceptorExt, ResponseInterceptor, ResponseInterceptorExt,
};
pub use crate::logging::{LogRequestInterceptor, LogResponseInterceptor};
pub use crate::request::{HttpRequest, RequestId};
pub use crate::response::HttpResponse;
pub use crate::transport::{HyperTransport, Transport, WireResponse};
pub use crate::validate::ValidateStatusInterceptor;

pub type TyreqResult<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{
        BodyFormat, Client, Descriptor, Error, ErrorCode, HttpRequest, HttpResponse, Outcome,
        RequestInterceptor, RequestInterceptorExt, ResponseInterceptor, ResponseInterceptorExt,
        TypedDescriptor, TyreqResult,
    };
}
