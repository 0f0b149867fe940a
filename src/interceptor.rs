use std::sync::Arc;

use async_trait::async_trait;

use crate::TyreqResult;
use crate::request::HttpRequest;
use crate::response::HttpResponse;

/// Verdict a response interceptor hands back to the dispatch engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Hand the response to the caller.
    #[default]
    Proceed,
    /// Rebuild the request from its descriptor and send it again.
    Retry,
}

impl Outcome {
    /// Merges the verdicts of two chained interceptors. `Retry` absorbs,
    /// `Proceed` is the identity, which makes the merge associative and
    /// commutative regardless of how a chain is nested.
    pub const fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Proceed, Self::Proceed) => Self::Proceed,
            (Self::Proceed, Self::Retry) => Self::Retry,
            (Self::Retry, Self::Proceed) => Self::Retry,
            (Self::Retry, Self::Retry) => Self::Retry,
        }
    }
}

/// Observes or rewrites an outgoing request before it reaches the transport.
///
/// Interceptors run strictly one after another; a failure aborts the whole
/// send with that error. Any field of the request except its id may be
/// rewritten.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    async fn intercept(&self, request: &mut HttpRequest) -> TyreqResult<()>;
}

/// Observes or rewrites an incoming response and reports an [`Outcome`].
///
/// Runs after the transport delivered a well-formed response. A failure
/// aborts the send; a successful run must report exactly one outcome.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn intercept(&self, response: &mut HttpResponse) -> TyreqResult<Outcome>;
}

/// Two request interceptors run back to back as one.
///
/// `first` finishes before `second` starts; the first failure short-circuits
/// the rest of the chain. Chains nest, so any number of interceptors reduce
/// to one.
pub struct ChainedRequestInterceptor {
    first: Arc<dyn RequestInterceptor>,
    second: Arc<dyn RequestInterceptor>,
}

impl ChainedRequestInterceptor {
    pub fn new(first: Arc<dyn RequestInterceptor>, second: Arc<dyn RequestInterceptor>) -> Self {
        Self { first, second }
    }

    /// Folds `interceptors` into a single pipeline preserving construction
    /// order: the first element acts first. An empty list yields the no-op
    /// interceptor.
    pub fn in_order<I>(interceptors: I) -> Arc<dyn RequestInterceptor>
    where
        I: IntoIterator<Item = Arc<dyn RequestInterceptor>>,
    {
        let mut interceptors = interceptors.into_iter();
        let Some(first) = interceptors.next() else {
            return Arc::new(NoopRequestInterceptor);
        };
        interceptors.fold(first, |chain, next| {
            Arc::new(Self::new(chain, next)) as Arc<dyn RequestInterceptor>
        })
    }
}

#[async_trait]
impl RequestInterceptor for ChainedRequestInterceptor {
    async fn intercept(&self, request: &mut HttpRequest) -> TyreqResult<()> {
        self.first.intercept(request).await?;
        self.second.intercept(request).await
    }
}

/// Two response interceptors run back to back as one.
///
/// `first` finishes before `second` starts. When both succeed their verdicts
/// merge via [`Outcome::combine`]; when `second` fails after `first` already
/// rewrote the response, the error propagates and `first`'s effects stay in
/// place. There is no rollback.
pub struct ChainedResponseInterceptor {
    first: Arc<dyn ResponseInterceptor>,
    second: Arc<dyn ResponseInterceptor>,
}

impl ChainedResponseInterceptor {
    pub fn new(first: Arc<dyn ResponseInterceptor>, second: Arc<dyn ResponseInterceptor>) -> Self {
        Self { first, second }
    }

    /// Folds `interceptors` into a single pipeline preserving construction
    /// order. An empty list yields the no-op interceptor, which reports
    /// [`Outcome::Proceed`].
    pub fn in_order<I>(interceptors: I) -> Arc<dyn ResponseInterceptor>
    where
        I: IntoIterator<Item = Arc<dyn ResponseInterceptor>>,
    {
        let mut interceptors = interceptors.into_iter();
        let Some(first) = interceptors.next() else {
            return Arc::new(NoopResponseInterceptor);
        };
        interceptors.fold(first, |chain, next| {
            Arc::new(Self::new(chain, next)) as Arc<dyn ResponseInterceptor>
        })
    }
}

#[async_trait]
impl ResponseInterceptor for ChainedResponseInterceptor {
    async fn intercept(&self, response: &mut HttpResponse) -> TyreqResult<Outcome> {
        let first = self.first.intercept(response).await?;
        let second = self.second.intercept(response).await?;
        Ok(first.combine(second))
    }
}

/// Chaining shorthand on boxed request interceptors.
pub trait RequestInterceptorExt {
    /// Chain where `self` acts first, then `next`.
    fn chain_before(self, next: Arc<dyn RequestInterceptor>) -> Arc<dyn RequestInterceptor>;
    /// Chain where `prior` acts first, then `self`.
    fn chain_after(self, prior: Arc<dyn RequestInterceptor>) -> Arc<dyn RequestInterceptor>;
}

impl RequestInterceptorExt for Arc<dyn RequestInterceptor> {
    fn chain_before(self, next: Arc<dyn RequestInterceptor>) -> Arc<dyn RequestInterceptor> {
        Arc::new(ChainedRequestInterceptor::new(self, next))
    }

    fn chain_after(self, prior: Arc<dyn RequestInterceptor>) -> Arc<dyn RequestInterceptor> {
        Arc::new(ChainedRequestInterceptor::new(prior, self))
    }
}

/// Chaining shorthand on boxed response interceptors.
pub trait ResponseInterceptorExt {
    /// Chain where `self` acts first, then `next`.
    fn chain_before(self, next: Arc<dyn ResponseInterceptor>) -> Arc<dyn ResponseInterceptor>;
    /// Chain where `prior` acts first, then `self`.
    fn chain_after(self, prior: Arc<dyn ResponseInterceptor>) -> Arc<dyn ResponseInterceptor>;
}

impl ResponseInterceptorExt for Arc<dyn ResponseInterceptor> {
    fn chain_before(self, next: Arc<dyn ResponseInterceptor>) -> Arc<dyn ResponseInterceptor> {
        Arc::new(ChainedResponseInterceptor::new(self, next))
    }

    fn chain_after(self, prior: Arc<dyn ResponseInterceptor>) -> Arc<dyn ResponseInterceptor> {
        Arc::new(ChainedResponseInterceptor::new(prior, self))
    }
}

/// Wraps a synchronous closure as a request interceptor.
///
/// Cross-cutting concerns that suspend (token refresh, external lookups)
/// implement [`RequestInterceptor`] directly instead.
pub struct FnRequestInterceptor<F> {
    f: F,
}

impl<F> FnRequestInterceptor<F>
where
    F: Fn(&mut HttpRequest) -> TyreqResult<()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> RequestInterceptor for FnRequestInterceptor<F>
where
    F: Fn(&mut HttpRequest) -> TyreqResult<()> + Send + Sync,
{
    async fn intercept(&self, request: &mut HttpRequest) -> TyreqResult<()> {
        (self.f)(request)
    }
}

/// Wraps a synchronous closure as a response interceptor.
pub struct FnResponseInterceptor<F> {
    f: F,
}

impl<F> FnResponseInterceptor<F>
where
    F: Fn(&mut HttpResponse) -> TyreqResult<Outcome> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> ResponseInterceptor for FnResponseInterceptor<F>
where
    F: Fn(&mut HttpResponse) -> TyreqResult<Outcome> + Send + Sync,
{
    async fn intercept(&self, response: &mut HttpResponse) -> TyreqResult<Outcome> {
        (self.f)(response)
    }
}

/// Neutral element of request chains: touches nothing, always succeeds.
pub struct NoopRequestInterceptor;

#[async_trait]
impl RequestInterceptor for NoopRequestInterceptor {
    async fn intercept(&self, _request: &mut HttpRequest) -> TyreqResult<()> {
        Ok(())
    }
}

/// Neutral element of response chains: touches nothing, reports
/// [`Outcome::Proceed`].
pub struct NoopResponseInterceptor;

#[async_trait]
impl ResponseInterceptor for NoopResponseInterceptor {
    async fn intercept(&self, _response: &mut HttpResponse) -> TyreqResult<Outcome> {
        Ok(Outcome::Proceed)
    }
}
