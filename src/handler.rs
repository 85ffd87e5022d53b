//! Handler capability traits.
//!
//! The router never inspects the per-request context `C` - it is supplied by
//! the surrounding framework and passed through untouched. Route handlers and
//! parameter middleware are two distinct capabilities with two distinct
//! signatures rather than one loosely-typed callable:
//!
//! - [`Handler`] - a route/middleware handler: `(ctx, next)`
//! - [`ParamHandler`] - parameter middleware: `(value, ctx, next)`
//!
//! Both receive a [`Next`] continuation. Invoking it resumes the following
//! chain entry; returning without invoking it short-circuits the remainder of
//! the chain. `Next` is consumed by value, so a handler cannot invoke it
//! twice.
//!
//! Closures satisfying the matching `Fn` signature implement these traits
//! automatically via blanket impls; the registration methods on
//! [`Router`](crate::router::Router) accept them directly.

use std::sync::Arc;

use crate::dispatcher::Next;

/// A route or middleware handler in a layer's stack.
pub trait Handler<C>: Send + Sync {
    /// Run the handler. Invoke `next` to delegate to the rest of the chain.
    fn call(&self, ctx: &mut C, next: Next<C>) -> anyhow::Result<()>;
}

impl<C, F> Handler<C> for F
where
    F: Fn(&mut C, Next<C>) -> anyhow::Result<()> + Send + Sync,
{
    fn call(&self, ctx: &mut C, next: Next<C>) -> anyhow::Result<()> {
        self(ctx, next)
    }
}

/// Parameter middleware, bound to a parameter name rather than a route.
///
/// Receives the parameter value extracted from the request path by the first
/// matched layer declaring the name.
pub trait ParamHandler<C>: Send + Sync {
    /// Run the middleware for one extracted parameter value.
    fn call(&self, value: &str, ctx: &mut C, next: Next<C>) -> anyhow::Result<()>;
}

impl<C, F> ParamHandler<C> for F
where
    F: Fn(&str, &mut C, Next<C>) -> anyhow::Result<()> + Send + Sync,
{
    fn call(&self, value: &str, ctx: &mut C, next: Next<C>) -> anyhow::Result<()> {
        self(value, ctx, next)
    }
}

/// Shared route handler, as stored in a layer's stack.
pub type ArcHandler<C> = Arc<dyn Handler<C>>;

/// Shared parameter middleware, as stored in the registry.
pub type ArcParamHandler<C> = Arc<dyn ParamHandler<C>>;
