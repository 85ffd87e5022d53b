//! Dispatcher core - the per-request driver.

use std::sync::Arc;
use std::time::Instant;

use http::Method;
use tracing::{debug, info};

use super::chain::AbortSignal;
use crate::router::Router;

/// How a dispatch attempt concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A chain was composed and ran to its conclusion. A handler that
    /// short-circuited by not invoking `next` still counts as handled.
    Handled,
    /// No layer matched the request. The surrounding framework decides the
    /// resulting response; the router produces no default body.
    NotFound,
}

/// Per-request driver over a shared [`Router`].
///
/// Holds the router behind an `Arc` so concurrent requests dispatch against
/// the same read-only registration state. Each request's chain executes
/// single-threaded and cooperatively: a handler suspends by invoking `next`
/// and resumes when the inner chain completes or fails.
pub struct Dispatcher<C> {
    router: Arc<Router<C>>,
}

impl<C> Dispatcher<C> {
    /// Create a dispatcher over a finished router.
    #[must_use]
    pub fn new(router: Arc<Router<C>>) -> Self {
        Self { router }
    }

    /// The router this dispatcher drives.
    #[must_use]
    pub fn router(&self) -> &Router<C> {
        &self.router
    }

    /// Compose and execute the chain for a request.
    ///
    /// Returns [`DispatchOutcome::NotFound`] as a value when no layer
    /// matches, never as an error. Handler failures propagate unchanged
    /// after aborting the remaining chain for this request only.
    pub fn dispatch(
        &self,
        method: &Method,
        path: &str,
        ctx: &mut C,
    ) -> anyhow::Result<DispatchOutcome> {
        self.dispatch_with_signal(method, path, ctx, &AbortSignal::new())
    }

    /// Like [`dispatch`](Self::dispatch), observing a transport-supplied
    /// abort signal between chain entries.
    pub fn dispatch_with_signal(
        &self,
        method: &Method,
        path: &str,
        ctx: &mut C,
        signal: &AbortSignal,
    ) -> anyhow::Result<DispatchOutcome> {
        debug!(method = %method, path = %path, "Dispatch attempt");

        let dispatch_start = Instant::now();
        let Some((request, chain)) = self.router.compose(method, path) else {
            return Ok(DispatchOutcome::NotFound);
        };

        chain.execute_with_signal(ctx, signal)?;

        info!(
            method = %method,
            path = %path,
            chain_len = chain.len(),
            params = ?request.params,
            aborted = signal.is_aborted(),
            duration_us = dispatch_start.elapsed().as_micros(),
            "Request dispatched"
        );

        Ok(DispatchOutcome::Handled)
    }
}
