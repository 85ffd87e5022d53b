//! Chain execution - the per-request handler sequence and its continuation.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::handler::{ArcHandler, ArcParamHandler};

/// Transport-supplied cancellation flag observed between chain entries.
///
/// Cloning yields another handle to the same flag, so the transport keeps one
/// handle and aborts it while the chain holds the other. Once aborted, no
/// further chain entry executes; the entry currently running is not
/// preempted.
#[derive(Clone, Debug, Default)]
pub struct AbortSignal {
    aborted: Arc<AtomicBool>,
}

impl AbortSignal {
    /// Create a signal in the not-aborted state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the request aborted.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    /// Whether the request has been aborted.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }
}

/// One slot of a composed chain.
pub enum ChainEntry<C> {
    /// A handler from a layer's stack.
    Route { handler: ArcHandler<C> },
    /// Parameter middleware spliced in ahead of the first layer declaring
    /// `name`, carrying the value that layer's matcher extracted.
    Param {
        name: Arc<str>,
        value: String,
        handler: ArcParamHandler<C>,
    },
}

impl<C> fmt::Debug for ChainEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainEntry::Route { .. } => f.debug_struct("Route").finish(),
            ChainEntry::Param { name, value, .. } => f
                .debug_struct("Param")
                .field("name", name)
                .field("value", value)
                .finish(),
        }
    }
}

/// The flattened, per-request ordered sequence of handlers actually
/// executed.
///
/// Built once per request by [`Router::compose`](crate::router::Router::compose)
/// and discarded after the response is produced. Execution walks the entries
/// front-to-back: each handler receives a [`Next`] continuation, and a
/// handler that returns without invoking it short-circuits the remainder.
pub struct Chain<C> {
    entries: Arc<[ChainEntry<C>]>,
}

impl<C> Chain<C> {
    pub(crate) fn new(entries: Vec<ChainEntry<C>>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Number of entries in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the chain has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Execute the chain front-to-back.
    ///
    /// A handler failure aborts the remaining entries and propagates.
    pub fn execute(&self, ctx: &mut C) -> anyhow::Result<()> {
        self.execute_with_signal(ctx, &AbortSignal::new())
    }

    /// Execute the chain, checking `signal` before every entry.
    pub fn execute_with_signal(&self, ctx: &mut C, signal: &AbortSignal) -> anyhow::Result<()> {
        Next {
            entries: Arc::clone(&self.entries),
            index: 0,
            signal: signal.clone(),
        }
        .run(ctx)
    }
}

impl<C> fmt::Debug for Chain<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

/// Continuation handed to every handler in a chain.
///
/// Invoking [`Next::run`] resumes the entry after the current one; the chain
/// advances by index, single-pass and forward-only. `run` consumes the
/// continuation, so a handler cannot invoke it twice.
pub struct Next<C> {
    entries: Arc<[ChainEntry<C>]>,
    index: usize,
    signal: AbortSignal,
}

impl<C> Next<C> {
    /// Run the rest of the chain.
    ///
    /// Returns `Ok(())` when the chain end is reached or the abort signal
    /// has been raised; handler failures propagate unchanged.
    pub fn run(self, ctx: &mut C) -> anyhow::Result<()> {
        if self.signal.is_aborted() {
            return Ok(());
        }
        let Some(entry) = self.entries.get(self.index) else {
            return Ok(());
        };
        let next = Next {
            entries: Arc::clone(&self.entries),
            index: self.index + 1,
            signal: self.signal.clone(),
        };
        match entry {
            ChainEntry::Route { handler } => handler.call(ctx, next),
            ChainEntry::Param { value, handler, .. } => handler.call(value, ctx, next),
        }
    }
}
