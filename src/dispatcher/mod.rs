//! # Dispatcher Module
//!
//! The dispatcher module provides the per-request driver for stratarouter.
//! It asks the router for the composed chain of a request and executes that
//! chain front-to-back with single-pass, forward-only control flow.
//!
//! ## Overview
//!
//! The dispatcher is the execution half of the composition engine. It:
//! - Composes the per-request chain via the shared [`Router`](crate::router::Router)
//! - Walks the chain with an index-advancing [`Next`] continuation
//! - Reports "no layer matched" as a value, never as an error
//! - Propagates handler failures without swallowing or retrying them
//!
//! ## Control Flow
//!
//! Every handler receives the request context and a [`Next`] continuation:
//!
//! - Invoking `next.run(ctx)` resumes the following chain entry and
//!   logically suspends the handler until the inner chain completes or
//!   fails.
//! - Returning without invoking `next` short-circuits the chain; later
//!   entries, including subsequent layers, do not run.
//! - `Next` is consumed by value when run, so a handler cannot invoke it
//!   twice.
//!
//! ## Cancellation
//!
//! An [`AbortSignal`] is checked before every chain entry. Once the
//! transport raises it, no further handler executes; the handler currently
//! running is not preempted. There is no timeout logic here - that belongs
//! to the surrounding server.

mod chain;
mod core;

pub use chain::{AbortSignal, Chain, ChainEntry, Next};
pub use core::{DispatchOutcome, Dispatcher};
