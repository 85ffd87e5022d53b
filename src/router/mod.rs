//! # Router Module
//!
//! The router module provides registration and chain composition for
//! stratarouter. Route registrations (verb + pattern + handlers), generic
//! middleware registrations (`use_`), and parameter-middleware
//! registrations, performed in arbitrary interleaved order, are assembled
//! into one deterministic, order-correct dispatch chain per request.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Appending [`Layer`]s in registration order, each owning a compiled
//!   matcher and an ordered handler stack
//! - Keeping the [`ParamRegistry`] of parameter middleware keyed by
//!   parameter name
//! - Composing, per request, the flattened handler chain by splicing
//!   parameter middleware ahead of each matching layer's handlers
//!
//! ## Composition
//!
//! For a request, matched layers are walked in registration order. Before a
//! layer's own stack, the middleware for each of its pattern parameters is
//! injected - unless that name was already injected earlier in this
//! request. Deduplication is by name across the whole matched set, so a
//! parameter's middleware runs at most once per request no matter how many
//! matched layers declare the name, positioned ahead of the first layer
//! that does.
//!
//! ## Registration Order Invariants
//!
//! - The layer list and the registry are append-only; nothing is removed or
//!   reordered.
//! - The registry is queried live at composition time: `param` calls made
//!   after a route registration still apply to that route's later
//!   dispatches.
//! - Among handlers for the same parameter name, registration order is
//!   execution order.

mod core;
mod layer;
mod params;

pub use core::{RequestMatch, Router};
pub use layer::{Layer, MethodFilter};
pub use params::ParamRegistry;
