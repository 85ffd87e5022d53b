//! # stratarouter
//!
//! **stratarouter** is a layered HTTP request router for Rust: it maps an
//! incoming request's method and path to an ordered chain of handler
//! functions, extracts named path parameters, and lets cross-cutting
//! "parameter middleware" attach to a parameter *name* so it runs whenever
//! that parameter appears in a matched route, regardless of which route or
//! verb triggered the match.
//!
//! ## Overview
//!
//! The crate is a composition engine. Route registrations (verb + pattern +
//! handlers), generic middleware registrations (`use_`), and
//! parameter-middleware registrations may be performed in any interleaved
//! order; per request they are assembled into a single deterministic,
//! order-correct dispatch chain. Parameter middleware runs exactly once per
//! request, ahead of the first matched layer that declares the parameter,
//! no matter how the registrations were ordered.
//!
//! The underlying HTTP server, request/response construction, and body
//! parsing are not provided here - the per-request context is an opaque
//! type `C` supplied by the surrounding framework and passed through
//! untouched.
//!
//! ## Architecture
//!
//! The library is organized into a few focused modules:
//!
//! - **[`matcher`]** - Path pattern compilation (`:name` placeholders) into
//!   regex-based matchers with ordered parameter extraction
//! - **[`router`]** - Layer registration, the parameter-middleware
//!   registry, and per-request chain composition
//! - **[`dispatcher`]** - The per-request driver: chain execution with a
//!   forward-only `next` continuation, abort observation, and not-found
//!   reporting
//!
//! ### Request Composition Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Framework
//!     participant Dispatcher
//!     participant Router
//!     participant Registry as ParamRegistry
//!     participant Chain
//!
//!     Framework->>Dispatcher: dispatch(GET, /pets/42, ctx)
//!     Dispatcher->>Router: compose(GET, /pets/42)
//!     Router->>Router: walk layers in registration order
//!
//!     loop each matched layer
//!         Router->>Registry: handlers_for(param name)
//!         Registry-->>Router: ordered middleware (if not yet injected)
//!         Router->>Router: append middleware, then layer stack
//!     end
//!
//!     alt no layer matched
//!         Router-->>Dispatcher: None
//!         Dispatcher-->>Framework: DispatchOutcome::NotFound
//!     end
//!
//!     Router-->>Dispatcher: (RequestMatch, Chain)
//!     Dispatcher->>Chain: execute(ctx)
//!
//!     loop each entry, front to back
//!         Chain->>Chain: handler(ctx, next)
//!         Note over Chain: no next() call → short-circuit<br/>Err(_) → abort remaining entries
//!     end
//!
//!     Chain-->>Dispatcher: Ok(())
//!     Dispatcher-->>Framework: DispatchOutcome::Handled
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use http::Method;
//! use stratarouter::{DispatchOutcome, Dispatcher, Next, Router};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut router = Router::new();
//! router
//!     .param("id", |value: &str, ctx: &mut Vec<String>, next: Next<Vec<String>>| {
//!         ctx.push(format!("id = {value}"));
//!         next.run(ctx)
//!     })
//!     .get("/pets/:id", |ctx: &mut Vec<String>, next: Next<Vec<String>>| {
//!         ctx.push("get_pet".to_string());
//!         next.run(ctx)
//!     });
//!
//! let dispatcher = Dispatcher::new(Arc::new(router));
//! let mut ctx = Vec::new();
//! let outcome = dispatcher.dispatch(&Method::GET, "/pets/42", &mut ctx)?;
//!
//! assert_eq!(outcome, DispatchOutcome::Handled);
//! assert_eq!(ctx, ["id = 42", "get_pet"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Behavioral Rules
//!
//! 1. **Registration order is chain order**: matched layers contribute
//!    their handler stacks in the order the layers were registered.
//! 2. **Dedup by name, per request**: a parameter's middleware is injected
//!    once per request, ahead of the first matched layer declaring it -
//!    even when several matched layers share the name.
//! 3. **Live registry**: parameter middleware registered *after* a route is
//!    visible to that route's later dispatches; the registry binds to
//!    names, not to registration-time snapshots.
//! 4. **Short-circuit is forward-only**: a handler that does not invoke
//!    `next` ends the chain; one that does resumes exactly the next entry.
//! 5. **Not-found is a value**: no matched layer yields
//!    [`DispatchOutcome::NotFound`], never an error and never a default
//!    response body.
//!
//! ## Concurrency
//!
//! Registration must complete before concurrent traffic begins. During
//! dispatch the router is read-only and shared behind an `Arc`; each
//! request's chain executes single-threaded and cooperatively. Handlers are
//! `Send + Sync`, so concurrent requests may dispatch from any thread, each
//! with its own context. Cancellation is cooperative: an [`AbortSignal`] is
//! checked before every chain entry.

pub mod dispatcher;
mod handler;
pub mod matcher;
pub mod router;

pub use dispatcher::{AbortSignal, Chain, ChainEntry, DispatchOutcome, Dispatcher, Next};
pub use handler::{ArcHandler, ArcParamHandler, Handler, ParamHandler};
pub use matcher::{MatchMode, ParamVec, PathMatcher, MAX_INLINE_PARAMS};
pub use router::{Layer, MethodFilter, ParamRegistry, RequestMatch, Router};
