//! Router core module - registration and the per-request composition hot path.

// Deny heap-allocation churn in the hot path
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use http::Method;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::layer::{Layer, MethodFilter};
use super::params::ParamRegistry;
use crate::dispatcher::{Chain, ChainEntry};
use crate::handler::{ArcHandler, Handler, ParamHandler};
use crate::matcher::{MatchMode, ParamVec, MAX_INLINE_PARAMS};

/// Result of composing a request against the router's layers.
///
/// Ephemeral, one per incoming request; discarded after the response is
/// produced.
#[derive(Debug, Clone)]
pub struct RequestMatch {
    /// HTTP method the chain was composed for.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Path parameters merged across all matched layers, in layer order.
    pub params: ParamVec,
}

impl RequestMatch {
    /// Get a path parameter by name.
    ///
    /// Uses "last write wins" semantics: if duplicate parameter names exist
    /// at different path depths (e.g., `/org/:id/user/:id`), returns the
    /// last occurrence (the user id, not the org id).
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert params to a HashMap for compatibility with map-shaped code.
    /// Note: This allocates - use param() in hot paths instead.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Router that assembles route, middleware, and parameter-middleware
/// registrations into one deterministic dispatch chain per request.
///
/// Owns the ordered layer list and the parameter registry. Both are
/// monotonically append-only: registration never removes or reorders
/// existing entries. Registration must complete before concurrent dispatch
/// begins; during traffic the router is shared read-only behind an `Arc`.
pub struct Router<C> {
    layers: Vec<Layer<C>>,
    params: ParamRegistry<C>,
}

impl<C> Router<C> {
    /// Create a router with no layers and no parameter middleware.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            params: ParamRegistry::new(),
        }
    }

    /// The registered layers, in registration order.
    #[must_use]
    pub fn layers(&self) -> &[Layer<C>] {
        &self.layers
    }

    /// The parameter-middleware registry.
    #[must_use]
    pub fn params(&self) -> &ParamRegistry<C> {
        &self.params
    }

    /// Append a layer.
    ///
    /// The low-level registration entry point behind [`use_`](Self::use_),
    /// the verb helpers, and [`all`](Self::all); exposed directly for
    /// multi-handler stacks.
    pub fn register(
        &mut self,
        pattern: &str,
        methods: MethodFilter,
        mode: MatchMode,
        stack: Vec<ArcHandler<C>>,
    ) -> &mut Self {
        let layer = Layer::new(pattern, methods, mode, stack);
        debug!(
            index = self.layers.len(),
            pattern = %pattern,
            methods = ?layer.methods(),
            mode = ?mode,
            handlers = layer.stack().len(),
            "Layer registered"
        );
        self.layers.push(layer);
        self
    }

    /// Register a prefix-match layer accepting any method.
    ///
    /// The pattern matches itself and descendant paths (`/foo` also matches
    /// `/foo/bar`); the root pattern `/` matches every path.
    pub fn use_<H>(&mut self, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler<C> + 'static,
    {
        self.register(
            pattern,
            MethodFilter::Any,
            MatchMode::Prefix,
            vec![Arc::new(handler)],
        )
    }

    /// Register an exact-match layer accepting any method.
    pub fn all<H>(&mut self, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler<C> + 'static,
    {
        self.register(
            pattern,
            MethodFilter::Any,
            MatchMode::Exact,
            vec![Arc::new(handler)],
        )
    }

    /// Register an exact-match layer for `GET`.
    pub fn get<H>(&mut self, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler<C> + 'static,
    {
        self.verb(Method::GET, pattern, handler)
    }

    /// Register an exact-match layer for `POST`.
    pub fn post<H>(&mut self, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler<C> + 'static,
    {
        self.verb(Method::POST, pattern, handler)
    }

    /// Register an exact-match layer for `PUT`.
    pub fn put<H>(&mut self, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler<C> + 'static,
    {
        self.verb(Method::PUT, pattern, handler)
    }

    /// Register an exact-match layer for `DELETE`.
    pub fn delete<H>(&mut self, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler<C> + 'static,
    {
        self.verb(Method::DELETE, pattern, handler)
    }

    /// Register an exact-match layer for `PATCH`.
    pub fn patch<H>(&mut self, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler<C> + 'static,
    {
        self.verb(Method::PATCH, pattern, handler)
    }

    /// Register an exact-match layer for `HEAD`.
    pub fn head<H>(&mut self, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler<C> + 'static,
    {
        self.verb(Method::HEAD, pattern, handler)
    }

    /// Register an exact-match layer for `OPTIONS`.
    pub fn options<H>(&mut self, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler<C> + 'static,
    {
        self.verb(Method::OPTIONS, pattern, handler)
    }

    /// Register an exact-match layer for `TRACE`.
    pub fn trace<H>(&mut self, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler<C> + 'static,
    {
        self.verb(Method::TRACE, pattern, handler)
    }

    /// Register parameter middleware for `name`.
    ///
    /// Order relative to route registrations does not affect which
    /// middleware exist for `name` at dispatch time - the registry is
    /// queried live - but it does fix the relative order among handlers for
    /// the same name. Registering a name no pattern declares is not an
    /// error; the middleware is simply never invoked.
    pub fn param<H>(&mut self, name: &str, handler: H) -> &mut Self
    where
        H: ParamHandler<C> + 'static,
    {
        self.params.register(name, Arc::new(handler));
        self
    }

    fn verb<H>(&mut self, method: Method, pattern: &str, handler: H) -> &mut Self
    where
        H: Handler<C> + 'static,
    {
        self.register(
            pattern,
            MethodFilter::List(vec![method]),
            MatchMode::Exact,
            vec![Arc::new(handler)],
        )
    }

    /// Print all registered layers to stdout.
    ///
    /// Useful for debugging and verifying that registrations landed
    /// correctly.
    pub fn dump_layers(&self) {
        println!("[layers] count={}", self.layers.len());
        for (index, layer) in self.layers.iter().enumerate() {
            println!(
                "[layer] #{index} {:?} {} ({:?}, {} handlers)",
                layer.methods(),
                layer.pattern(),
                layer.mode(),
                layer.stack().len()
            );
        }
    }

    /// Walk layers in registration order and collect those matching the
    /// request, each with the parameters its matcher extracted.
    ///
    /// A request may match multiple layers (e.g., a `use_` prefix layer and
    /// a verb layer).
    #[must_use]
    pub fn matching_layers(&self, method: &Method, path: &str) -> Vec<(&Layer<C>, ParamVec)> {
        self.layers
            .iter()
            .filter_map(|layer| layer.matches(method, path).map(|params| (layer, params)))
            .collect()
    }

    /// Compose the dispatch chain for a request.
    ///
    /// Walks matched layers in registration order, splicing the parameter
    /// middleware for each pattern parameter ahead of the first matched
    /// layer that declares it. Deduplication is by name across the whole
    /// matched set: a given parameter's middleware appears in the chain at
    /// most once per request, no matter how many matched layers share the
    /// name. Each name's handlers keep their own registration order, and
    /// names on one pattern inject in pattern order.
    ///
    /// Returns `None` when no layer matches; the caller decides what "not
    /// found" means, the router produces no default body.
    #[must_use]
    pub fn compose(&self, method: &Method, path: &str) -> Option<(RequestMatch, Chain<C>)> {
        debug!(method = %method, path = %path, "Chain composition attempt");

        let compose_start = Instant::now();
        let matched = self.matching_layers(method, path);
        if matched.is_empty() {
            warn!(
                method = %method,
                path = %path,
                duration_us = compose_start.elapsed().as_micros(),
                "No layer matched"
            );
            return None;
        }

        let mut entries: Vec<ChainEntry<C>> = Vec::new();
        let mut merged = ParamVec::new();
        let mut injected: SmallVec<[Arc<str>; MAX_INLINE_PARAMS]> = SmallVec::new();

        for (layer, params) in &matched {
            for name in layer.param_names() {
                if injected.iter().any(|seen| seen == name) {
                    continue;
                }
                injected.push(Arc::clone(name));
                // The value carried is the one extracted by the first
                // matched layer declaring the name.
                let value = params
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.as_str())
                    .unwrap_or_default();
                for handler in self.params.handlers_for(name) {
                    entries.push(ChainEntry::Param {
                        name: Arc::clone(name),
                        value: value.to_string(),
                        handler: Arc::clone(handler),
                    });
                }
            }
            for handler in layer.stack() {
                entries.push(ChainEntry::Route {
                    handler: Arc::clone(handler),
                });
            }
            merged.extend(params.iter().cloned());
        }

        let compose_duration = compose_start.elapsed();
        if compose_duration > Duration::from_millis(1) {
            warn!(
                method = %method,
                path = %path,
                layers_matched = matched.len(),
                chain_len = entries.len(),
                duration_us = compose_duration.as_micros(),
                "Slow chain composition detected"
            );
        } else {
            info!(
                method = %method,
                path = %path,
                layers_matched = matched.len(),
                chain_len = entries.len(),
                params = ?merged,
                duration_us = compose_duration.as_micros(),
                "Chain composed"
            );
        }

        let request = RequestMatch {
            method: method.clone(),
            path: path.to_string(),
            params: merged,
        };
        Some((request, Chain::new(entries)))
    }
}

impl<C> Default for Router<C> {
    fn default() -> Self {
        Self::new()
    }
}
