//! Layer - one registered routing unit.

use std::fmt;
use std::sync::Arc;

use http::Method;

use crate::handler::ArcHandler;
use crate::matcher::{MatchMode, ParamVec, PathMatcher};

/// Which HTTP methods a layer accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodFilter {
    /// Accept every method, including extension methods.
    Any,
    /// Accept only the listed methods.
    List(Vec<Method>),
}

impl MethodFilter {
    /// Whether `method` passes this filter.
    #[inline]
    #[must_use]
    pub fn accepts(&self, method: &Method) -> bool {
        match self {
            MethodFilter::Any => true,
            MethodFilter::List(methods) => methods.contains(method),
        }
    }
}

/// One registered unit: a path pattern, a method filter, and an ordered
/// stack of handlers, with the compiled matcher it owns.
///
/// Layers are immutable once constructed and identified by their position in
/// the router's layer list; registration only ever appends.
pub struct Layer<C> {
    pattern: String,
    methods: MethodFilter,
    matcher: PathMatcher,
    stack: Vec<ArcHandler<C>>,
}

impl<C> Layer<C> {
    pub(crate) fn new(
        pattern: &str,
        methods: MethodFilter,
        mode: MatchMode,
        stack: Vec<ArcHandler<C>>,
    ) -> Self {
        Self {
            pattern: pattern.to_string(),
            methods,
            matcher: PathMatcher::compile(pattern, mode),
            stack,
        }
    }

    /// The pattern string this layer was registered with.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The method filter this layer was registered with.
    #[must_use]
    pub fn methods(&self) -> &MethodFilter {
        &self.methods
    }

    /// Whether this layer matches exact paths or path prefixes.
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.matcher.mode()
    }

    /// Placeholder names of the pattern, in the order they appear in it.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        self.matcher.param_names()
    }

    /// The layer's handler stack, in registration order.
    #[must_use]
    pub fn stack(&self) -> &[ArcHandler<C>] {
        &self.stack
    }

    /// Match a request against this layer.
    ///
    /// Returns extracted parameters iff the method filter accepts `method`
    /// and the matcher accepts `path`; `None` without side effects otherwise.
    #[must_use]
    pub fn matches(&self, method: &Method, path: &str) -> Option<ParamVec> {
        if !self.methods.accepts(method) {
            return None;
        }
        self.matcher.match_path(path)
    }
}

impl<C> fmt::Debug for Layer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("pattern", &self.pattern)
            .field("methods", &self.methods)
            .field("mode", &self.mode())
            .field("handlers", &self.stack.len())
            .finish()
    }
}
