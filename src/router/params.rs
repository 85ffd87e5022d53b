//! Parameter-middleware registry.

use std::collections::HashMap;

use tracing::debug;

use crate::handler::ArcParamHandler;

/// Ordered parameter middleware keyed by parameter name.
///
/// The registry is append-only and queried live at dispatch time: middleware
/// registered after a route is still visible to that route's later
/// dispatches. Parameter middleware binds to a parameter name, not to a
/// route's registration-time snapshot.
pub struct ParamRegistry<C> {
    handlers: HashMap<String, Vec<ArcParamHandler<C>>>,
}

impl<C> ParamRegistry<C> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Append `handler` to the sequence for `name`.
    ///
    /// Does not validate that any route uses `name`; middleware registered
    /// for a name no pattern declares is simply never invoked.
    pub fn register(&mut self, name: &str, handler: ArcParamHandler<C>) {
        let sequence = self.handlers.entry(name.to_string()).or_default();
        sequence.push(handler);
        debug!(
            param = %name,
            position = sequence.len(),
            "Parameter middleware registered"
        );
    }

    /// Registered middleware for `name`, in registration order.
    ///
    /// Empty if none has been registered for the name.
    #[must_use]
    pub fn handlers_for(&self, name: &str) -> &[ArcParamHandler<C>] {
        self.handlers.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of parameter names with at least one registration.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no parameter middleware has been registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C> Default for ParamRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
