//! Matcher core - pattern compilation and the per-request match hot path.

use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., `/users/:id/posts/:post_id`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names use `Arc<str>` instead of `String` because names come from
/// the compiled pattern (known at registration time) and `Arc::clone()` is an
/// O(1) atomic increment. Values remain `String` as they're per-request data
/// from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// How a compiled pattern relates to the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The pattern must match the entire path.
    Exact,
    /// The pattern must match a leading run of whole segments; descendant
    /// paths also match.
    Prefix,
}

/// A compiled path pattern.
///
/// Compilation happens once at registration time; matching is a single regex
/// pass over the request path. The placeholder syntax (`:name` segments) is
/// owned entirely by this type - nothing downstream of it depends on the
/// syntax, only on [`PathMatcher::match_path`].
#[derive(Debug, Clone)]
pub struct PathMatcher {
    pattern: String,
    mode: MatchMode,
    regex: Regex,
    param_names: Vec<Arc<str>>,
}

impl PathMatcher {
    /// Compile a path pattern in the given mode.
    ///
    /// Literal segments are regex-escaped, so compilation cannot fail for any
    /// input string.
    ///
    /// # Example
    ///
    /// ```
    /// use stratarouter::matcher::{MatchMode, PathMatcher};
    ///
    /// let m = PathMatcher::compile("/users/:id", MatchMode::Exact);
    /// let params = m.match_path("/users/123").unwrap();
    /// assert_eq!(params[0].1, "123");
    /// assert!(m.match_path("/users/123/posts").is_none());
    /// ```
    #[must_use]
    pub fn compile(pattern: &str, mode: MatchMode) -> Self {
        let (regex, param_names) = Self::pattern_to_regex(pattern, mode);
        Self {
            pattern: pattern.to_string(),
            mode,
            regex,
            param_names,
        }
    }

    /// The original pattern string this matcher was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The mode this matcher was compiled in.
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Placeholder names in the order they appear in the pattern.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    /// Match a request path, returning extracted parameters on success.
    ///
    /// Returns `None` without side effects when the path does not match.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<ParamVec> {
        let caps = self.regex.captures(path)?;
        let mut params = ParamVec::new();
        for (i, name) in self.param_names.iter().enumerate() {
            if let Some(m) = caps.get(i + 1) {
                params.push((Arc::clone(name), m.as_str().to_string()));
            }
        }
        Some(params)
    }

    /// Convert a path pattern to an anchored regex and extract parameter names.
    ///
    /// Transforms patterns like `/users/:id` into `^/users/([^/]+)$` (exact
    /// mode) or `^/users/([^/]+)(?:/|$)` (prefix mode) and extracts the
    /// ordered parameter names `["id"]`.
    #[allow(clippy::expect_used)] // escaped literals make the pattern infallible by construction
    fn pattern_to_regex(path: &str, mode: MatchMode) -> (Regex, Vec<Arc<str>>) {
        if path == "/" {
            let anchored = match mode {
                MatchMode::Exact => r"^/$",
                MatchMode::Prefix => r"^/",
            };
            return (
                Regex::new(anchored).expect("Failed to compile path regex"),
                Vec::new(),
            );
        }

        // Reserve space for the final regex string and parameter list
        let mut pattern = String::with_capacity(path.len() + 8);
        pattern.push('^');
        let mut param_names: Vec<Arc<str>> = Vec::with_capacity(path.matches(':').count());

        for segment in path.split('/') {
            if let Some(name) = segment.strip_prefix(':') {
                pattern.push_str("/([^/]+)");
                param_names.push(Arc::from(name));
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }

        match mode {
            MatchMode::Exact => pattern.push('$'),
            // Segment boundary: `/foo` must not claim `/foobar`
            MatchMode::Prefix => pattern.push_str("(?:/|$)"),
        }

        let regex = Regex::new(&pattern).expect("Failed to compile path regex");

        (regex, param_names)
    }
}
