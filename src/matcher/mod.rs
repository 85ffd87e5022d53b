//! # Matcher Module
//!
//! Path pattern compilation and matching for stratarouter.
//!
//! ## Overview
//!
//! The matcher is responsible for:
//! - Compiling registration-time path patterns (e.g., `/pets/:id`) into
//!   regex-based predicates
//! - Matching incoming request paths against compiled patterns
//! - Extracting named path parameters, in the order they appear in the pattern
//!
//! ## Pattern Syntax
//!
//! A pattern is a `/`-separated sequence of segments. A segment starting with
//! `:` is a named placeholder matching exactly one non-empty path segment;
//! any other segment matches literally (regex metacharacters in literal
//! segments are escaped at compile time).
//!
//! ## Match Modes
//!
//! Every matcher is compiled in one of two modes:
//!
//! - [`MatchMode::Exact`] - the pattern must cover the whole request path.
//!   Used by verb registrations and `all`.
//! - [`MatchMode::Prefix`] - the pattern must cover a leading run of whole
//!   segments, so `/foo` matches `/foo` and `/foo/bar` but not `/foobar`.
//!   Used by `use_` registrations. The root pattern `/` matches every path.

mod core;

pub use core::{MatchMode, ParamVec, PathMatcher, MAX_INLINE_PARAMS};
