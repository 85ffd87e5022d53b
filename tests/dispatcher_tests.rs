//! Tests for the per-request dispatch driver.
//!
//! # Test Coverage
//!
//! Validates the dispatcher's core responsibilities:
//! - Outcome reporting: `Handled` vs `NotFound` as values
//! - Forward-only chain execution across multiple matched layers
//! - Short-circuiting when a handler does not invoke `next`
//! - Error propagation aborting the remaining chain
//! - Abort-signal observation between chain entries
//!
//! Handlers record into the per-request context, which doubles as the call
//! log.

use std::sync::Arc;

use http::Method;
use stratarouter::{AbortSignal, DispatchOutcome, Dispatcher, Next, Router};

use tracing_util::TestTracing;

type Calls = Vec<&'static str>;

fn terminal(tag: &'static str) -> impl Fn(&mut Calls, Next<Calls>) -> anyhow::Result<()> {
    move |calls: &mut Calls, _next: Next<Calls>| {
        calls.push(tag);
        Ok(())
    }
}

fn passthrough(tag: &'static str) -> impl Fn(&mut Calls, Next<Calls>) -> anyhow::Result<()> {
    move |calls: &mut Calls, next: Next<Calls>| {
        calls.push(tag);
        next.run(calls)
    }
}

#[test]
fn test_dispatch_reports_handled() {
    let _tracing = TestTracing::init();
    let mut router: Router<Calls> = Router::new();
    router.get("/pets/:id", terminal("get_pet"));
    let dispatcher = Dispatcher::new(Arc::new(router));

    let mut calls = Calls::new();
    let outcome = dispatcher
        .dispatch(&Method::GET, "/pets/42", &mut calls)
        .expect("dispatch failed");
    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(calls, ["get_pet"]);
}

#[test]
fn test_dispatch_reports_not_found_as_value() {
    let _tracing = TestTracing::init();
    let mut router: Router<Calls> = Router::new();
    router.get("/pets/:id", terminal("get_pet"));
    let dispatcher = Dispatcher::new(Arc::new(router));

    let mut calls = Calls::new();
    let outcome = dispatcher
        .dispatch(&Method::GET, "/users/42", &mut calls)
        .expect("not-found must not be an error");
    assert_eq!(outcome, DispatchOutcome::NotFound);
    assert!(calls.is_empty());
}

#[test]
fn test_dispatch_not_found_on_method_mismatch() {
    let _tracing = TestTracing::init();
    let mut router: Router<Calls> = Router::new();
    router.get("/pets/:id", terminal("get_pet"));
    let dispatcher = Dispatcher::new(Arc::new(router));

    let mut calls = Calls::new();
    let outcome = dispatcher
        .dispatch(&Method::POST, "/pets/42", &mut calls)
        .expect("not-found must not be an error");
    assert_eq!(outcome, DispatchOutcome::NotFound);
    assert!(calls.is_empty());
}

#[test]
fn test_dispatch_on_empty_router() {
    let _tracing = TestTracing::init();
    let router: Router<Calls> = Router::new();
    let dispatcher = Dispatcher::new(Arc::new(router));

    let mut calls = Calls::new();
    let outcome = dispatcher
        .dispatch(&Method::GET, "/", &mut calls)
        .expect("not-found must not be an error");
    assert_eq!(outcome, DispatchOutcome::NotFound);
}

#[test]
fn test_chain_spans_multiple_matched_layers() {
    let _tracing = TestTracing::init();
    let mut router: Router<Calls> = Router::new();
    router
        .use_("/", passthrough("logger"))
        .use_("/api", passthrough("api_scope"))
        .get("/api/users/:id", terminal("get_user"));
    let dispatcher = Dispatcher::new(Arc::new(router));

    let mut calls = Calls::new();
    let outcome = dispatcher
        .dispatch(&Method::GET, "/api/users/7", &mut calls)
        .expect("dispatch failed");
    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(calls, ["logger", "api_scope", "get_user"]);
}

#[test]
fn test_handler_without_next_short_circuits() {
    let _tracing = TestTracing::init();
    let mut router: Router<Calls> = Router::new();
    router
        .use_("/", terminal("gatekeeper"))
        .get("/pets/:id", terminal("get_pet"));
    let dispatcher = Dispatcher::new(Arc::new(router));

    let mut calls = Calls::new();
    let outcome = dispatcher
        .dispatch(&Method::GET, "/pets/42", &mut calls)
        .expect("dispatch failed");
    // Short-circuiting is still a handled request.
    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(calls, ["gatekeeper"]);
}

#[test]
fn test_handler_error_aborts_remaining_chain() {
    let _tracing = TestTracing::init();
    let mut router: Router<Calls> = Router::new();
    router
        .use_("/", passthrough("logger"))
        .use_("/", |calls: &mut Calls, _next: Next<Calls>| -> anyhow::Result<()> {
            calls.push("boom");
            anyhow::bail!("handler exploded")
        })
        .get("/pets/:id", terminal("get_pet"));
    let dispatcher = Dispatcher::new(Arc::new(router));

    let mut calls = Calls::new();
    let err = dispatcher
        .dispatch(&Method::GET, "/pets/42", &mut calls)
        .expect_err("handler failure must propagate");
    assert_eq!(err.to_string(), "handler exploded");
    assert_eq!(calls, ["logger", "boom"]);
}

#[test]
fn test_param_middleware_error_aborts_remaining_chain() {
    let _tracing = TestTracing::init();
    let mut router: Router<Calls> = Router::new();
    router
        .param(
            "id",
            |_value: &str, calls: &mut Calls, _next: Next<Calls>| -> anyhow::Result<()> {
                calls.push("param_boom");
                anyhow::bail!("bad parameter")
            },
        )
        .get("/pets/:id", terminal("get_pet"));
    let dispatcher = Dispatcher::new(Arc::new(router));

    let mut calls = Calls::new();
    let err = dispatcher
        .dispatch(&Method::GET, "/pets/42", &mut calls)
        .expect_err("middleware failure must propagate");
    assert_eq!(err.to_string(), "bad parameter");
    assert_eq!(calls, ["param_boom"]);
}

#[test]
fn test_pre_aborted_signal_runs_nothing() {
    let _tracing = TestTracing::init();
    let mut router: Router<Calls> = Router::new();
    router.get("/pets/:id", terminal("get_pet"));
    let dispatcher = Dispatcher::new(Arc::new(router));

    let signal = AbortSignal::new();
    signal.abort();

    let mut calls = Calls::new();
    let outcome = dispatcher
        .dispatch_with_signal(&Method::GET, "/pets/42", &mut calls, &signal)
        .expect("dispatch failed");
    assert_eq!(outcome, DispatchOutcome::Handled);
    assert!(calls.is_empty());
}

#[test]
fn test_abort_mid_chain_stops_advancement() {
    let _tracing = TestTracing::init();
    let signal = AbortSignal::new();
    let abort_handle = signal.clone();

    let mut router: Router<Calls> = Router::new();
    router
        .use_("/", move |calls: &mut Calls, next: Next<Calls>| {
            calls.push("use1");
            abort_handle.abort();
            next.run(calls)
        })
        .get("/pets/:id", terminal("get_pet"));
    let dispatcher = Dispatcher::new(Arc::new(router));

    let mut calls = Calls::new();
    let outcome = dispatcher
        .dispatch_with_signal(&Method::GET, "/pets/42", &mut calls, &signal)
        .expect("dispatch failed");
    assert_eq!(outcome, DispatchOutcome::Handled);
    // The aborting handler itself ran; nothing after it did.
    assert_eq!(calls, ["use1"]);
}

#[test]
fn test_concurrent_requests_are_independent() {
    let _tracing = TestTracing::init();
    let mut router: Router<Calls> = Router::new();
    router
        .param(
            "id",
            |_value: &str, calls: &mut Calls, next: Next<Calls>| {
                calls.push("param");
                next.run(calls)
            },
        )
        .get("/pets/:id", terminal("get_pet"));
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(router)));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            std::thread::spawn(move || {
                let path = format!("/pets/{i}");
                let mut calls = Calls::new();
                let outcome = dispatcher
                    .dispatch(&Method::GET, &path, &mut calls)
                    .expect("dispatch failed");
                assert_eq!(outcome, DispatchOutcome::Handled);
                assert_eq!(calls, ["param", "get_pet"]);
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
}

#[test]
fn test_dispatcher_exposes_router() {
    let _tracing = TestTracing::init();
    let mut router: Router<Calls> = Router::new();
    router.get("/pets/:id", terminal("get_pet"));
    let dispatcher = Dispatcher::new(Arc::new(router));
    assert_eq!(dispatcher.router().layers().len(), 1);
}
