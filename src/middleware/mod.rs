// ABOUTME: HTTP middleware for request tracing, CORS, and panic recovery
// ABOUTME: Provides request ID generation/propagation and per-request spans for structured logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;
/// Request IDs and request spans
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use self::tracing::{http_trace_layer, HttpRequestSpan, REQUEST_ID_HEADER};

use crate::config::CorsConfig;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Wrap a service router with the HTTP plumbing shared by both services
///
/// Layer order, outermost first: panic recovery, request ID assignment,
/// request span, request ID echo on the response, CORS.
pub fn with_http_layers(router: Router, cors: &CorsConfig) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(CatchPanicLayer::new())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(http_trace_layer())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(setup_cors(cors)),
    )
}
