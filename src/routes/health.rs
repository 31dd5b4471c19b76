// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Reports liveness together with the service name and a timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use game_auth_core::constants::routes;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route for the named service
    pub fn routes(service_name: &'static str) -> axum::Router {
        use axum::{routing::get, Json, Router};

        Router::new().route(
            routes::HEALTH,
            get(move || async move {
                Json(serde_json::json!({
                    "status": "healthy",
                    "service": service_name,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                }))
            }),
        )
    }
}
