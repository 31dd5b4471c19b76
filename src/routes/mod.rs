// ABOUTME: Route module organization for routes shared by both services
// ABOUTME: Service-specific routes live with their service (auth_server, resource_server)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Health check routes
pub mod health;
/// Query and form parameter parsing
pub mod query;

pub use health::HealthRoutes;
pub use query::QueryParams;
