// ABOUTME: Authorization server binary
// ABOUTME: Serves /oauth/authorize and /oauth/token for the registered client and user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authorization Server Binary
//!
//! Decides whether a browser session is authenticated and issues login/OTP
//! pairs for the single client and user named in the environment.

use anyhow::Result;
use clap::Parser;
use game_auth::{
    auth_server::{self, AuthServerResources},
    config::environment::AuthServerConfig,
    constants::{routes, service_names},
    logging, server,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "auth-server")]
#[command(about = "Authorization server issuing login/OTP pairs to game backends")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env(service_names::AUTH_SERVER)?;

    let mut config = AuthServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    info!("{}", config.summary());

    let resources = Arc::new(AuthServerResources::new(&config));
    let app = auth_server::app(resources, &config.cors);

    display_available_endpoints(&config);

    if let Err(e) = server::serve(app, config.http_port).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}

fn display_available_endpoints(config: &AuthServerConfig) {
    let port = config.http_port;
    info!("Available endpoints:");
    info!("  GET       http://localhost:{port}{}", routes::AUTHORIZE);
    info!("  GET/POST  http://localhost:{port}{}", routes::TOKEN);
    info!("  GET       http://localhost:{port}{}", routes::HEALTH);
}
