// ABOUTME: Game backend binary
// ABOUTME: Delegates player authentication to the authorization server and hands out login/OTP pairs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Game Backend Binary
//!
//! Resource server side of the hand-off: `/auth` starts a flow, `/callback`
//! receives the grant, `/session` returns the stored login/OTP.

use anyhow::Result;
use clap::Parser;
use game_auth::{
    config::environment::ResourceServerConfig,
    constants::{routes, service_names},
    logging,
    resource_server::{self, ResourceServerResources},
    server,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "game-backend")]
#[command(about = "Game backend delegating player login to the authorization server")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env(service_names::GAME_BACKEND)?;

    let mut config = ResourceServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    info!("{}", config.summary());

    let resources = Arc::new(ResourceServerResources::new(&config)?);
    info!(
        callback = %resources.authorization_client.callback_url(),
        "Authorization client ready"
    );
    let app = resource_server::app(resources, &config.cors);

    display_available_endpoints(&config);

    if let Err(e) = server::serve(app, config.http_port).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}

fn display_available_endpoints(config: &ResourceServerConfig) {
    let port = config.http_port;
    info!("Available endpoints:");
    info!("  GET  http://localhost:{port}{}", routes::AUTH);
    info!("  GET  http://localhost:{port}{}", routes::CALLBACK);
    info!("  GET  http://localhost:{port}{}", routes::SESSION);
    info!("  GET  http://localhost:{port}{}", routes::HEALTH);
}
