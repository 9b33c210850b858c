// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Multisig Wallet Node
//!
//! Entry point for the `multisig-node` binary. Parses CLI arguments,
//! initializes logging and metrics, and serves the wallet API.
//!
//! Subcommands:
//!
//! - `run`: host a wallet factory over an in-memory ledger
//! - `keygen`: print a fresh signer keypair and its address
//! - `version`: print build version information

mod api;
mod cli;
mod logging;
mod metrics;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;

use multisig_protocol::crypto::Keypair;

use cli::{Commands, MultisigNodeCli};
use metrics::NodeMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = MultisigNodeCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Keygen => {
            generate_key();
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Serves the wallet API and the metrics endpoint until shutdown.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    logging::init_logging(&args.log_level, args.log_format.into());

    tracing::info!(
        rpc_port = args.rpc_port,
        metrics_port = args.metrics_port,
        "starting multisig-node"
    );

    let node_metrics = Arc::new(NodeMetrics::new().context("failed to register metrics")?);

    let app_state = api::AppState::new(
        format!(
            "{} (protocol {})",
            env!("CARGO_PKG_VERSION"),
            multisig_protocol::config::PROTOCOL_VERSION,
        ),
        Arc::clone(&node_metrics),
    );
    tracing::info!(
        factory = %app_state.factory.read().await.factory_id(),
        "wallet factory ready"
    );

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("0.0.0.0:{}", args.rpc_port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind RPC listener on {}", api_addr))?;
    tracing::info!("wallet API listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&node_metrics));
    let metrics_addr = format!("0.0.0.0:{}", args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("metrics server listening on {}", metrics_addr);

    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            res.context("API server failed")?;
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            res.context("metrics server failed")?;
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received");
        }
    }

    tracing::info!("multisig-node stopped");
    Ok(())
}

/// Prints a new signer keypair. The secret goes to stdout only.
fn generate_key() {
    let keypair = Keypair::generate();
    println!("address    : {}", keypair.identity());
    println!("public key : {}", keypair.public_key_hex());
    println!("secret key : {}", keypair.secret_key_hex());
}

fn print_version() {
    println!("multisig-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol      {}", multisig_protocol::config::PROTOCOL_VERSION);
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// If a handler cannot be installed that branch never completes and the
/// other one still triggers shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
