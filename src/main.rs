//! Imagegen - prompt-to-image gateway over an AI image provider.
//!
//! - `imagegen serve` exposes `POST /api/generate-image`
//! - `imagegen generate` runs one generation and prints the JSON result

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod gateway;
mod model;
mod ports;
mod ratio;
mod server;
mod types;

use std::path::Path;
use std::process;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, GenerateArgs, ServeArgs};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::AppError;
use crate::server::{build_router, AppState};
use crate::types::GenerateImageResponse;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "imagegen=debug" } else { "imagegen=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(AppError::Config)?;
    tracing::debug!("Config: {}", config_path.display());

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("IMAGEGEN_REPLAY").ok();
    let is_recording = std::env::var("IMAGEGEN_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::info!("Replaying from: {cassette_path}");
        (ServiceContext::replaying(&config, Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::info!("Recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    let result = match cli.command {
        Command::Serve(args) => serve(&config, args, ctx).await,
        Command::Generate(args) => generate(&ctx, args).await,
    };

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    result
}

async fn serve(config: &Config, args: ServeArgs, ctx: ServiceContext) -> Result<(), AppError> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or_else(|| config.port());

    if !ctx.gateway.is_configured() {
        tracing::warn!("No provider configured; generation requests will fail until a key is set");
    }

    let listener = TcpListener::bind((host.as_str(), port)).await?;
    let router = build_router(AppState { gateway: ctx.gateway });
    server::serve(listener, router).await?;
    Ok(())
}

async fn generate(ctx: &ServiceContext, args: GenerateArgs) -> Result<(), AppError> {
    match ctx.gateway.generate(&args.into()).await {
        Ok(generated) => {
            let body = GenerateImageResponse::from(generated);
            let json = serde_json::to_string_pretty(&body)
                .map_err(|e| AppError::Io(std::io::Error::other(e)))?;
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            if let Some(details) = e.raw_details() {
                eprintln!("Details: {details}");
            }
            Err(e.into())
        }
    }
}
