//! Gatekeeper - admin and user access gates in front of an HTTP API

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use config::{AuthConfig, Config, LoggingConfig};
use gatekeeper_api::{AppState, create_router};
use gatekeeper_auth::{AccessGate, Admin, CredentialClass, JwtVerifier, User};

/// Gatekeeper - cookie and bearer token gates for admin and user routes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "GATEKEEPER_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "GATEKEEPER_PORT")]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print a signed token for local testing
    IssueToken {
        /// Credential class the token is for
        #[arg(value_enum)]
        class: ClassArg,
        /// Subject (`sub` claim)
        subject: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ClassArg {
    Admin,
    User,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    init_logging(&config.logging);

    if config.auth.uses_default_secrets() {
        warn!("Using default signing secrets; set [auth] admin_secret and user_secret");
    }

    match args.command {
        Some(Command::IssueToken { class, subject }) => {
            let token = match class {
                ClassArg::Admin => {
                    issue_token::<Admin>(&config.auth, &config.auth.admin_secret, &subject)?
                }
                ClassArg::User => {
                    issue_token::<User>(&config.auth, &config.auth.user_secret, &subject)?
                }
            };
            println!("{}", token);
            Ok(())
        }
        Some(Command::Serve) | None => serve(config, args.bind, args.port).await,
    }
}

async fn serve(config: Config, bind: Option<String>, port: Option<u16>) -> Result<()> {
    info!("Starting Gatekeeper v{}", env!("CARGO_PKG_VERSION"));

    // Initialize gates
    let admin_gate = build_gate::<Admin>(&config.auth, &config.auth.admin_secret)?;
    let user_gate = build_gate::<User>(&config.auth, &config.auth.user_secret)?;

    // Create application state
    let state = AppState::new(admin_gate, user_gate);

    // Create router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Determine bind address
    let bind_addr = bind.unwrap_or(config.server.bind_address);
    let port = port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port).parse()?;

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Build the gate for class `C` backed by a JWT verifier
fn build_gate<C: CredentialClass>(auth: &AuthConfig, secret: &str) -> Result<AccessGate<C>> {
    let verifier = JwtVerifier::<C>::new(secret, auth.token_expiry_hours)?;

    info!(
        "{} gate ready (cookie: {}, verify timeout: {}ms)",
        C::NAME,
        C::COOKIE_NAME,
        auth.verify_timeout_ms
    );

    Ok(AccessGate::new(Arc::new(verifier)).with_verify_timeout(auth.verify_timeout()))
}

/// Mint a token for `subject` signed with the class secret
fn issue_token<C: CredentialClass>(
    auth: &AuthConfig,
    secret: &str,
    subject: &str,
) -> Result<String> {
    let verifier = JwtVerifier::<C>::new(secret, auth.token_expiry_hours)?;
    Ok(verifier.issue(subject)?)
}

/// Initialize logging
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Shutdown signal received");
}
