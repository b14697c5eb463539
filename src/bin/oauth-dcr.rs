//! OAuth 2.0 Dynamic Client Registration CLI Tool
//!
//! Registers a new OAuth client with an arbitrary authorization server following
//! RFC 7591. The registration endpoint is discovered from the server's
//! `/.well-known/oauth-authorization-server` metadata document (RFC 8414).
//!
//! ## Usage
//!
//! ```bash
//! oauth-dcr \
//!   --auth-server auth.example.com \
//!   --client-name "My OAuth Client" \
//!   --redirect-uris "http://localhost:8080/callback,http://localhost:3000/auth"
//! ```
//!
//! The registered client record is written to stdout. Progress and diagnostics are
//! logged to stderr; set `RUST_LOG` or pass `--verbose` to change the log level.
//!
//! ## Environment Variables
//!
//! - `USER_AGENT`: User-Agent header for outbound requests
//! - `CERTIFICATE_BUNDLES`: `;`-separated PEM files added as trust roots
//! - `HTTP_CLIENT_TIMEOUT`: request timeout such as `10s` or `2m` (unset: no timeout)
//!
//! ## Exit codes
//!
//! - 0: Client registered
//! - 1: Invalid input, discovery failure, registration not supported, or network error
//! - 2: Registration rejected by the server
//! - 3: Configuration error

use clap::Parser;
use oauth_dcr::{
    config::Config,
    errors::RegistrationError,
    oauth::{DcrOutcome, parse_redirect_uris, run},
    output::{OutputFormat, render},
};
use std::process;
use tracing_subscriber::prelude::*;

/// Main CLI application structure
#[derive(Parser)]
#[command(
    name = "oauth-dcr",
    about = "OAuth2 Dynamic Client Registration CLI",
    long_about = "Performs dynamic client registration against an OAuth2 authorization server \
                  following RFC 7591. The registration endpoint is discovered using the \
                  .well-known OAuth authorization server metadata.",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// OAuth2 authorization server URL
    #[arg(long, help = "OAuth2 authorization server URL (https:// is assumed when no scheme is given)")]
    auth_server: String,

    /// Name for the OAuth2 client
    #[arg(long, help = "Name for the OAuth2 client")]
    client_name: String,

    /// Comma-separated list of redirect URIs
    #[arg(
        long,
        help = "Comma-separated list of redirect URIs (e.g., http://localhost:8080/callback,http://localhost:3000/auth)"
    )]
    redirect_uris: String,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "json-pretty",
        help = "Output format for the registration response"
    )]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, help = "Enable verbose output for debugging")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "oauth_dcr=debug,info"
    } else {
        "oauth_dcr=info,warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let redirect_uris = parse_redirect_uris(&cli.redirect_uris);
    if redirect_uris.is_empty() {
        eprintln!("Error: At least one redirect URI must be provided");
        process::exit(1);
    }

    let http_client = match Config::new().and_then(|config| config.build_http_client()) {
        Ok(http_client) => http_client,
        Err(err) => {
            tracing::error!(error = ?err, "Invalid configuration");
            eprintln!("Error: {}", err);
            process::exit(3);
        }
    };

    tracing::info!(
        server = %cli.auth_server,
        client_name = %cli.client_name,
        redirect_uris = %redirect_uris.join(", "),
        "OAuth2 Dynamic Client Registration"
    );

    let outcome = run(
        &http_client,
        &cli.auth_server,
        &cli.client_name,
        redirect_uris.as_slice(),
    )
    .await;

    process::exit(report(cli.format, outcome));
}

/// Print the outcome and return the process exit code
fn report(format: OutputFormat, outcome: DcrOutcome) -> i32 {
    match outcome {
        DcrOutcome::Registered { response, .. } => match render(format, &response) {
            Ok(rendered) => {
                println!("{}", rendered);
                0
            }
            Err(err) => {
                eprintln!("Error: Unable to render registration response: {}", err);
                1
            }
        },
        DcrOutcome::NotSupported { .. } => {
            eprintln!(
                "Error: This authorization server does not support dynamic client registration (no 'registration_endpoint' in metadata)"
            );
            1
        }
        DcrOutcome::DiscoveryFailed(err) => {
            tracing::error!(error = ?err, "Unable to find registration endpoint");
            eprintln!("Error: {}", err);
            1
        }
        DcrOutcome::RegistrationFailed { error, .. } => {
            tracing::error!(error = ?error, "Registration failed");
            eprintln!("Error: {}", error);
            match error {
                RegistrationError::Rejected { status, body, .. } => {
                    eprintln!("HTTP Status: {}", status);
                    if let Ok(rendered) = render(OutputFormat::JsonPretty, &body) {
                        eprintln!("{}", rendered);
                    }
                    2
                }
                RegistrationError::Unstructured { .. }
                | RegistrationError::InvalidResponse { .. } => 2,
                RegistrationError::Validation(_)
                | RegistrationError::InvalidEndpoint(..)
                | RegistrationError::Connection(_) => 1,
            }
        }
    }
}
