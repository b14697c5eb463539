//! Discovery followed by registration, folded into a single outcome.

use reqwest::Client;

use crate::errors::{DiscoveryError, RegistrationError};
use crate::oauth::clients::registration::{normalize_redirect_uris, register};
use crate::oauth::discovery::{Discovery, discover};
use crate::oauth::types::{AuthorizationServerMetadata, RegistrationResponse};

/// Terminal state of one registration attempt
#[derive(Debug)]
pub enum DcrOutcome {
    /// The server issued a client
    Registered {
        registration_endpoint: String,
        metadata: AuthorizationServerMetadata,
        response: RegistrationResponse,
    },
    /// The server metadata does not advertise a registration endpoint
    NotSupported { metadata: AuthorizationServerMetadata },
    /// Metadata could not be obtained; registration was not attempted
    DiscoveryFailed(DiscoveryError),
    /// Registration was attempted, or rejected locally before sending
    RegistrationFailed {
        registration_endpoint: Option<String>,
        error: RegistrationError,
    },
}

impl DcrOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DcrOutcome::Registered { .. })
    }
}

/// Run discovery against `server_identifier` and register with the advertised endpoint.
///
/// Redirect URIs are checked first so that an unusable list never reaches the network.
pub async fn run<S: AsRef<str>>(
    http_client: &Client,
    server_identifier: &str,
    client_name: &str,
    redirect_uris: &[S],
) -> DcrOutcome {
    let redirect_uris = normalize_redirect_uris(redirect_uris);
    if redirect_uris.is_empty() {
        return DcrOutcome::RegistrationFailed {
            registration_endpoint: None,
            error: RegistrationError::Validation(
                "At least one redirect URI must be provided".to_string(),
            ),
        };
    }

    let (registration_endpoint, metadata) = match discover(http_client, server_identifier).await
    {
        Ok(Discovery::Supported {
            registration_endpoint,
            metadata,
        }) => (registration_endpoint, metadata),
        Ok(Discovery::NotSupported { metadata }) => {
            return DcrOutcome::NotSupported { metadata };
        }
        Err(err) => return DcrOutcome::DiscoveryFailed(err),
    };

    match register(
        http_client,
        &registration_endpoint,
        client_name,
        redirect_uris.as_slice(),
    )
    .await
    {
        Ok(response) => DcrOutcome::Registered {
            registration_endpoint,
            metadata,
            response,
        },
        Err(error) => DcrOutcome::RegistrationFailed {
            registration_endpoint: Some(registration_endpoint),
            error,
        },
    }
}
