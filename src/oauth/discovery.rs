//! Authorization server metadata discovery (RFC 8414).
//!
//! Normalizes a server identifier, fetches `/.well-known/oauth-authorization-server`
//! and extracts the dynamic client registration endpoint.

use reqwest::Client;
use url::Url;

use crate::errors::DiscoveryError;
use crate::oauth::types::AuthorizationServerMetadata;

/// Well-known path of the authorization server metadata document
pub const WELL_KNOWN_AUTHORIZATION_SERVER_PATH: &str = "/.well-known/oauth-authorization-server";

/// Result of a successful metadata fetch
#[derive(Debug, Clone, PartialEq)]
pub enum Discovery {
    /// The server advertises a registration endpoint
    Supported {
        registration_endpoint: String,
        metadata: AuthorizationServerMetadata,
    },
    /// The metadata is valid but has no usable `registration_endpoint`
    NotSupported { metadata: AuthorizationServerMetadata },
}

impl Discovery {
    pub fn registration_endpoint(&self) -> Option<&str> {
        match self {
            Discovery::Supported {
                registration_endpoint,
                ..
            } => Some(registration_endpoint),
            Discovery::NotSupported { .. } => None,
        }
    }

    pub fn metadata(&self) -> &AuthorizationServerMetadata {
        match self {
            Discovery::Supported { metadata, .. } | Discovery::NotSupported { metadata } => {
                metadata
            }
        }
    }
}

/// Turn a server identifier into a base URL, defaulting to `https` when no scheme is given.
pub fn normalize_server_url(server_identifier: &str) -> Result<Url, DiscoveryError> {
    let identifier = server_identifier.trim();
    if identifier.is_empty() {
        return Err(DiscoveryError::InvalidServerIdentifier(
            server_identifier.to_string(),
            "server identifier must not be empty".to_string(),
        ));
    }

    let candidate = if identifier.contains("://") {
        identifier.to_string()
    } else {
        format!("https://{}", identifier)
    };

    let base = Url::parse(&candidate).map_err(|e| {
        DiscoveryError::InvalidServerIdentifier(identifier.to_string(), e.to_string())
    })?;

    match base.scheme() {
        "https" | "http" => Ok(base),
        scheme => Err(DiscoveryError::InvalidServerIdentifier(
            identifier.to_string(),
            format!("unsupported scheme '{}'", scheme),
        )),
    }
}

/// Resolve the metadata document URL. The well-known path replaces any path on the base.
pub fn well_known_url(server_identifier: &str) -> Result<Url, DiscoveryError> {
    let base = normalize_server_url(server_identifier)?;
    base.join(WELL_KNOWN_AUTHORIZATION_SERVER_PATH)
        .map_err(|e| {
            DiscoveryError::InvalidServerIdentifier(server_identifier.to_string(), e.to_string())
        })
}

/// Fetch the authorization server metadata and extract the registration endpoint.
///
/// Performs exactly one GET. Non-2xx answers, transport failures and non-JSON bodies
/// are errors. A valid document without a registration endpoint is
/// [`Discovery::NotSupported`].
pub async fn discover(
    http_client: &Client,
    server_identifier: &str,
) -> Result<Discovery, DiscoveryError> {
    let well_known_url = well_known_url(server_identifier)?;

    tracing::info!(%well_known_url, "Discovering OAuth2 metadata");

    let response = http_client
        .get(well_known_url.clone())
        .send()
        .await
        .map_err(DiscoveryError::Connection)?;

    let status = response.status();
    let body = response.text().await.map_err(DiscoveryError::Connection)?;

    if !status.is_success() {
        return Err(DiscoveryError::MetadataFetch {
            status: status.as_u16(),
            body,
        });
    }

    let metadata: AuthorizationServerMetadata = match serde_json::from_str(&body) {
        Ok(serde_json::Value::Object(fields)) => AuthorizationServerMetadata { fields },
        Ok(other) => {
            return Err(DiscoveryError::InvalidMetadata(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )));
        }
        Err(e) => return Err(DiscoveryError::InvalidMetadata(e.to_string())),
    };

    tracing::info!(
        metadata = %serde_json::Value::Object(metadata.fields.clone()),
        "Retrieved authorization server metadata"
    );

    match metadata.registration_endpoint() {
        Some(registration_endpoint) => {
            let registration_endpoint = registration_endpoint.to_string();
            tracing::debug!(%registration_endpoint, "Found registration endpoint");
            Ok(Discovery::Supported {
                registration_endpoint,
                metadata,
            })
        }
        None => {
            tracing::warn!(
                "Authorization server does not support dynamic client registration: no registration_endpoint in metadata"
            );
            Ok(Discovery::NotSupported { metadata })
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
