//! Standardized error types following the `error-dcr-<domain>-<number>` format.

use thiserror::Error;

/// Configuration errors that occur during startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error when version information is not available
    #[error("error-dcr-config-1 One of GIT_HASH or CARGO_PKG_VERSION must be set")]
    VersionNotSet,

    /// Error when HTTP client timeout cannot be parsed
    #[error("error-dcr-config-2 Failed to parse HTTP client timeout: {0}")]
    TimeoutParsingFailed(std::num::ParseIntError),

    /// Error when a certificate bundle cannot be loaded
    #[error("error-dcr-config-3 Unable to load certificate bundle '{0}': {1}")]
    CertificateLoadFailed(String, String),

    /// Error when HTTP client timeout does not fit in seconds
    #[error("error-dcr-config-4 HTTP client timeout out of range: {0}")]
    TimeoutOutOfRange(String),
}

/// Authorization server metadata discovery errors
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The server identifier is empty or cannot be turned into an http(s) URL
    #[error("error-dcr-discovery-1 Invalid server identifier '{0}': {1}")]
    InvalidServerIdentifier(String, String),

    /// DNS, TLS, timeout or refused connection while fetching metadata
    #[error("error-dcr-discovery-2 Failed to connect to authorization server: {0}")]
    Connection(#[source] reqwest::Error),

    /// The well-known endpoint answered with a non-2xx status
    #[error("error-dcr-discovery-3 Failed to retrieve metadata: HTTP {status}: {body}")]
    MetadataFetch { status: u16, body: String },

    /// The metadata body is not a JSON object
    #[error("error-dcr-discovery-4 Invalid JSON response from authorization server: {0}")]
    InvalidMetadata(String),
}

impl DiscoveryError {
    /// True when the failure happened before any network activity
    pub fn is_validation(&self) -> bool {
        matches!(self, DiscoveryError::InvalidServerIdentifier(..))
    }

    /// True for transport-level failures
    pub fn is_connection(&self) -> bool {
        matches!(self, DiscoveryError::Connection(_))
    }
}

/// Client registration errors
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Bad caller input; no request was sent
    #[error("error-dcr-registration-1 Invalid registration input: {0}")]
    Validation(String),

    /// The registration endpoint is not an absolute http(s) URL; no request was sent
    #[error("error-dcr-registration-2 Invalid registration endpoint '{0}': {1}")]
    InvalidEndpoint(String, String),

    /// DNS, TLS, timeout or refused connection while registering
    #[error("error-dcr-registration-3 Failed to connect to registration endpoint: {0}")]
    Connection(#[source] reqwest::Error),

    /// The server rejected the registration with a structured error body
    #[error(
        "error-dcr-registration-4 Registration failed with error {error} (HTTP {status}): {error_description}"
    )]
    Rejected {
        status: u16,
        error: String,
        error_description: String,
        body: serde_json::Value,
    },

    /// The server rejected the registration with a body that is not a JSON object
    #[error("error-dcr-registration-5 Registration failed: HTTP {status}: {body}")]
    Unstructured { status: u16, body: String },

    /// The server reported success but the body is not a JSON object
    #[error("error-dcr-registration-6 Invalid JSON response from registration endpoint (HTTP {status}): {body}")]
    InvalidResponse { status: u16, body: String },
}

impl RegistrationError {
    /// True when the failure happened before any network activity
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RegistrationError::Validation(_) | RegistrationError::InvalidEndpoint(..)
        )
    }

    /// True for transport-level failures
    pub fn is_connection(&self) -> bool {
        matches!(self, RegistrationError::Connection(_))
    }

    /// HTTP status of the server's answer, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            RegistrationError::Rejected { status, .. }
            | RegistrationError::Unstructured { status, .. }
            | RegistrationError::InvalidResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}
