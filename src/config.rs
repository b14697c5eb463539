//! Environment-based configuration for the outbound HTTP client.

use anyhow::Result;
use std::time::Duration;

use crate::errors::ConfigError;

/// Certificate bundles for HTTPS connections
#[derive(Clone, Debug, Default)]
pub struct CertificateBundles(Vec<String>);

/// HTTP client timeout configuration. `None` leaves the transport default in place.
#[derive(Clone, Debug, Default)]
pub struct HttpClientTimeout(Option<Duration>);

/// Main application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub version: String,
    pub user_agent: String,
    pub certificate_bundles: CertificateBundles,
    pub http_client_timeout: HttpClientTimeout,
}

impl Config {
    /// Create a new configuration from environment variables
    pub fn new() -> Result<Self> {
        let version = version()?;
        let certificate_bundles: CertificateBundles =
            optional_env("CERTIFICATE_BUNDLES").try_into()?;
        let default_user_agent = format!("oauth-dcr/{}", version);
        let user_agent = default_env("USER_AGENT", &default_user_agent);
        let http_client_timeout: HttpClientTimeout =
            optional_env("HTTP_CLIENT_TIMEOUT").try_into()?;

        Ok(Self {
            version,
            user_agent,
            certificate_bundles,
            http_client_timeout,
        })
    }

    /// Build the HTTP client used for discovery and registration.
    ///
    /// Redirects follow reqwest's default policy.
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        let mut client_builder = reqwest::Client::builder();
        for ca_certificate in self.certificate_bundles.as_ref() {
            tracing::info!("Loading CA certificate: {:?}", ca_certificate);
            let cert = std::fs::read(ca_certificate).map_err(|e| {
                ConfigError::CertificateLoadFailed(ca_certificate.clone(), e.to_string())
            })?;
            let cert = reqwest::Certificate::from_pem(&cert).map_err(|e| {
                ConfigError::CertificateLoadFailed(ca_certificate.clone(), e.to_string())
            })?;
            client_builder = client_builder.add_root_certificate(cert);
        }

        client_builder = client_builder.user_agent(self.user_agent.clone());
        if let Some(timeout) = self.http_client_timeout.as_ref() {
            client_builder = client_builder.timeout(*timeout);
        }

        Ok(client_builder.build()?)
    }
}

/// Get application version from build environment
pub fn version() -> Result<String> {
    option_env!("GIT_HASH")
        .or(option_env!("CARGO_PKG_VERSION"))
        .map(|val| val.to_string())
        .ok_or(ConfigError::VersionNotSet.into())
}

pub(crate) fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn default_env(name: &str, default_value: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default_value.to_string())
}

impl TryFrom<Option<String>> for CertificateBundles {
    type Error = anyhow::Error;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        let value = value.unwrap_or_default();
        Ok(Self(
            value
                .split(';')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect::<Vec<String>>(),
        ))
    }
}

impl AsRef<Vec<String>> for CertificateBundles {
    fn as_ref(&self) -> &Vec<String> {
        &self.0
    }
}

impl TryFrom<Option<String>> for HttpClientTimeout {
    type Error = ConfigError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        let value = match value {
            None => return Ok(Self(None)),
            Some(v) if v.trim().is_empty() => return Ok(Self(None)),
            Some(v) => v.trim().to_string(),
        };

        // Parse duration strings like "10s", "5m", etc.
        let seconds = if let Some(seconds) = value.strip_suffix('s') {
            seconds
                .parse::<u64>()
                .map_err(ConfigError::TimeoutParsingFailed)?
        } else if let Some(minutes) = value.strip_suffix('m') {
            minutes
                .parse::<u64>()
                .map_err(ConfigError::TimeoutParsingFailed)?
                .checked_mul(60)
                .ok_or_else(|| ConfigError::TimeoutOutOfRange(value.clone()))?
        } else {
            value
                .parse::<u64>()
                .map_err(ConfigError::TimeoutParsingFailed)?
        };

        Ok(Self(Some(Duration::from_secs(seconds))))
    }
}

impl AsRef<Option<Duration>> for HttpClientTimeout {
    fn as_ref(&self) -> &Option<Duration> {
        &self.0
    }
}
