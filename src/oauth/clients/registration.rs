//! OAuth 2.0 Dynamic Client Registration client (RFC 7591).
//!
//! Builds the registration request, submits it once and classifies the answer.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::errors::RegistrationError;
use crate::oauth::types::{OAuthErrorResponse, RegistrationRequest, RegistrationResponse};

/// Split a comma-separated redirect URI list, trimming entries and dropping blanks.
pub fn parse_redirect_uris(raw: &str) -> Vec<String> {
    normalize_redirect_uris(raw.split(','))
}

/// Trim redirect URI candidates and drop blank ones, keeping caller order.
pub fn normalize_redirect_uris<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .filter_map(|uri| {
            let uri = uri.as_ref().trim();
            if uri.is_empty() {
                None
            } else {
                Some(uri.to_string())
            }
        })
        .collect()
}

/// Build the registration request, rejecting an empty redirect URI list.
pub fn build_registration_request<S: AsRef<str>>(
    client_name: &str,
    redirect_uris: &[S],
) -> Result<RegistrationRequest, RegistrationError> {
    let redirect_uris = normalize_redirect_uris(redirect_uris);
    if redirect_uris.is_empty() {
        return Err(RegistrationError::Validation(
            "At least one redirect URI must be provided".to_string(),
        ));
    }
    Ok(RegistrationRequest::new(client_name, redirect_uris))
}

/// Register a new OAuth client at `registration_endpoint`.
///
/// Sends a single POST; failures are never retried since a repeated submission
/// could register a second client.
pub async fn register<S: AsRef<str>>(
    http_client: &Client,
    registration_endpoint: &str,
    client_name: &str,
    redirect_uris: &[S],
) -> Result<RegistrationResponse, RegistrationError> {
    let request = build_registration_request(client_name, redirect_uris)?;

    let endpoint = Url::parse(registration_endpoint).map_err(|e| {
        RegistrationError::InvalidEndpoint(registration_endpoint.to_string(), e.to_string())
    })?;
    if !matches!(endpoint.scheme(), "https" | "http") {
        return Err(RegistrationError::InvalidEndpoint(
            registration_endpoint.to_string(),
            format!("unsupported scheme '{}'", endpoint.scheme()),
        ));
    }

    tracing::info!(%endpoint, "Registering client");
    tracing::debug!(request = ?request, "Client registration request");

    let response = http_client
        .post(endpoint)
        .json(&request)
        .send()
        .await
        .map_err(RegistrationError::Connection)?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(RegistrationError::Connection)?;

    tracing::debug!(status = status.as_u16(), "Registration response received");

    classify_response(status, body)
}

fn classify_response(
    status: StatusCode,
    body: String,
) -> Result<RegistrationResponse, RegistrationError> {
    let document = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(fields)) => Some(fields),
        _ => None,
    };

    match (status, document) {
        (StatusCode::CREATED, Some(fields)) => {
            let response = RegistrationResponse { fields };
            tracing::info!(client_id = ?response.client_id(), "Client registered successfully");
            Ok(response)
        }
        (StatusCode::CREATED, None) => Err(RegistrationError::InvalidResponse {
            status: status.as_u16(),
            body,
        }),
        (status, Some(fields)) => {
            let OAuthErrorResponse {
                error,
                error_description,
            } = OAuthErrorResponse::from_document(&fields);
            Err(RegistrationError::Rejected {
                status: status.as_u16(),
                error,
                error_description,
                body: Value::Object(fields),
            })
        }
        (status, None) => Err(RegistrationError::Unstructured {
            status: status.as_u16(),
            body,
        }),
    }
}
