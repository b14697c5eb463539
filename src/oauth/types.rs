//! OAuth 2.0 client registration types.
//!
//! Defines the fixed-shape RFC 7591 request, the pass-through registration response,
//! the open RFC 8414 metadata document and the RFC 6749 error body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// OAuth 2.0 Grant Types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    AuthorizationCode,
}

/// OAuth 2.0 Response Types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Code,
}

/// OAuth 2.0 Client Authentication Methods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
    ClientSecretBasic,
}

/// Client Registration Request (RFC 7591)
///
/// Only the client name and redirect URIs come from the caller. Grant types,
/// response types and the token endpoint auth method are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Client name
    pub client_name: String,
    /// Redirect URIs, in caller order
    pub redirect_uris: Vec<String>,
    /// Grant types
    pub grant_types: Vec<GrantType>,
    /// Response types
    pub response_types: Vec<ResponseType>,
    /// Token endpoint authentication method
    pub token_endpoint_auth_method: ClientAuthMethod,
}

impl RegistrationRequest {
    /// Build a request for an authorization code client using HTTP Basic client auth.
    pub fn new(client_name: impl Into<String>, redirect_uris: Vec<String>) -> Self {
        Self {
            client_name: client_name.into(),
            redirect_uris,
            grant_types: vec![GrantType::AuthorizationCode],
            response_types: vec![ResponseType::Code],
            token_endpoint_auth_method: ClientAuthMethod::ClientSecretBasic,
        }
    }
}

/// Client Registration Response (RFC 7591)
///
/// Passed through verbatim from the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegistrationResponse {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RegistrationResponse {
    /// Assigned client identifier
    pub fn client_id(&self) -> Option<&str> {
        self.fields.get("client_id").and_then(Value::as_str)
    }

    /// Client secret, for confidential clients
    pub fn client_secret(&self) -> Option<&str> {
        self.fields.get("client_secret").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Authorization Server Metadata (RFC 8414)
///
/// Kept as an open document. Only `registration_endpoint` is interpreted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthorizationServerMetadata {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl AuthorizationServerMetadata {
    /// The advertised registration endpoint, if it is a non-empty string.
    pub fn registration_endpoint(&self) -> Option<&str> {
        self.fields
            .get("registration_endpoint")
            .and_then(Value::as_str)
            .filter(|endpoint| !endpoint.is_empty())
    }

    pub fn issuer(&self) -> Option<&str> {
        self.fields.get("issuer").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// OAuth Error Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthErrorResponse {
    /// Error code
    pub error: String,
    /// Error description
    pub error_description: String,
}

impl OAuthErrorResponse {
    /// Read `error` and `error_description` from an error body, falling back to
    /// `unknown_error` and `No description provided` when a member is missing or not a string.
    pub fn from_document(document: &Map<String, Value>) -> Self {
        let error = document
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown_error")
            .to_string();
        let error_description = document
            .get("error_description")
            .and_then(Value::as_str)
            .unwrap_or("No description provided")
            .to_string();
        Self {
            error,
            error_description,
        }
    }
}
