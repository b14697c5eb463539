//! OAuth 2.0 Dynamic Client Registration (RFC 7591) client library.
//!
//! Discovers an authorization server's registration endpoint from its RFC 8414
//! metadata document and registers an authorization code client with it.

pub mod config;
pub mod errors;
pub mod oauth;
pub mod output;
