//! OAuth client registration.
//!
//! Submits dynamic client registration requests per RFC 7591.

pub mod registration;

pub use registration::{build_registration_request, normalize_redirect_uris, parse_redirect_uris};
