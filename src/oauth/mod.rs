//! OAuth 2.0 metadata discovery and dynamic client registration.

pub mod clients;
pub mod discovery;
pub mod flow;
pub mod types;

// Re-export frequently used items from each module
pub use clients::registration::{parse_redirect_uris, register};
pub use discovery::{Discovery, discover, normalize_server_url, well_known_url};
pub use flow::{DcrOutcome, run};
pub use types::{
    AuthorizationServerMetadata, ClientAuthMethod, GrantType, OAuthErrorResponse,
    RegistrationRequest, RegistrationResponse, ResponseType,
};
