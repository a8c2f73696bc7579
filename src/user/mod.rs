// Public API - what other modules can use
pub use handlers::get_token;
pub use issuer::{RongCloudConfig, RongCloudTokenIssuer, TokenIssuer};

// Internal modules
mod handlers;
pub mod issuer;
pub mod types;
