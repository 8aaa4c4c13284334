// Environment-overridable defaults, initialized once.

use std::env;

lazy_static::lazy_static! {
    /// Base URL of the brand wizard service.
    pub static ref SERVER_URL: String = env::var("BRANDFORGE_SERVER_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
}

/// File name used when saving the generated logo locally.
pub const LOGO_FILENAME: &str = "brand_logo.png";
