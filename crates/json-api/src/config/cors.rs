//! CORS Config

use clap::Args;
use salvo::{
    cors::{AllowOrigin, Cors, CorsHandler},
    http::{Method, header},
};

/// Cross-origin settings for the admin UI and storefront clients.
#[derive(Debug, Args)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or `*` for any
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", default_value = "*")]
    pub allowed_origins: String,
}

impl CorsConfig {
    /// Build the CORS middleware from the configured origin list.
    #[must_use]
    pub fn handler(&self) -> CorsHandler {
        let origin = if self.allowed_origins.trim() == "*" {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(
                self.allowed_origins
                    .split(',')
                    .filter_map(|origin| origin.trim().parse().ok()),
            )
        };

        Cors::new()
            .allow_origin(origin)
            .allow_methods(vec![
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .into_handler()
    }
}
