//! Auth Config

use clap::Args;

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Shared secret used to sign session tokens
    #[arg(long, env = "TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: String,

    /// Session token lifetime in days
    #[arg(long, env = "TOKEN_TTL_DAYS", default_value = "7")]
    pub token_ttl_days: u32,
}
