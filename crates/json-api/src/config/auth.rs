//! Auth Config

use std::fmt;

use clap::Args;

/// Access token signing settings.
#[derive(Args)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    #[arg(long, env = "ACCESS_TOKEN_TTL_MINUTES", default_value_t = 30)]
    pub access_token_ttl_minutes: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .finish_non_exhaustive()
    }
}
