use lenz_core::error::{ToolError, ToolResult};
use lenz_core::params::Credentials;
use unsplash_provider::UnsplashClient;

/// Checks an access key against the live API.
pub struct CredentialValidator {
    client: UnsplashClient,
}

impl CredentialValidator {
    pub fn new(client: UnsplashClient) -> Self {
        Self { client }
    }

    /// Rejects an empty key without touching the network, then issues a
    /// single authenticated probe. Only an accepted probe passes.
    pub async fn validate(&self, credentials: &Credentials) -> ToolResult<()> {
        if credentials.is_empty() {
            return Err(ToolError::InvalidCredentials {
                message: "Unsplash Access Key cannot be empty".into(),
            });
        }

        tracing::info!("testing Unsplash API credentials");
        self.client
            .check_credentials(&credentials.access_key)
            .await?;
        tracing::info!("Unsplash API credentials validation successful");
        Ok(())
    }
}
