//! Login and logout.

use serde::Serialize;
use tracing::info;

use mentorhub_core::result::AppResult;
use mentorhub_core::types::SessionCredentials;
use mentorhub_session::{credentials, keys};

use crate::pipeline::{ApiClient, ApiRequest};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    /// Wrap an API client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Log in and store the issued credentials.
    ///
    /// The access token is stored with the configured lifetime.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<SessionCredentials> {
        let request =
            ApiRequest::post(self.client.login_path()).json(&LoginRequest { email, password })?;
        let creds: SessionCredentials = self.client.send_json(request).await?;

        credentials::persist_login(self.client.store().as_ref(), &creds, self.client.access_ttl())
            .await?;

        info!(user_id = %creds.user_id, user_type = %creds.user_type, "Logged in");
        Ok(creds)
    }

    /// Forget the stored session. Nothing is sent to the API.
    pub async fn logout(&self) -> AppResult<()> {
        credentials::clear_session(self.client.store().as_ref()).await?;
        self.client.store().remove(keys::USER_TYPE).await?;
        info!("Logged out");
        Ok(())
    }

    /// The stored credentials, if a complete session is present.
    pub async fn current_session(&self) -> AppResult<Option<SessionCredentials>> {
        credentials::read_credentials(self.client.store().as_ref()).await
    }
}
