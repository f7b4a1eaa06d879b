//! Auth API client

use async_trait::async_trait;
use eventify_core::{Credentials, SignupForm};
use reqwest::Client;
use std::time::Duration;

use super::{build_http_client, decode, join_url, send, AuthApi, ClientResult};
use crate::config::AuthConfig;

/// Client for the demo auth API
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &AuthConfig) -> ClientResult<Self> {
        Self::new(
            config.url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, credentials: &Credentials) -> ClientResult<serde_json::Value> {
        let url = join_url(&self.base_url, "/auth/login");
        let response = send(self.client.post(url).json(credentials)).await?;
        decode(response).await
    }

    async fn signup(&self, form: &SignupForm) -> ClientResult<()> {
        let url = join_url(&self.base_url, "/users");
        send(self.client.post(url).json(form)).await?;
        Ok(())
    }
}
