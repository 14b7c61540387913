use std::sync::Arc;

use tracing::info;
use trippy_core::{ApiError, LoginRequest};

use super::ServiceContext;
use crate::storage::SESSION_TOKEN_KEY;

/// Sign-in against `/auth/login`. Bypasses the retrying client: no warmup,
/// no bearer header, and no mock fallback.
#[derive(Clone)]
pub struct AuthService {
    ctx: Arc<ServiceContext>,
}

impl AuthService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<(), ApiError> {
        let request = self.ctx.client.build_login(credentials)?;
        let response = self.ctx.api.transport().execute(&request).await?;
        let login = self.ctx.client.parse_login(response)?;
        self.ctx.api.storage().session.set(SESSION_TOKEN_KEY, login.token);
        info!(username = %credentials.username, "signed in");
        Ok(())
    }

    pub fn logout(&self) {
        self.ctx.api.storage().session.remove(SESSION_TOKEN_KEY);
    }

    pub fn is_signed_in(&self) -> bool {
        self.ctx.api.storage().session_token().is_some()
    }
}
