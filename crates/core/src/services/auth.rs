use std::sync::Arc;

use serde::Serialize;

use crate::email::Email;
use crate::error::{CoreError, CoreResult};
use crate::ports::{CredentialComparator, TokenPayload, TokenService, UserStore};
use crate::user::UserSummary;

/// Shared by every login failure so callers cannot probe which emails exist.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub const INVALID_TOKEN: &str = "Invalid or expired token";

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutput {
    pub user: UserSummary,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutput {
    pub access_token: String,
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    credentials: Arc<dyn CredentialComparator>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        credentials: Arc<dyn CredentialComparator>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            credentials,
            tokens,
        }
    }

    /// Authenticate by email and password and issue an access/refresh pair.
    pub async fn login(&self, input: LoginInput) -> CoreResult<LoginOutput> {
        let invalid = || CoreError::Unauthorized(INVALID_CREDENTIALS.into());

        let email = Email::parse(&input.email).map_err(|_| invalid())?;
        let user = self.users.find_by_email(&email).await?.ok_or_else(invalid)?;

        if !self
            .credentials
            .compare(&input.password, &user.password_hash)
            .await?
        {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(invalid());
        }

        let payload = TokenPayload::from(&user);
        let access_token = self.tokens.generate_access_token(&payload)?;
        let refresh_token = self.tokens.generate_refresh_token(&payload)?;

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginOutput {
            user: user.summary(),
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new access token. The refresh token
    /// itself is not rotated.
    pub async fn refresh(&self, refresh_token: &str) -> CoreResult<RefreshOutput> {
        let payload = self
            .tokens
            .verify_refresh_token(refresh_token)
            .map_err(|_| CoreError::Unauthorized(INVALID_TOKEN.into()))?;

        let user = self
            .users
            .find_by_id(payload.user_id)
            .await?
            .ok_or_else(|| CoreError::Unauthorized(INVALID_TOKEN.into()))?;

        let access_token = self
            .tokens
            .generate_access_token(&TokenPayload::from(&user))?;

        Ok(RefreshOutput { access_token })
    }
}
