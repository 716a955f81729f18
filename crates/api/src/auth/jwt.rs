//! JWT access and refresh tokens.
//!
//! Both token kinds are HS256-signed JWTs carrying the same [`Claims`] shape.
//! They are signed with distinct secrets, so a refresh token never verifies
//! as an access token and vice versa.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use helpdesk_core::error::{CoreError, CoreResult};
use helpdesk_core::ports::{TokenPayload, TokenService};
use helpdesk_core::roles::Role;
use helpdesk_core::services::auth::INVALID_TOKEN;
use helpdesk_core::types::DbId;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: DbId,
    pub email: String,
    pub role: Role,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

impl From<Claims> for TokenPayload {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret used to sign and verify access tokens.
    pub access_secret: String,
    /// Secret used to sign and verify refresh tokens.
    pub refresh_secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_REFRESH_SECRET`       | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `60`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics if either secret is missing or empty, or if both secrets are equal.
    pub fn from_env() -> Self {
        let access_secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!access_secret.is_empty(), "JWT_SECRET must not be empty");

        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .expect("JWT_REFRESH_SECRET must be set in the environment");
        assert!(!refresh_secret.is_empty(), "JWT_REFRESH_SECRET must not be empty");
        assert_ne!(
            access_secret, refresh_secret,
            "JWT_SECRET and JWT_REFRESH_SECRET must differ"
        );

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        Self {
            access_secret,
            refresh_secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

/// Build and sign a token for `payload` that expires `ttl_secs` from now.
pub fn generate_token(
    payload: &TokenPayload,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: payload.user_id,
        email: payload.email.clone(),
        role: payload.role,
        exp: now + ttl_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// [`TokenService`] backed by HS256 JWTs.
#[derive(Debug, Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    fn sign(&self, payload: &TokenPayload, secret: &str, ttl_secs: i64) -> CoreResult<String> {
        generate_token(payload, secret, ttl_secs)
            .map_err(|e| CoreError::Internal(format!("Token generation failed: {e}")))
    }

    fn verify(&self, token: &str, secret: &str) -> CoreResult<TokenPayload> {
        validate_token(token, secret)
            .map(TokenPayload::from)
            .map_err(|_| CoreError::Unauthorized(INVALID_TOKEN.into()))
    }
}

impl TokenService for JwtTokenService {
    fn generate_access_token(&self, payload: &TokenPayload) -> CoreResult<String> {
        self.sign(
            payload,
            &self.config.access_secret,
            self.config.access_token_expiry_mins * 60,
        )
    }

    fn generate_refresh_token(&self, payload: &TokenPayload) -> CoreResult<String> {
        self.sign(
            payload,
            &self.config.refresh_secret,
            self.config.refresh_token_expiry_days * 24 * 60 * 60,
        )
    }

    fn verify_access_token(&self, token: &str) -> CoreResult<TokenPayload> {
        self.verify(token, &self.config.access_secret)
    }

    fn verify_refresh_token(&self, token: &str) -> CoreResult<TokenPayload> {
        self.verify(token, &self.config.refresh_secret)
    }
}
