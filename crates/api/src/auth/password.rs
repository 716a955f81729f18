//! Argon2id password hashing and verification.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;

use helpdesk_core::error::{CoreError, CoreResult};
use helpdesk_core::password::PasswordHash as StoredHash;
use helpdesk_core::ports::CredentialComparator;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// [`CredentialComparator`] running Argon2 on the blocking thread pool.
#[derive(Debug, Default, Clone)]
pub struct Argon2Credentials;

#[async_trait]
impl CredentialComparator for Argon2Credentials {
    async fn hash(&self, plaintext: &str) -> CoreResult<StoredHash> {
        let plaintext = plaintext.to_owned();
        let digest = tokio::task::spawn_blocking(move || hash_password(&plaintext))
            .await
            .map_err(|e| CoreError::Internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;
        Ok(StoredHash::new(digest))
    }

    async fn compare(&self, plaintext: &str, digest: &StoredHash) -> CoreResult<bool> {
        let plaintext = plaintext.to_owned();
        let digest = digest.as_str().to_owned();
        tokio::task::spawn_blocking(move || verify_password(&plaintext, &digest))
            .await
            .map_err(|e| CoreError::Internal(format!("Password verification task failed: {e}")))?
            .map_err(|e| CoreError::Internal(format!("Password verification error: {e}")))
    }
}
