//! Bearer token generation and digesting.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

use nashub_core::error::AppError;

/// Random bytes per token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Generates a fresh token from the operating system CSPRNG, encoded as
/// unpadded base64url.
///
/// Fails instead of falling back to a weaker source when the entropy
/// source is unavailable.
pub fn generate_token() -> Result<String, AppError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::internal(format!("Entropy source unavailable: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Hex SHA-256 of a token. Sessions are stored under this key so the
/// plaintext token never sits in memory longer than the request.
pub fn token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
