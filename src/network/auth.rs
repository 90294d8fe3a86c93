//! JWT Authentication
//!
//! Validates JWTs minted by an external identity provider; the arena
//! server never issues tokens. The subject claim is hashed into the
//! stable 16-byte [`PlayerId`] used everywhere else, so the provider's
//! user-id format never leaks past this module.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::game::session::PlayerId;

/// Verification key material, one algorithm at a time.
#[derive(Clone, Debug)]
pub enum AuthKey {
    /// RS256 public key in PEM format (external providers).
    Rs256Pem(String),
    /// HS256 shared secret (simple deployments).
    Hs256Secret(String),
}

impl AuthKey {
    fn algorithm(&self) -> Algorithm {
        match self {
            AuthKey::Rs256Pem(_) => Algorithm::RS256,
            AuthKey::Hs256Secret(_) => Algorithm::HS256,
        }
    }

    fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        match self {
            AuthKey::Rs256Pem(pem) => DecodingKey::from_rsa_pem(pem.as_bytes())
                .map_err(|e| AuthError::DecodeError(format!("invalid public key: {}", e))),
            AuthKey::Hs256Secret(secret) => Ok(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Authentication configuration.
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
    /// Expected issuer claim ("iss"). If None, any issuer accepted.
    pub issuer: Option<String>,
    /// Expected audience claim ("aud"). If None, any audience accepted.
    pub audience: Option<String>,
    /// Verification key. None means auth is unconfigured and all
    /// tokens are refused.
    pub key: Option<AuthKey>,
    /// Whether to skip expiry validation (for testing only).
    pub skip_expiry: bool,
}

impl AuthConfig {
    /// Create config from environment variables. A PEM key takes
    /// precedence over a shared secret when both are set.
    pub fn from_env() -> Self {
        let key = std::env::var("ARENA_AUTH_PUBLIC_KEY_PEM")
            .ok()
            .map(AuthKey::Rs256Pem)
            .or_else(|| std::env::var("ARENA_AUTH_SECRET").ok().map(AuthKey::Hs256Secret));

        Self {
            issuer: std::env::var("ARENA_AUTH_ISSUER").ok(),
            audience: std::env::var("ARENA_AUTH_AUDIENCE").ok(),
            key,
            skip_expiry: std::env::var("ARENA_AUTH_SKIP_EXPIRY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Check if authentication is configured.
    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }
}

/// Standard JWT claims we expect from auth providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject - the user ID from the auth provider.
    pub sub: String,
    /// Expiry timestamp (Unix seconds).
    #[serde(default)]
    pub exp: u64,
    /// Issued at timestamp.
    #[serde(default)]
    pub iat: u64,
    /// Issuer (auth provider).
    #[serde(default)]
    pub iss: Option<String>,
    /// Audience.
    #[serde(default)]
    pub aud: Option<serde_json::Value>,
}

impl TokenClaims {
    /// Derive a deterministic PlayerId from the subject claim.
    ///
    /// SHA-256 over a domain-separated prefix plus the subject string,
    /// truncated to 16 bytes.
    pub fn player_id(&self) -> PlayerId {
        let mut hasher = Sha256::new();
        hasher.update(b"stick-arena-player:");
        hasher.update(self.sub.as_bytes());
        let hash = hasher.finalize();

        let mut id = [0u8; 16];
        id.copy_from_slice(&hash[..16]);
        PlayerId::new(id)
    }
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No verification key configured on the server.
    #[error("authentication not configured")]
    NotConfigured,
    /// Token format is invalid.
    #[error("invalid token format")]
    InvalidFormat,
    /// Token signature verification failed.
    #[error("invalid signature")]
    InvalidSignature,
    /// Token has expired.
    #[error("token expired")]
    Expired,
    /// Issuer claim doesn't match expected value.
    #[error("invalid issuer")]
    InvalidIssuer,
    /// Audience claim doesn't match expected value.
    #[error("invalid audience")]
    InvalidAudience,
    /// Required claim is missing.
    #[error("missing required claim: {0}")]
    MissingClaim(String),
    /// JWT decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Validate a JWT and resolve the caller's identity.
pub fn authenticate(token: &str, config: &AuthConfig) -> Result<PlayerId, AuthError> {
    validate_token(token, config).map(|claims| claims.player_id())
}

/// Validate a JWT token and extract claims.
pub fn validate_token(token: &str, config: &AuthConfig) -> Result<TokenClaims, AuthError> {
    let key = config.key.as_ref().ok_or(AuthError::NotConfigured)?;

    let mut validation = Validation::new(key.algorithm());
    validation.required_spec_claims = std::collections::HashSet::new();

    if let Some(ref issuer) = config.issuer {
        validation.set_issuer(&[issuer]);
    }
    if let Some(ref audience) = config.audience {
        validation.set_audience(&[audience]);
    } else {
        validation.validate_aud = false;
    }
    if config.skip_expiry {
        validation.validate_exp = false;
    }

    let token_data: TokenData<TokenClaims> =
        decode(token, &key.decoding_key()?, &validation).map_err(map_jwt_error)?;
    let claims = token_data.claims;

    if claims.sub.is_empty() {
        return Err(AuthError::MissingClaim("sub".into()));
    }

    // Manual expiry check covers tokens the library let through with
    // exp present but validation relaxed.
    if !config.skip_expiry && claims.exp > 0 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        if now > claims.exp {
            return Err(AuthError::Expired);
        }
    }

    Ok(claims)
}

/// Map JWT library errors to our error type.
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
        ErrorKind::InvalidAudience => AuthError::InvalidAudience,
        ErrorKind::InvalidToken | ErrorKind::Base64(_) => AuthError::InvalidFormat,
        _ => AuthError::DecodeError(err.to_string()),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "arena-test-secret-256-bits-long!";

    fn sign(claims: &TokenClaims, secret: &str) -> String {
        let header = Header::new(Algorithm::HS256);
        let key = EncodingKey::from_secret(secret.as_bytes());
        encode(&header, claims, &key).unwrap()
    }

    fn fresh_claims() -> TokenClaims {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        TokenClaims {
            sub: "fighter-42".into(),
            exp: now + 3600,
            iat: now,
            iss: Some("arena-idp".into()),
            aud: None,
        }
    }

    fn hs256_config() -> AuthConfig {
        AuthConfig {
            key: Some(AuthKey::Hs256Secret(SECRET.into())),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_token_resolves_identity() {
        let claims = fresh_claims();
        let token = sign(&claims, SECRET);

        let player = authenticate(&token, &hs256_config()).unwrap();
        assert_eq!(player, claims.player_id());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut claims = fresh_claims();
        claims.exp = 1;
        let token = sign(&claims, SECRET);

        let result = validate_token(&token, &hs256_config());
        assert!(matches!(result, Err(AuthError::Expired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign(&fresh_claims(), "some-other-secret-entirely!!!!!");

        let result = validate_token(&token, &hs256_config());
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_missing_sub_rejected() {
        let mut claims = fresh_claims();
        claims.sub = String::new();
        let token = sign(&claims, SECRET);

        let result = validate_token(&token, &hs256_config());
        assert!(matches!(result, Err(AuthError::MissingClaim(_))));
    }

    #[test]
    fn test_issuer_mismatch_rejected() {
        let token = sign(&fresh_claims(), SECRET);

        let config = AuthConfig {
            issuer: Some("someone-else".into()),
            ..hs256_config()
        };
        let result = validate_token(&token, &config);
        assert!(matches!(result, Err(AuthError::InvalidIssuer)));
    }

    #[test]
    fn test_player_id_stable_and_distinct() {
        let a = TokenClaims {
            sub: "fighter-42".into(),
            exp: 0,
            iat: 0,
            iss: None,
            aud: None,
        };
        let b = TokenClaims {
            sub: "fighter-43".into(),
            ..a.clone()
        };

        assert_eq!(a.player_id(), a.player_id());
        assert_ne!(a.player_id(), b.player_id());
    }

    #[test]
    fn test_unconfigured_refuses_everything() {
        let result = validate_token("some.jwt.token", &AuthConfig::default());
        assert!(matches!(result, Err(AuthError::NotConfigured)));
    }

    #[test]
    fn test_skip_expiry_accepts_stale_token() {
        let mut claims = fresh_claims();
        claims.exp = 1;
        let token = sign(&claims, SECRET);

        let config = AuthConfig {
            skip_expiry: true,
            ..hs256_config()
        };
        assert!(validate_token(&token, &config).is_ok());
    }
}
