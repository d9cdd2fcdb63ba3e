//! Signed bearer tokens.
//!
//! A token is `base64url(uid:expires_at).base64url(hmac_sha256(key, payload))`.
//! Tokens are minted by the upstream identity service; this server only
//! verifies them. [`TokenSigner::issue`] exists for that service, for the
//! `issue-token` CLI subcommand and for tests.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use docshelf_core::UserID;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token HMAC key must not be empty")]
    EmptyKey,
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}

/// Identity carried by a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClaims {
    pub uid: UserID,
    pub expires_at: i64,
}

impl TokenSigner {
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, TokenError> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(TokenError::EmptyKey);
        }
        let mac = HmacSha256::new_from_slice(key).map_err(|_| TokenError::EmptyKey)?;
        Ok(Self { mac })
    }

    pub fn issue(&self, uid: UserID, expires_at: i64) -> String {
        let payload = format!("{uid}:{expires_at}");
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        let signature = mac.finalize().into_bytes();

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        )
    }

    /// Verify signature first, then expiry against `now` (unix seconds).
    pub fn verify(&self, token: &str, now: i64) -> Result<TokenClaims, TokenError> {
        let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac.clone();
        mac.update(&payload);
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let claims = parse_claims(&payload).ok_or(TokenError::Malformed)?;
        if claims.expires_at <= now {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

fn parse_claims(payload: &[u8]) -> Option<TokenClaims> {
    let payload = std::str::from_utf8(payload).ok()?;
    let (uid, expires_at) = payload.split_once(':')?;
    let uid: i64 = uid.parse().ok()?;
    if uid <= 0 {
        return None;
    }
    Some(TokenClaims {
        uid: UserID(uid),
        expires_at: expires_at.parse().ok()?,
    })
}
