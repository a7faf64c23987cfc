//! Init Data Verification
//!
//! Implements the Telegram Web App validation scheme:
//!
//! ```text
//! secret_key = HMAC_SHA256(key = "WebAppData", message = bot_token)
//! hash       = hex(HMAC_SHA256(key = secret_key, message = data_check_string))
//! ```
//!
//! The older `SHA256(bot_token)` key derivation belongs to the Login Widget,
//! not to Web Apps, and is not accepted here.

use chrono::{DateTime, Duration, Utc};
use platform::crypto::{constant_time_eq, from_hex, hmac_sha256, to_hex};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::init_data::{InitData, InitDataError};
use crate::token::BotToken;
use crate::user::WebAppUser;

/// Fixed HMAC key for deriving the Web App secret key
pub const WEB_APP_DATA_KEY: &[u8] = b"WebAppData";

/// Secret key derived from the bot token
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey([u8; 32]);

impl SigningKey {
    pub fn derive(bot_token: &[u8]) -> Self {
        Self(hmac_sha256(WEB_APP_DATA_KEY, bot_token))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"[REDACTED]").finish()
    }
}

/// Lowercase hex signature of a data check string
pub fn sign_check_string(key: &SigningKey, check_string: &str) -> String {
    to_hex(&hmac_sha256(key.as_bytes(), check_string.as_bytes()))
}

/// Verify init data against a bot token
///
/// Returns `false` for forged, tampered or malformed input; never panics.
pub fn verify(init_data: &str, bot_token: &[u8]) -> bool {
    let key = SigningKey::derive(bot_token);
    check(&key, init_data).is_ok()
}

fn check(key: &SigningKey, raw: &str) -> Result<InitData, InitDataError> {
    let data = InitData::parse(raw)?;

    let expected = hmac_sha256(key.as_bytes(), data.data_check_string().as_bytes());
    let received = from_hex(data.hash()).map_err(|_| InitDataError::MalformedHash)?;

    if !constant_time_eq(&expected, &received) {
        tracing::debug!(fields = data.fields().len(), "Init data signature mismatch");
        return Err(InitDataError::SignatureMismatch);
    }

    Ok(data)
}

/// Verifier bound to one bot
///
/// Derives the secret key once so per-request work is a single HMAC.
#[derive(Debug, Clone)]
pub struct InitDataVerifier {
    key: SigningKey,
}

impl InitDataVerifier {
    pub fn new(bot_token: &BotToken) -> Self {
        Self {
            key: SigningKey::derive(bot_token.expose_secret()),
        }
    }

    pub fn verify(&self, init_data: &str) -> bool {
        check(&self.key, init_data).is_ok()
    }

    /// Verify and hand back the signed fields
    ///
    /// The error says why verification failed. Log it, never return it
    /// to the client.
    pub fn authenticate(&self, init_data: &str) -> Result<VerifiedInitData, InitDataError> {
        let data = check(&self.key, init_data)?;
        Ok(VerifiedInitData {
            fields: data.into_fields(),
        })
    }

    /// Produce a signed init data string from plain fields
    ///
    /// Used by test fixtures and local tooling that need to act as the
    /// Telegram client.
    pub fn sign(&self, fields: &[(&str, &str)]) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in fields {
            serializer.append_pair(k, v);
        }
        let unsigned = serializer.finish();

        let check_string = match InitData::parse(&format!("{}&hash=00", unsigned)) {
            Ok(data) => data.data_check_string(),
            Err(_) => String::new(),
        };
        let hash = sign_check_string(&self.key, &check_string);

        if unsigned.is_empty() {
            format!("hash={}", hash)
        } else {
            format!("{}&hash={}", unsigned, hash)
        }
    }
}

/// Init data whose signature has been checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedInitData {
    fields: Vec<(String, String)>,
}

impl VerifiedInitData {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn query_id(&self) -> Option<&str> {
        self.get("query_id")
    }

    /// The `user` object, required for identity binding
    pub fn user(&self) -> Result<WebAppUser, InitDataError> {
        let raw = self.get("user").ok_or(InitDataError::MissingUser)?;
        serde_json::from_str(raw).map_err(|e| InitDataError::InvalidUser(e.to_string()))
    }

    /// Time the init data was issued
    pub fn auth_date(&self) -> Option<DateTime<Utc>> {
        let secs: i64 = self.get("auth_date")?.parse().ok()?;
        DateTime::from_timestamp(secs, 0)
    }

    /// Whether `auth_date` lies within `max_age` of `now`
    ///
    /// Missing or unparseable `auth_date` is never fresh. Timestamps ahead
    /// of `now` (clock skew) count as fresh.
    pub fn is_fresh(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        match self.auth_date() {
            Some(issued) => now.signed_duration_since(issued) <= max_age,
            None => false,
        }
    }
}
