//! Init Data Parsing
//!
//! Init data arrives as an `application/x-www-form-urlencoded` string.
//! Every pair except `hash` takes part in the data check string.

use thiserror::Error;
use url::form_urlencoded;

/// Reserved key carrying the hex signature
pub const HASH_KEY: &str = "hash";

/// Reason init data was rejected
///
/// Meant for debug logs only. Callers answering a client must not echo it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitDataError {
    #[error("init data is empty")]
    Empty,

    #[error("init data has no hash field")]
    MissingHash,

    #[error("init data repeats the key {0:?}")]
    DuplicateKey(String),

    #[error("hash is not valid hex")]
    MalformedHash,

    #[error("signature mismatch")]
    SignatureMismatch,

    #[error("init data has no user field")]
    MissingUser,

    #[error("user field is not a valid user object: {0}")]
    InvalidUser(String),
}

/// Parsed, not yet verified init data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitData {
    /// Decoded pairs in arrival order, `hash` excluded
    fields: Vec<(String, String)>,
    hash: String,
}

impl InitData {
    /// Parse a raw init data string
    ///
    /// Values are percent-decoded exactly once (`+` becomes a space).
    /// A missing or empty `hash`, or any key appearing twice, is rejected.
    pub fn parse(raw: &str) -> Result<Self, InitDataError> {
        if raw.trim().is_empty() {
            return Err(InitDataError::Empty);
        }

        let mut fields: Vec<(String, String)> = Vec::new();
        let mut hash: Option<String> = None;

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            if key == HASH_KEY {
                if hash.replace(value.into_owned()).is_some() {
                    return Err(InitDataError::DuplicateKey(HASH_KEY.to_string()));
                }
                continue;
            }
            if fields.iter().any(|(k, _)| *k == key) {
                return Err(InitDataError::DuplicateKey(key.into_owned()));
            }
            fields.push((key.into_owned(), value.into_owned()));
        }

        let hash = hash
            .filter(|h| !h.is_empty())
            .ok_or(InitDataError::MissingHash)?;

        Ok(Self { fields, hash })
    }

    /// Hex signature as received
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Decoded value of a signed field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Signed fields in arrival order
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Canonical string the signature covers
    ///
    /// Pairs sorted by key (byte order), rendered `key=value`, joined by `\n`.
    pub fn data_check_string(&self) -> String {
        let mut sorted: Vec<&(String, String)> = self.fields.iter().collect();
        sorted.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

        sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn into_fields(self) -> Vec<(String, String)> {
        self.fields
    }
}
