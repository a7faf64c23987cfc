//! Web App User
//!
//! The JSON object Telegram puts in the `user` field of init data.

use serde::Deserialize;

/// Telegram user as described by init data
///
/// Only `id` is required. Unknown fields are ignored so new Telegram
/// attributes do not break parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebAppUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: Option<bool>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_premium: Option<bool>,
    #[serde(default)]
    pub allows_write_to_pm: Option<bool>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl WebAppUser {
    /// Decimal form of the user id, as clients send it
    pub fn telegram_id(&self) -> String {
        self.id.to_string()
    }
}
