//! Bot Token
//!
//! The bot token is the only secret behind init data verification.
//! It is zeroized on drop and never appears in `Debug` output.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Telegram bot token (`<bot_id>:<secret>`)
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BotToken(String);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token bytes, for key derivation only
    pub fn expose_secret(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Numeric bot id (the part before `:`), which is public and safe to log
    pub fn bot_id(&self) -> Option<u64> {
        self.0.split_once(':')?.0.parse().ok()
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BotToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let token = BotToken::new("123456:very-secret");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_bot_id() {
        assert_eq!(BotToken::new("123456:ABC").bot_id(), Some(123456));
        assert_eq!(BotToken::new("no-colon").bot_id(), None);
        assert_eq!(BotToken::new("abc:def").bot_id(), None);
    }

    #[test]
    fn test_expose_secret() {
        assert_eq!(BotToken::new("1:x").expose_secret(), b"1:x");
    }
}
