//! Telegram Mini App init data verification
//!
//! Pure, I/O-free verification of the `initData` string a Telegram client
//! attaches to Mini App requests.
//!
//! ## Security Model
//! - The bot token is the only secret; it is zeroized and never logged
//! - Signatures are compared in constant time after an equal-length check
//! - Malformed input is an ordinary "not authentic" outcome, never a panic
//! - Identity must be read from [`VerifiedInitData`], never from other
//!   request fields

pub mod init_data;
pub mod token;
pub mod user;
pub mod verify;

pub use init_data::{InitData, InitDataError};
pub use token::BotToken;
pub use user::WebAppUser;
pub use verify::{InitDataVerifier, SigningKey, VerifiedInitData, sign_check_string, verify};
