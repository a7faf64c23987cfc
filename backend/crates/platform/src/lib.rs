//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC-SHA256, hex, constant-time compare)
//! - Typed environment configuration helpers

pub mod config;
pub mod crypto;
