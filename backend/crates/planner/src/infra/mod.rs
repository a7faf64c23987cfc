//! Infrastructure Layer
//!
//! Task store implementations of the domain repository trait.

pub mod memory;
pub mod supabase;
