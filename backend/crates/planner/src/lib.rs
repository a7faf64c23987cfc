//! Planner Task Store Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - Task store implementations (Supabase, in-memory)
//! - `presentation/` - HTTP handlers
//!
//! ## Security Model
//! - Every request carries Telegram init data; the store is never touched
//!   unless its signature verifies
//! - The signed `user.id` must equal the claimed `telegramId`
//! - Clients see one message for every authentication failure; the reason
//!   is logged only
//! - Saves replace the whole `(telegram_id, date)` record through an upsert

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{PlannerConfig, StoreConfig};
pub use error::{PlannerError, PlannerResult};
pub use infra::memory::MemoryTaskRepository;
pub use infra::supabase::SupabaseTaskRepository;
pub use presentation::handlers::health;
pub use presentation::router::{tasks_router, tasks_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};

#[cfg(test)]
mod tests;
