//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (TaskRecord)
//! - Domain value objects (TelegramId, TaskDate, TaskKey, TaskList)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
