// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the request layer and services
// - Commands accept a verified user id plus DTOs, return DTOs
// - Commands convert AppError into ErrorResponse
// - Commands NEVER contain business logic

pub mod catalog_commands;
pub mod movie_commands;
pub mod statistics_commands;

pub use catalog_commands::*;
pub use movie_commands::*;
pub use statistics_commands::*;

/// Result type handed back to the request layer
pub type CommandResult<T> = Result<T, crate::application::error_handling::ErrorResponse>;
