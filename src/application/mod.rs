// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the request layer and the services
// - Receives a verified user id and a request body, returns plain DTOs
// - Translates between DTOs and domain entities

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
