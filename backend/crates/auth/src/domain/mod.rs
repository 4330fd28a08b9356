//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the token claim set.

pub mod entity;
pub mod repository;
pub mod token;
pub mod value_object;

// Re-exports
pub use entity::{app::App, user::User};
pub use repository::{AppReader, UserReader, UserWriter};
