//! Value Object Module

pub mod email;

pub use kernel::id::{AppId, UserId};
