//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with configurable cost)
//! - Signed token primitives (HS256 JWT)

pub mod password;
pub mod token;
