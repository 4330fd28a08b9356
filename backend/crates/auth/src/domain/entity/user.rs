//! User Entity
//!
//! A registered account as read back from storage. Lives for one request.

use platform::password::HashedPassword;

use crate::domain::value_object::{UserId, email::Email};

/// User entity
///
/// The admin flag is deliberately absent: it is owned and mutated outside
/// this service and only ever queried through `UserReader::is_admin`.
#[derive(Debug, Clone)]
pub struct User {
    /// Storage-assigned identifier
    pub id: UserId,
    /// Unique login email, compared byte for byte
    pub email: Email,
    /// Argon2id PHC hash (redacted in `Debug`)
    pub password_hash: HashedPassword,
}
