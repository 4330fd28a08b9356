//! Common ID Types
//!
//! Type-safe integer ID wrappers for domain entities.
//! Zero is reserved as the "unset" sentinel and can never be wrapped.

use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;

/// Returned when a raw id is the unset sentinel (`0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("id is unset")]
pub struct UnsetIdError;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
///
/// let id = UserId::new(7).unwrap();
/// assert_eq!(id.get(), 7);
/// assert!(UserId::new(0).is_err());
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap a raw id, rejecting the unset sentinel
    pub fn new(value: i64) -> Result<Self, UnsetIdError> {
        if value == 0 {
            return Err(UnsetIdError);
        }
        Ok(Self::from_raw(value))
    }

    /// Wrap a raw id without the sentinel check.
    ///
    /// For values read back from storage and for probing how lower layers
    /// handle an unset id.
    pub const fn from_raw(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying integer
    pub const fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would require `T: Clone` etc. on the marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> TryFrom<i64> for Id<T> {
    type Error = UnsetIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for App (tenant) IDs
    pub struct App;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type AppId = Id<markers::App>;
