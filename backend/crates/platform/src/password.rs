//! Password Hashing and Verification
//!
//! One-way credential hashing with:
//! - Argon2id hashing (memory-hard, randomized salt)
//! - Cost parameters embedded in the PHC string, so verification never
//!   needs the cost stored separately
//! - Cost supplied by configuration instead of a hard-coded constant
//! - Zeroization of sensitive data
//!
//! ## Security Features
//! - Memory-hard hashing prevents GPU/ASIC attacks
//! - Zeroization prevents memory inspection attacks
//! - Pepper support for additional security layer

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Longest password (in bytes, after normalization) the hasher accepts.
///
/// Longer input is rejected rather than truncated.
pub const MAX_PASSWORD_BYTES: usize = 1024;

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Password is longer than the hasher accepts
    #[error("Password must be at most {max} bytes (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Cost parameters rejected by Argon2
    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// This type ensures that password data is securely erased from memory
/// when the value is dropped, preventing memory inspection attacks.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("my_secure_password");
/// assert_eq!(format!("{password:?}"), "ClearTextPassword(\"[REDACTED]\")");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap user input. Unicode is normalized using NFKC so that
    /// visually identical input hashes identically.
    pub fn new(raw: impl Into<String>) -> Self {
        let mut raw: String = raw.into();
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    /// Length in bytes after normalization
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the password is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Password bytes with the optional pepper appended
    fn material(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut combined = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            combined.extend_from_slice(p);
        }
        combined
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// This type stores the Argon2id hash in PHC format, which includes:
/// - Algorithm identifier
/// - Version
/// - Parameters (memory, iterations, parallelism)
/// - Salt
/// - Hash
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        // Validate it's a valid PHC string
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Create from the raw bytes of a stored PHC string
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PasswordHashError> {
        let s = std::str::from_utf8(bytes).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Self::from_phc_string(s)
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Get the PHC string as bytes for storage
    pub fn as_bytes(&self) -> &[u8] {
        self.hash.as_bytes()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hashing cost
// ============================================================================

/// Argon2 cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl HashingCost {
    /// Smallest cost Argon2 accepts. Fast; for tests and local development.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    pub const fn owasp() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }

    fn params(&self) -> Result<Params, PasswordHashError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))
    }
}

impl Default for HashingCost {
    fn default() -> Self {
        Self::owasp()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id password hasher
///
/// Cheap to clone; holds only the validated parameters and the pepper.
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, HashingCost, PasswordHasher};
///
/// let hasher = PasswordHasher::new(HashingCost::minimal(), None).unwrap();
/// let password = ClearTextPassword::new("correct horse battery staple");
/// let hashed = hasher.hash(&password).unwrap();
///
/// assert!(hasher.verify(&hashed, &password).unwrap());
/// assert!(!hasher.verify(&hashed, &ClearTextPassword::new("wrong")).unwrap());
/// ```
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    pepper: Option<Zeroizing<Vec<u8>>>,
}

impl PasswordHasher {
    /// Build a hasher, validating the cost up front
    ///
    /// ## Arguments
    /// * `cost` - Argon2 cost parameters used for new hashes
    /// * `pepper` - Optional application-wide secret appended before hashing
    pub fn new(cost: HashingCost, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        Ok(Self {
            params: cost.params()?,
            pepper: pepper.map(Zeroizing::new),
        })
    }

    fn pepper(&self) -> Option<&[u8]> {
        self.pepper.as_ref().map(|p| p.as_slice())
    }

    /// Hash the password using Argon2id
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    ///
    /// ## Errors
    /// `TooLong` if the password exceeds [`MAX_PASSWORD_BYTES`]
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordHashError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: password.len(),
            });
        }

        let material = password.material(self.pepper());

        // Generate random salt (128 bits = 16 bytes)
        let salt = SaltString::generate(OsRng);

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let hash = argon2
            .hash_password(&material, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored hash
    ///
    /// The cost is read from the hash itself. Argon2 compares in constant time.
    ///
    /// ## Returns
    /// - `Ok(true)` on match
    /// - `Ok(false)` for a well-formed hash that does not match
    /// - `Err(_)` only when the stored hash cannot be used
    pub fn verify(
        &self,
        hashed: &HashedPassword,
        password: &ClearTextPassword,
    ) -> Result<bool, PasswordHashError> {
        let parsed_hash = PasswordHash::new(&hashed.hash)
            .map_err(|_| PasswordHashError::InvalidHashFormat)?;

        // Nothing this long was ever hashed
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        let material = password.material(self.pepper());

        match Argon2::default().verify_password(&material, &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordHashError::HashingFailed(e.to_string())),
        }
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(HashingCost::minimal(), None).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let password = ClearTextPassword::new("TestPassword123!");
        let hashed = hasher.hash(&password).unwrap();

        // Correct password should verify
        assert!(hasher.verify(&hashed, &password).unwrap());

        // Wrong password should not verify
        let wrong_password = ClearTextPassword::new("WrongPassword123!");
        assert!(!hasher.verify(&hashed, &wrong_password).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = hasher();
        let password = ClearTextPassword::new("TestPassword123!");
        let first = hasher.hash(&password).unwrap();
        let second = hasher.hash(&password).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_cost_is_embedded() {
        let cost = HashingCost {
            memory_kib: 64,
            iterations: 3,
            parallelism: 1,
        };
        let hasher = PasswordHasher::new(cost, None).unwrap();
        let hashed = hasher.hash(&ClearTextPassword::new("TestPassword123!")).unwrap();

        let phc = hashed.as_phc_string();
        assert!(phc.starts_with("$argon2id$v=19$"));
        assert!(phc.contains("m=64,t=3,p=1"));

        // A hasher configured with a different cost still verifies it
        let other = PasswordHasher::new(HashingCost::minimal(), None).unwrap();
        assert!(other.verify(&hashed, &ClearTextPassword::new("TestPassword123!")).unwrap());
    }

    #[test]
    fn test_hash_with_pepper() {
        let pepper = b"my_secret_pepper".to_vec();
        let peppered = PasswordHasher::new(HashingCost::minimal(), Some(pepper)).unwrap();
        let plain = hasher();
        let wrong = PasswordHasher::new(HashingCost::minimal(), Some(b"wrong_pepper".to_vec()))
            .unwrap();

        let password = ClearTextPassword::new("TestPassword123!");
        let hashed = peppered.hash(&password).unwrap();

        assert!(peppered.verify(&hashed, &password).unwrap());
        assert!(!plain.verify(&hashed, &password).unwrap());
        assert!(!wrong.verify(&hashed, &password).unwrap());
    }

    #[test]
    fn test_too_long_is_rejected_not_truncated() {
        let hasher = hasher();
        let long_password = ClearTextPassword::new("a".repeat(MAX_PASSWORD_BYTES + 1));
        let result = hasher.hash(&long_password);
        assert!(matches!(result, Err(PasswordHashError::TooLong { .. })));

        let exact = ClearTextPassword::new("a".repeat(MAX_PASSWORD_BYTES));
        assert!(hasher.hash(&exact).is_ok());
    }

    #[test]
    fn test_invalid_cost() {
        let cost = HashingCost {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(
            PasswordHasher::new(cost, None),
            Err(PasswordHashError::InvalidCost(_))
        ));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let hasher = hasher();
        let password = ClearTextPassword::new("TestPassword123!");
        let hashed = hasher.hash(&password).unwrap();

        let restored = HashedPassword::from_bytes(hashed.as_bytes()).unwrap();
        assert!(hasher.verify(&restored, &password).unwrap());
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(matches!(
            HashedPassword::from_phc_string("not_a_valid_hash"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
        assert!(matches!(
            HashedPassword::from_bytes(&[0xff, 0xfe]),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_unicode_normalization() {
        let hasher = hasher();
        // U+212B ANGSTROM SIGN normalizes to U+00C5
        let hashed = hasher.hash(&ClearTextPassword::new("pass\u{212B}word")).unwrap();
        assert!(hasher.verify(&hashed, &ClearTextPassword::new("pass\u{00C5}word")).unwrap());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("secret");
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = hasher().hash(&password).unwrap();
        let debug_output = format!("{:?}", hashed);
        assert!(!debug_output.contains("argon2"));

        let peppered = PasswordHasher::new(HashingCost::minimal(), Some(b"pepper!".to_vec()))
            .unwrap();
        assert!(!format!("{:?}", peppered).contains("pepper!"));
    }
}
