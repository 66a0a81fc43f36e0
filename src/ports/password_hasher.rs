//! Password hashing port.

use secrecy::SecretString;

use crate::domain::foundation::AuthError;
use crate::domain::user::PasswordHash;

/// Hashes and verifies account passwords.
///
/// Implementations must salt every hash and compare in constant time.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &SecretString) -> Result<PasswordHash, AuthError>;

    /// Returns `Ok(false)` on mismatch; `Err` only if the stored hash is unreadable.
    fn verify(&self, password: &SecretString, hash: &PasswordHash) -> Result<bool, AuthError>;

    /// Does the work of a `verify` that fails, for a login whose account
    /// does not exist. An unknown username must cost as much as a wrong
    /// password.
    fn verify_absent(&self, password: &SecretString);
}
