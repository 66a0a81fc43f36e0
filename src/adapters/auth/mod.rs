//! Authentication adapters.
//!
//! Implementations of the credential ports:
//!
//! - `password` - `PasswordHasher` using PBKDF2-HMAC-SHA256
//! - `jwt` - `SessionIssuer` and `SessionValidator` using HS256 tokens
//! - `mock` - Test validator that doesn't sign anything

mod jwt;
#[cfg(test)]
mod mock;
mod password;

pub use password::Pbkdf2PasswordHasher;
pub use jwt::JwtSessions;
#[cfg(test)]
pub use mock::MockSessionValidator;
