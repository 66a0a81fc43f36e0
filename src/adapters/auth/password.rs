//! PBKDF2-HMAC-SHA256 password hasher.
//!
//! Hashes are stored as `pbkdf2-sha256$<iterations>$<salt hex>$<key hex>` so
//! the iteration count can be raised without invalidating existing accounts.

use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::foundation::AuthError;
use crate::domain::user::PasswordHash;
use crate::ports::PasswordHasher;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
const ABSENT_SALT: [u8; SALT_LEN] = [0x5a; SALT_LEN];
const ABSENT_KEY: [u8; KEY_LEN] = [0; KEY_LEN];

/// Production `PasswordHasher`.
#[derive(Debug, Clone)]
pub struct Pbkdf2PasswordHasher {
    iterations: u32,
}

impl Pbkdf2PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    fn derive(password: &[u8], salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
        key
    }
}

struct Encoded {
    iterations: u32,
    salt: Vec<u8>,
    key: Vec<u8>,
}

fn decode(hash: &PasswordHash) -> Option<Encoded> {
    let mut parts = hash.as_str().split('$');
    if parts.next()? != SCHEME {
        return None;
    }
    let iterations = parts.next()?.parse().ok()?;
    let salt = hex::decode(parts.next()?).ok()?;
    let key = hex::decode(parts.next()?).ok()?;
    if parts.next().is_some() || iterations == 0 {
        return None;
    }
    Some(Encoded {
        iterations,
        salt,
        key,
    })
}

impl PasswordHasher for Pbkdf2PasswordHasher {
    fn hash(&self, password: &SecretString) -> Result<PasswordHash, AuthError> {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let key = Self::derive(password.expose_secret().as_bytes(), &salt, self.iterations);

        Ok(PasswordHash::new(format!(
            "{}${}${}${}",
            SCHEME,
            self.iterations,
            hex::encode(salt),
            hex::encode(key)
        )))
    }

    fn verify(&self, password: &SecretString, hash: &PasswordHash) -> Result<bool, AuthError> {
        let encoded = decode(hash).ok_or_else(|| {
            tracing::error!("Stored password hash is not in a recognised format");
            AuthError::service_unavailable("unreadable password hash")
        })?;
        let key = Self::derive(
            password.expose_secret().as_bytes(),
            &encoded.salt,
            encoded.iterations,
        );
        Ok(key.as_slice().ct_eq(encoded.key.as_slice()).into())
    }

    fn verify_absent(&self, password: &SecretString) {
        let key = Self::derive(
            password.expose_secret().as_bytes(),
            &ABSENT_SALT,
            self.iterations,
        );
        let _ = std::hint::black_box(key.as_slice().ct_eq(ABSENT_KEY.as_slice()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    fn hasher() -> Pbkdf2PasswordHasher {
        Pbkdf2PasswordHasher::new(1_000)
    }

    #[test]
    fn verifies_the_right_password_only() {
        let hash = hasher().hash(&secret("hunter22")).unwrap();
        assert!(hasher().verify(&secret("hunter22"), &hash).unwrap());
        assert!(!hasher().verify(&secret("hunter23"), &hash).unwrap());
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = hasher().hash(&secret("hunter22")).unwrap();
        let b = hasher().hash(&secret("hunter22")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn encoded_form_records_iterations() {
        let hash = hasher().hash(&secret("hunter22")).unwrap();
        let parts: Vec<_> = hash.as_str().split('$').collect();
        assert_eq!(parts[0], "pbkdf2-sha256");
        assert_eq!(parts[1], "1000");
        assert_eq!(parts[2].len(), SALT_LEN * 2);
        assert_eq!(parts[3].len(), KEY_LEN * 2);
    }

    #[test]
    fn hashes_from_other_iteration_counts_still_verify() {
        let hash = Pbkdf2PasswordHasher::new(500).hash(&secret("hunter22")).unwrap();
        assert!(hasher().verify(&secret("hunter22"), &hash).unwrap());
    }

    #[test]
    fn absent_account_check_costs_a_full_derivation() {
        let slow = Pbkdf2PasswordHasher::new(20_000);
        let hash = slow.hash(&secret("hunter22")).unwrap();

        let started = std::time::Instant::now();
        slow.verify(&secret("wrong"), &hash).unwrap();
        let wrong_password = started.elapsed();

        let started = std::time::Instant::now();
        slow.verify_absent(&secret("wrong"));
        let unknown_user = started.elapsed();

        assert!(
            unknown_user * 4 >= wrong_password,
            "unknown user {unknown_user:?} vs wrong password {wrong_password:?}"
        );
    }

    #[test]
    fn malformed_hash_is_an_error() {
        for bad in ["", "bcrypt$1$00$00", "pbkdf2-sha256$x$00$00", "pbkdf2-sha256$1$zz$00"] {
            assert!(hasher().verify(&secret("a"), &PasswordHash::new(bad)).is_err(), "{bad}");
        }
    }
}
