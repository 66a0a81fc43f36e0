//! Login accounts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::text;
use crate::domain::foundation::{
    Actor, DomainError, FieldErrors, MemberId, Role, UserId, ValidationError,
};

const USERNAME_MAX: usize = 64;
const PASSWORD_MIN: usize = 6;

/// An encoded password hash, as produced by a `PasswordHasher`.
///
/// Never serialized and redacted from debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// A login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: PasswordHash,
    pub role: Role,
    pub member_id: Option<MemberId>,
}

impl User {
    pub fn from_new(id: UserId, new: NewUser) -> Self {
        Self {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            member_id: new.member_id,
        }
    }

    /// The actor this account acts as once logged in.
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.username.clone(), self.role, self.member_id)
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// The public part of an account, as listed to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

/// An account about to be inserted, password already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub member_id: Option<MemberId>,
}

/// Submitted account fields before the password is hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetails {
    pub username: String,
    pub email: String,
}

impl AccountDetails {
    /// Checks the account fields and the plaintext password together.
    pub fn validated(self, password: &str) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();
        self.check(&mut errors, password);
        errors.finish()?;
        Ok(Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }

    /// Records every account-field problem into `errors`.
    pub fn check(&self, errors: &mut FieldErrors, password: &str) {
        if let Err(e) = text::required("username", &self.username, USERNAME_MAX) {
            errors.push(e);
        } else if self.username.trim().contains(char::is_whitespace) {
            errors.push(ValidationError::invalid_format("username", "must not contain spaces"));
        }
        errors.check(text::email("email", &self.email));
        errors.check(password_rule(password));
    }

    pub fn into_new_user(
        self,
        password_hash: PasswordHash,
        role: Role,
        member_id: Option<MemberId>,
    ) -> NewUser {
        NewUser {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password_hash,
            role,
            member_id,
        }
    }
}

fn password_rule(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::empty_field("password"));
    }
    if password.chars().count() < PASSWORD_MIN {
        return Err(ValidationError::invalid_format(
            "password",
            format!("must be at least {} characters", PASSWORD_MIN),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(username: &str, email: &str) -> AccountDetails {
        AccountDetails {
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn valid_account_is_trimmed() {
        let valid = details(" coach ", " coach@example.com ")
            .validated("secret1")
            .unwrap();
        assert_eq!(valid.username, "coach");
        assert_eq!(valid.email, "coach@example.com");
    }

    #[test]
    fn short_password_and_spaced_username_are_rejected() {
        let err = details("big coach", "coach@example.com")
            .validated("abc")
            .unwrap_err();
        assert!(err.details.contains_key("username"));
        assert!(err.details.contains_key("password"));
    }

    #[test]
    fn password_hash_is_redacted_in_debug() {
        let hash = PasswordHash::new("pbkdf2-sha256$1$00$00");
        assert_eq!(format!("{:?}", hash), "PasswordHash(..)");
    }

    #[test]
    fn user_never_serializes_hash() {
        let user = User::from_new(
            UserId::new(1),
            details("coach", "coach@example.com").into_new_user(
                PasswordHash::new("secret-hash"),
                Role::Admin,
                None,
            ),
        );
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"role\":\"admin\""));
    }

    #[test]
    fn actor_carries_member_link() {
        let user = User::from_new(
            UserId::new(4),
            details("sam", "sam@example.com").into_new_user(
                PasswordHash::new("h"),
                Role::SubscriptionMember,
                Some(MemberId::new(8)),
            ),
        );
        let actor = user.actor();
        assert_eq!(actor.user_id, UserId::new(4));
        assert_eq!(actor.member_id, Some(MemberId::new(8)));
    }
}
