//! User accounts and credentials.

mod account;

pub use account::{AccountDetails, NewUser, PasswordHash, User, UserSummary};
