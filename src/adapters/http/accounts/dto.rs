//! Request and response payloads for account routes.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::application::handlers::{
    CreateAdminCommand, CreateMemberAndUserCommand, LoginCommand, LoginResult,
};
use crate::domain::foundation::{Actor, DomainError, MemberId, Role, UserId};
use crate::domain::user::AccountDetails;

use super::super::members::MemberForm;

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

impl From<LoginForm> for LoginCommand {
    fn from(form: LoginForm) -> Self {
        LoginCommand {
            username: form.username,
            password: SecretString::new(form.password),
            next: form.next,
        }
    }
}

/// The signed-in user as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub member_id: Option<MemberId>,
}

impl From<&Actor> for UserInfo {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.user_id,
            username: actor.username.clone(),
            role: actor.role,
            member_id: actor.member_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub redirect_to: String,
    pub user: UserInfo,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            user: UserInfo::from(&result.actor),
            token: result.session.token,
            expires_in: result.session.expires_in,
            redirect_to: result.redirect_to,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct CreateAdminForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<CreateAdminForm> for CreateAdminCommand {
    fn from(form: CreateAdminForm) -> Self {
        CreateAdminCommand {
            account: AccountDetails {
                username: form.username,
                email: form.email,
            },
            password: SecretString::new(form.password),
        }
    }
}

/// Member fields plus the login. The account shares the member's email.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct CreateMemberAndUserForm {
    #[serde(flatten)]
    pub member: MemberForm,
    pub username: String,
    pub password: String,
}

impl CreateMemberAndUserForm {
    pub fn into_command(self, today: chrono::NaiveDate) -> Result<CreateMemberAndUserCommand, DomainError> {
        let account = AccountDetails {
            username: self.username,
            email: self.member.email.clone(),
        };
        Ok(CreateMemberAndUserCommand {
            member: self.member.into_details()?,
            account,
            password: SecretString::new(self.password),
            today,
        })
    }
}
