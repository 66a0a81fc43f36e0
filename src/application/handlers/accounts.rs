//! Account handlers: login, administrator creation, member-with-login
//! creation and the startup bootstrap admin.

use std::sync::Arc;

use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{Actor, AuthError, DomainError, Role};
use crate::domain::membership::{Member, MemberDetails, NewMember};
use crate::domain::user::{AccountDetails, User};
use crate::ports::{MemberRepository, PasswordHasher, SessionIssuer, SessionToken, UserRepository};

use super::{validate_both, CatalogPorts};

#[derive(Debug)]
pub struct LoginCommand {
    pub username: String,
    pub password: SecretString,
    /// Where the login form wants to return to.
    pub next: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub actor: Actor,
    pub session: SessionToken,
    pub redirect_to: String,
}

/// Verifies credentials and issues a session token.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    sessions: Arc<dyn SessionIssuer>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        sessions: Arc<dyn SessionIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    /// # Errors
    ///
    /// - `InvalidCredentials` for an unknown username or a wrong password;
    ///   the two are indistinguishable to the caller, in timing too
    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, DomainError> {
        let username = cmd.username.trim();
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                self.hasher.verify_absent(&cmd.password);
                tracing::warn!(username, "Login for unknown username");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.hasher.verify(&cmd.password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let actor = user.actor();
        let session = self.sessions.issue(&actor)?;
        let redirect_to = redirect_target(actor.role, cmd.next.as_deref());
        tracing::info!(user_id = %actor.user_id, role = %actor.role, "User logged in");

        Ok(LoginResult {
            actor,
            session,
            redirect_to,
        })
    }
}

/// Only same-site paths are honoured as `next`; anything else falls back to
/// the role's landing page. Backslashes are refused because browsers read
/// `/\host` as `//host`.
fn redirect_target(role: Role, next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => match role {
            Role::Admin => "/dashboard".to_string(),
            Role::SubscriptionMember => "/".to_string(),
        },
    }
}

#[derive(Debug)]
pub struct CreateAdminCommand {
    pub account: AccountDetails,
    pub password: SecretString,
}

pub struct CreateAdminHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl CreateAdminHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: CreateAdminCommand) -> Result<User, DomainError> {
        let account = cmd.account.validated(cmd.password.expose_secret())?;
        let hash = self.hasher.hash(&cmd.password)?;
        let user = self
            .users
            .insert(account.into_new_user(hash, Role::Admin, None))
            .await?;
        tracing::info!(user_id = %user.id, username = %user.username, "Administrator created");
        Ok(user)
    }
}

/// A member record and its subscription login, submitted together.
#[derive(Debug)]
pub struct CreateMemberAndUserCommand {
    pub member: MemberDetails,
    pub account: AccountDetails,
    pub password: SecretString,
    pub today: NaiveDate,
}

/// Creates a member and a linked subscription account in one atomic write.
pub struct CreateMemberAndUserHandler {
    members: Arc<dyn MemberRepository>,
    catalog: CatalogPorts,
    hasher: Arc<dyn PasswordHasher>,
}

impl CreateMemberAndUserHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        catalog: CatalogPorts,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            members,
            catalog,
            hasher,
        }
    }

    pub async fn handle(&self, cmd: CreateMemberAndUserCommand) -> Result<(Member, User), DomainError> {
        let (details, account) = validate_both(
            cmd.member.validated(),
            cmd.account.validated(cmd.password.expose_secret()),
        )?;
        self.catalog.check_assignments(&details).await?;

        let hash = self.hasher.hash(&cmd.password)?;
        let (member, user) = self
            .members
            .insert_with_account(
                NewMember::joining(details, cmd.today),
                account.into_new_user(hash, Role::SubscriptionMember, None),
            )
            .await?;

        tracing::info!(
            member_id = %member.id,
            user_id = %user.id,
            "Member and subscription account created"
        );
        Ok((member, user))
    }
}

#[derive(Debug)]
pub struct BootstrapAdminCommand {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

/// Creates the first administrator at startup when none exists.
pub struct BootstrapAdminHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl BootstrapAdminHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Returns the created account, or `None` when an administrator already
    /// exists.
    pub async fn handle(&self, cmd: BootstrapAdminCommand) -> Result<Option<User>, DomainError> {
        if self.users.exists_with_role(Role::Admin).await? {
            tracing::debug!("Administrator already present, skipping bootstrap");
            return Ok(None);
        }

        let user = CreateAdminHandler::new(self.users.clone(), self.hasher.clone())
            .handle(CreateAdminCommand {
                account: AccountDetails {
                    username: cmd.username,
                    email: cmd.email,
                },
                password: cmd.password,
            })
            .await?;
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{JwtSessions, Pbkdf2PasswordHasher};
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{ErrorCode, PlanId};
    use crate::domain::membership::MembershipWindow;
    use crate::domain::user::PasswordHash;
    use crate::ports::SessionValidator;
    use std::sync::atomic::Ordering;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    fn hasher() -> Arc<dyn PasswordHasher> {
        Arc::new(Pbkdf2PasswordHasher::new(1_000))
    }

    fn sessions() -> Arc<JwtSessions> {
        Arc::new(JwtSessions::new(&secret("test-signing-secret"), 3600))
    }

    fn account(username: &str) -> AccountDetails {
        AccountDetails {
            username: username.to_string(),
            email: format!("{}@example.com", username.trim()),
        }
    }

    fn member_details() -> MemberDetails {
        MemberDetails {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555".to_string(),
            window: MembershipWindow::EMPTY,
            plan_id: None,
            trainer_id: None,
            workout_plan_id: None,
        }
    }

    fn member_and_user(store: &InMemoryStore) -> CreateMemberAndUserHandler {
        let shared = Arc::new(store.clone());
        CreateMemberAndUserHandler::new(
            shared.clone(),
            CatalogPorts::new(shared.clone(), shared.clone(), shared),
            hasher(),
        )
    }

    async fn admin(store: &InMemoryStore, username: &str, password: &str) -> User {
        CreateAdminHandler::new(Arc::new(store.clone()), hasher())
            .handle(CreateAdminCommand {
                account: account(username),
                password: secret(password),
            })
            .await
            .unwrap()
    }

    fn login(store: &InMemoryStore, sessions: Arc<JwtSessions>) -> LoginHandler {
        LoginHandler::new(Arc::new(store.clone()), hasher(), sessions)
    }

    fn login_cmd(username: &str, password: &str, next: Option<&str>) -> LoginCommand {
        LoginCommand {
            username: username.to_string(),
            password: secret(password),
            next: next.map(str::to_string),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Login
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn admin_login_issues_token_and_lands_on_dashboard() {
        let store = InMemoryStore::new();
        let root = admin(&store, "root", "s3cret!").await;
        let sessions = sessions();

        let result = login(&store, sessions.clone())
            .handle(login_cmd("root", "s3cret!", None))
            .await
            .unwrap();

        assert_eq!(result.redirect_to, "/dashboard");
        let actor = sessions.validate(&result.session.token).await.unwrap();
        assert_eq!(actor.user_id, root.id);
        assert_eq!(actor.role, Role::Admin);
    }

    #[tokio::test]
    async fn subscriber_login_lands_on_home_with_member_link() {
        let store = InMemoryStore::new();
        let (member, _) = member_and_user(&store)
            .handle(CreateMemberAndUserCommand {
                member: member_details(),
                account: account("ada"),
                password: secret("hunter22"),
                today: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .await
            .unwrap();

        let result = login(&store, sessions())
            .handle(login_cmd("ada", "hunter22", None))
            .await
            .unwrap();

        assert_eq!(result.redirect_to, "/");
        assert_eq!(result.actor.member_id, Some(member.id));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let store = InMemoryStore::new();
        admin(&store, "root", "s3cret!").await;
        let handler = login(&store, sessions());

        let wrong = handler.handle(login_cmd("root", "nope!!", None)).await.unwrap_err();
        let unknown = handler.handle(login_cmd("ghost", "s3cret!", None)).await.unwrap_err();

        assert_eq!(wrong.code, ErrorCode::InvalidCredentials);
        assert_eq!(wrong, unknown);
    }

    /// Counts key derivations so the login path can be checked for equal work.
    struct CountingHasher {
        inner: Pbkdf2PasswordHasher,
        derivations: std::sync::atomic::AtomicUsize,
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, password: &SecretString) -> Result<PasswordHash, AuthError> {
            self.inner.hash(password)
        }

        fn verify(&self, password: &SecretString, hash: &PasswordHash) -> Result<bool, AuthError> {
            self.derivations.fetch_add(1, Ordering::SeqCst);
            self.inner.verify(password, hash)
        }

        fn verify_absent(&self, password: &SecretString) {
            self.derivations.fetch_add(1, Ordering::SeqCst);
            self.inner.verify_absent(password)
        }
    }

    #[tokio::test]
    async fn unknown_user_costs_one_derivation_like_a_wrong_password() {
        let store = InMemoryStore::new();
        admin(&store, "root", "s3cret!").await;
        let counting = Arc::new(CountingHasher {
            inner: Pbkdf2PasswordHasher::new(1_000),
            derivations: Default::default(),
        });
        let handler = LoginHandler::new(Arc::new(store.clone()), counting.clone(), sessions());

        handler.handle(login_cmd("root", "nope!!", None)).await.unwrap_err();
        assert_eq!(counting.derivations.load(Ordering::SeqCst), 1);

        handler.handle(login_cmd("ghost", "nope!!", None)).await.unwrap_err();
        assert_eq!(counting.derivations.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn next_path_must_be_relative() {
        assert_eq!(redirect_target(Role::Admin, Some("/members/3")), "/members/3");
        assert_eq!(redirect_target(Role::Admin, Some("//evil.example")), "/dashboard");
        assert_eq!(redirect_target(Role::Admin, Some("/\\evil.example")), "/dashboard");
        assert_eq!(redirect_target(Role::Admin, Some("/members\\3")), "/dashboard");
        assert_eq!(
            redirect_target(Role::SubscriptionMember, Some("https://evil.example")),
            "/"
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Account creation
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn member_and_account_errors_are_reported_together() {
        let store = InMemoryStore::new();
        let err = member_and_user(&store)
            .handle(CreateMemberAndUserCommand {
                member: MemberDetails {
                    name: String::new(),
                    ..member_details()
                },
                account: account("has space"),
                password: secret("123"),
                today: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.details.contains_key("name"));
        assert!(err.details.contains_key("username"));
        assert!(err.details.contains_key("password"));
        assert!(MemberRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_plan_blocks_member_and_account() {
        let store = InMemoryStore::new();
        let err = member_and_user(&store)
            .handle(CreateMemberAndUserCommand {
                member: MemberDetails {
                    plan_id: Some(PlanId::new(12)),
                    ..member_details()
                },
                account: account("ada"),
                password: secret("hunter22"),
                today: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .await
            .unwrap_err();

        assert!(err.details.contains_key("membership_plan_id"));
        assert!(UserRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_admin_username_is_rejected() {
        let store = InMemoryStore::new();
        admin(&store, "root", "s3cret!").await;

        let err = CreateAdminHandler::new(Arc::new(store.clone()), hasher())
            .handle(CreateAdminCommand {
                account: account("root"),
                password: secret("another1"),
            })
            .await
            .unwrap_err();

        assert!(err.details.contains_key("username"));
    }

    #[tokio::test]
    async fn bootstrap_runs_once() {
        let store = InMemoryStore::new();
        let handler = BootstrapAdminHandler::new(Arc::new(store.clone()), hasher());
        let cmd = || BootstrapAdminCommand {
            username: "root".to_string(),
            email: "root@example.com".to_string(),
            password: secret("s3cret!"),
        };

        assert!(handler.handle(cmd()).await.unwrap().is_some());
        assert!(handler.handle(cmd()).await.unwrap().is_none());
        assert_eq!(UserRepository::list(&store).await.unwrap().len(), 1);
    }
}
