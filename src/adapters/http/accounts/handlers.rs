//! HTTP handlers for account routes.

use axum::extract::State;
use axum::{Form, Json};

use crate::application::Notice;

use super::super::error::ApiError;
use super::super::middleware::{RequireAdmin, RequireAuth};
use super::super::response::SeeOther;
use super::super::state::AppState;
use super::dto::{CreateAdminForm, CreateMemberAndUserForm, LoginForm, LoginResponse};

/// POST /login
///
/// Bad username and bad password both answer `401 INVALID_CREDENTIALS`.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = state.login_handler().handle(form.into()).await?;
    Ok(Json(result.into()))
}

/// POST /logout
///
/// Tokens are stateless, so there is nothing to revoke server-side; the
/// client drops its token.
pub async fn logout(RequireAuth(actor): RequireAuth) -> SeeOther {
    tracing::info!(user_id = %actor.user_id, "User logged out");
    SeeOther::to("/").with(Notice::info("You have been logged out."))
}

/// POST /admin/create_admin
pub async fn create_admin(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<CreateAdminForm>,
) -> Result<SeeOther, ApiError> {
    state.create_admin_handler().handle(form.into()).await?;
    Ok(SeeOther::to("/dashboard").success("Admin account created successfully!"))
}

/// POST /admin/create_member_and_user
pub async fn create_member_and_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<CreateMemberAndUserForm>,
) -> Result<SeeOther, ApiError> {
    let cmd = form.into_command(state.today())?;
    state.create_member_and_user_handler().handle(cmd).await?;
    Ok(SeeOther::to("/members").success("Member and user account created successfully!"))
}
