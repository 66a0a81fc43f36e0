//! HTTP handlers for member routes.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Form, Json};

use crate::application::handlers::{AddMemberCommand, EditMemberCommand, MemberView};
use crate::domain::foundation::MemberId;
use crate::domain::membership::Member;

use super::super::error::ApiError;
use super::super::middleware::{RequireAdmin, RequireAuth};
use super::super::response::SeeOther;
use super::super::state::AppState;
use super::dto::MemberForm;

/// GET /members - every member, for both roles
pub async fn list_members(
    State(state): State<AppState>,
    RequireAuth(_actor): RequireAuth,
) -> Result<Json<Vec<Member>>, ApiError> {
    Ok(Json(state.members.list().await?))
}

/// POST /members/add
pub async fn add_member(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<MemberForm>,
) -> Result<SeeOther, ApiError> {
    state
        .add_member_handler()
        .handle(AddMemberCommand {
            details: form.into_details()?,
            today: state.today(),
        })
        .await?;
    Ok(SeeOther::to("/members").success("Member added successfully!"))
}

/// GET /members/:id - subscription users only for their own record
pub async fn view_member(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(member_id): Path<MemberId>,
) -> Result<Json<MemberView>, ApiError> {
    let view = state
        .get_member_handler()
        .handle(&actor, member_id, state.today())
        .await?;
    Ok(Json(view))
}

/// POST /members/edit/:id
pub async fn edit_member(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(member_id): Path<MemberId>,
    Form(form): Form<MemberForm>,
) -> Result<SeeOther, ApiError> {
    state
        .edit_member_handler()
        .handle(EditMemberCommand {
            member_id,
            details: form.into_details()?,
        })
        .await?;
    Ok(SeeOther::to(format!("/members/{}", member_id)).success("Member updated successfully!"))
}

/// GET /members/export/:id - `text/plain` attachment
pub async fn export_member(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(member_id): Path<MemberId>,
) -> Result<impl IntoResponse, ApiError> {
    let file = state
        .export_member_handler()
        .handle(member_id, state.today())
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", file.filename),
            ),
        ],
        file.body,
    ))
}

/// POST /members/delete/:id
pub async fn delete_member(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(member_id): Path<MemberId>,
) -> Result<SeeOther, ApiError> {
    state.delete_member_handler().handle(member_id).await?;
    Ok(SeeOther::to("/members").success("Member deleted successfully!"))
}
