use axum::extract::{Path, State};
use axum::{Form, Json};

use crate::application::handlers::CheckOutCommand;
use crate::domain::attendance::Attendance;
use crate::domain::foundation::{AttendanceId, Timestamp};

use super::super::error::ApiError;
use super::super::middleware::{RequireAdmin, RequireAuth};
use super::super::response::SeeOther;
use super::super::state::AppState;
use super::dto::CheckInForm;

/// GET /attendance
pub async fn list_attendance(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
) -> Result<Json<Vec<Attendance>>, ApiError> {
    Ok(Json(state.list_attendance_handler().handle(&actor).await?))
}

/// POST /attendance/checkin - lapsed members get in with a warning
pub async fn check_in(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<CheckInForm>,
) -> Result<SeeOther, ApiError> {
    let cmd = form.into_command(Timestamp::now(), state.today())?;
    let result = state.check_in_handler().handle(cmd).await?;
    Ok(SeeOther::to("/attendance").with_all(result.notices))
}

/// POST /attendance/checkout/:id
pub async fn check_out(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(attendance_id): Path<AttendanceId>,
) -> Result<SeeOther, ApiError> {
    let result = state
        .check_out_handler()
        .handle(CheckOutCommand {
            attendance_id,
            now: Timestamp::now(),
        })
        .await?;
    Ok(SeeOther::to("/attendance").with(result.notice))
}
