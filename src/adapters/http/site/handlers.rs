use axum::extract::State;
use axum::{Form, Json};

use crate::domain::dashboard::DashboardSummary;
use crate::domain::foundation::Timestamp;
use crate::domain::inquiry::Inquiry;

use super::super::accounts::UserInfo;
use super::super::error::ApiError;
use super::super::middleware::{OptionalAuth, RequireAdmin};
use super::super::response::SeeOther;
use super::super::state::AppState;
use super::dto::{InquiryForm, WelcomeResponse};

/// GET / and GET /home
pub async fn home(OptionalAuth(actor): OptionalAuth) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Gym House".to_string(),
        user: actor.as_ref().map(UserInfo::from),
    })
}

/// POST /inquiry
pub async fn submit_inquiry(
    State(state): State<AppState>,
    Form(form): Form<InquiryForm>,
) -> Result<SeeOther, ApiError> {
    state
        .submit_inquiry_handler()
        .handle(form.into_new_inquiry(Timestamp::now()))
        .await?;
    Ok(SeeOther::to("/").success("Your inquiry has been submitted successfully!"))
}

/// GET /admin/inquiries
pub async fn list_inquiries(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Inquiry>>, ApiError> {
    Ok(Json(state.list_inquiries_handler().handle().await?))
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<DashboardSummary>, ApiError> {
    Ok(Json(state.dashboard_handler().handle(state.today()).await?))
}
