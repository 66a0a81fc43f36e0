use axum::extract::State;
use axum::{Form, Json};

use crate::domain::membership::Payment;

use super::super::error::ApiError;
use super::super::middleware::{RequireAdmin, RequireAuth};
use super::super::response::SeeOther;
use super::super::state::AppState;
use super::dto::PaymentForm;

/// GET /payments
pub async fn list_payments(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
) -> Result<Json<Vec<Payment>>, ApiError> {
    Ok(Json(state.list_payments_handler().handle(&actor).await?))
}

/// POST /payments/add
pub async fn add_payment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<PaymentForm>,
) -> Result<SeeOther, ApiError> {
    let payment = form.into_new_payment(state.today())?;
    state.record_payment_handler().handle(payment).await?;
    Ok(SeeOther::to("/payments").success("Payment recorded successfully!"))
}
