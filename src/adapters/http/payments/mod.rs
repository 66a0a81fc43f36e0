//! HTTP adapter for payments.
//!
//! - `GET /payments` - All payments for administrators, own payments otherwise
//! - `POST /payments/add` - Record a payment and renew the membership (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::PaymentForm;
pub use routes::payment_routes;
