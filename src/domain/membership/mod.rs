//! Membership domain module.
//!
//! Members, the plans they buy, the payments that renew them, and the
//! membership window calculator that ties payments to dates.
//!
//! # Module Structure
//!
//! - `window` - MembershipWindow and the period calculator
//! - `member` - Member record and its editable details
//! - `plan` - MembershipPlan
//! - `payment` - Payment and renewal on payment
//! - `export` - Plain-text member export

mod export;
mod member;
mod payment;
mod plan;
mod window;

pub use export::MemberExport;
pub use member::{Member, MemberDetails, NewMember};
pub use payment::{NewPayment, Payment, Renewal};
pub use plan::{MembershipPlan, PlanDetails, MAX_DURATION_DAYS};
pub use window::MembershipWindow;
