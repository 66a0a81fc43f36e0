//! Payments recorded against a member.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MemberId, Money, PaymentId, PlanId};

use super::{MembershipPlan, MembershipWindow};

/// A recorded payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub member_id: MemberId,
    pub amount: Money,
    pub payment_date: NaiveDate,
    pub plan_id: Option<PlanId>,
}

impl Payment {
    pub fn from_new(id: PaymentId, new: NewPayment) -> Self {
        Self {
            id,
            member_id: new.member_id,
            amount: new.amount,
            payment_date: new.payment_date,
            plan_id: new.plan_id,
        }
    }
}

/// A payment about to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub member_id: MemberId,
    pub amount: Money,
    pub payment_date: NaiveDate,
    pub plan_id: Option<PlanId>,
}

impl NewPayment {
    pub fn validated(self) -> Result<Self, DomainError> {
        if self.amount == Money::ZERO {
            return Err(DomainError::validation(
                "amount",
                "Amount must be greater than zero",
            ));
        }
        Ok(self)
    }

    /// The extension this payment grants under `plan`, or `None` when the
    /// payment is not tied to a plan.
    pub fn renewal(&self, plan: Option<&MembershipPlan>) -> Option<Renewal> {
        plan.map(|plan| Renewal {
            duration_days: plan.duration_days,
            payment_date: self.payment_date,
        })
    }
}

/// A window extension owed for a plan payment.
///
/// Stores apply it to the member's window as it stands when the payment is
/// written, never to an earlier read of the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renewal {
    pub duration_days: u32,
    pub payment_date: NaiveDate,
}

impl Renewal {
    pub fn apply(&self, window: &MembershipWindow) -> MembershipWindow {
        window.extend(self.duration_days, self.payment_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::PlanDetails;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn plan(days: u32) -> MembershipPlan {
        MembershipPlan::from_details(
            PlanId::new(1),
            PlanDetails {
                name: "Monthly".to_string(),
                duration_days: days,
                price: Money::from_cents(3000).unwrap(),
            },
        )
    }

    fn payment(on: NaiveDate) -> NewPayment {
        NewPayment {
            member_id: MemberId::new(1),
            amount: Money::from_cents(3000).unwrap(),
            payment_date: on,
            plan_id: Some(PlanId::new(1)),
        }
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = NewPayment {
            amount: Money::ZERO,
            ..payment(d(2024, 1, 1))
        }
        .validated()
        .unwrap_err();
        assert!(err.details.contains_key("amount"));
    }

    #[test]
    fn plan_payment_owes_a_renewal_of_the_plan_duration() {
        let renewal = payment(d(2024, 1, 15)).renewal(Some(&plan(30))).unwrap();
        assert_eq!(
            renewal,
            Renewal {
                duration_days: 30,
                payment_date: d(2024, 1, 15)
            }
        );
    }

    #[test]
    fn renewal_extends_the_current_window() {
        let renewal = payment(d(2024, 1, 15)).renewal(Some(&plan(30))).unwrap();
        let window = MembershipWindow::new(Some(d(2024, 1, 1)), Some(d(2024, 1, 31)));
        assert_eq!(
            renewal.apply(&window),
            MembershipWindow::new(Some(d(2024, 1, 1)), Some(d(2024, 3, 1)))
        );
    }

    #[test]
    fn payment_without_plan_owes_nothing() {
        assert!(payment(d(2024, 1, 1)).renewal(None).is_none());
    }
}
