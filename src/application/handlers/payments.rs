//! Payment recording and listing.

use std::sync::Arc;

use crate::domain::foundation::{Actor, DomainError, Role};
use crate::domain::membership::{NewPayment, Payment};
use crate::ports::{MemberRepository, PaymentRepository, PlanRepository};

use super::catalog::not_a_choice;

/// Records a payment and, when it names a plan, extends the member's window.
pub struct RecordPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    members: Arc<dyn MemberRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl RecordPaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        members: Arc<dyn MemberRepository>,
        plans: Arc<dyn PlanRepository>,
    ) -> Self {
        Self {
            payments,
            members,
            plans,
        }
    }

    pub async fn handle(&self, payment: NewPayment) -> Result<Payment, DomainError> {
        let payment = payment.validated()?;

        if self.members.find_by_id(payment.member_id).await?.is_none() {
            return Err(DomainError::validation(
                "member_id",
                "Selected member does not exist.",
            ));
        }

        let plan = match payment.plan_id {
            Some(id) => Some(
                self.plans
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::from(not_a_choice("plan_id")))?,
            ),
            None => None,
        };

        let renewal = payment.renewal(plan.as_ref());
        let recorded = self.payments.record(payment, renewal).await?;

        tracing::info!(
            payment_id = %recorded.id,
            member_id = %recorded.member_id,
            amount = %recorded.amount,
            renewed = renewal.is_some(),
            "Payment recorded"
        );
        Ok(recorded)
    }
}

/// Lists payments: every payment for administrators, the linked member's
/// payments for subscription users.
pub struct ListPaymentsHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl ListPaymentsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, actor: &Actor) -> Result<Vec<Payment>, DomainError> {
        match (actor.role, actor.member_id) {
            (Role::Admin, _) => self.payments.list().await,
            (Role::SubscriptionMember, Some(member_id)) => {
                self.payments.list_for_member(member_id).await
            }
            (Role::SubscriptionMember, None) => Ok(Vec::new()),
        }
    }
}
