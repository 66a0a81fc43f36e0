use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::foundation::{DomainError, FieldErrors};
use crate::domain::membership::NewPayment;

use super::super::form;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
    pub member_id: String,
    pub amount: String,
    /// Blank means today.
    pub payment_date: String,
    pub plan_id: String,
}

impl PaymentForm {
    pub fn into_new_payment(self, today: NaiveDate) -> Result<NewPayment, DomainError> {
        let mut errors = FieldErrors::new();
        let member_id = form::required_choice(&mut errors, "member_id", &self.member_id);
        let amount = form::money(&mut errors, "amount", &self.amount);
        let payment_date = form::optional_date(&mut errors, "payment_date", &self.payment_date);
        let plan_id = form::choice(&mut errors, "plan_id", &self.plan_id);
        errors.finish()?;

        Ok(NewPayment {
            member_id: form::present(member_id, "member_id")?,
            amount: form::present(amount, "amount")?,
            payment_date: payment_date.unwrap_or(today),
            plan_id,
        })
    }
}
