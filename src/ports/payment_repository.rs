//! Payment repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::membership::{NewPayment, Payment, Renewal};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Store a payment and, when given, apply `renewal` to the member's
    /// window in the same transaction.
    ///
    /// The renewal is computed from the window as it stands inside that
    /// transaction, with the member row locked, and only the window columns
    /// are written. Concurrent payments for one member each extend it.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member no longer exists
    /// - `DatabaseError` on persistence failure; nothing is stored
    async fn record(
        &self,
        payment: NewPayment,
        renewal: Option<Renewal>,
    ) -> Result<Payment, DomainError>;

    /// All payments, newest payment date first.
    async fn list(&self) -> Result<Vec<Payment>, DomainError>;

    /// One member's payments, newest payment date first.
    async fn list_for_member(&self, member_id: MemberId) -> Result<Vec<Payment>, DomainError>;
}
