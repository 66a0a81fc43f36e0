use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::inquiry::{Inquiry, NewInquiry};

#[async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn insert(&self, inquiry: NewInquiry) -> Result<Inquiry, DomainError>;

    /// Newest first.
    async fn list(&self) -> Result<Vec<Inquiry>, DomainError>;
}
