//! Public contact-form inquiries.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::inquiry::{Inquiry, NewInquiry};
use crate::ports::InquiryRepository;

pub struct SubmitInquiryHandler {
    inquiries: Arc<dyn InquiryRepository>,
}

impl SubmitInquiryHandler {
    pub fn new(inquiries: Arc<dyn InquiryRepository>) -> Self {
        Self { inquiries }
    }

    pub async fn handle(&self, inquiry: NewInquiry) -> Result<Inquiry, DomainError> {
        let inquiry = self.inquiries.insert(inquiry.validated()?).await?;
        tracing::info!(inquiry_id = %inquiry.id, "Inquiry received");
        Ok(inquiry)
    }
}

/// Lists inquiries for administrators, newest first.
pub struct ListInquiriesHandler {
    inquiries: Arc<dyn InquiryRepository>,
}

impl ListInquiriesHandler {
    pub fn new(inquiries: Arc<dyn InquiryRepository>) -> Self {
        Self { inquiries }
    }

    pub async fn handle(&self) -> Result<Vec<Inquiry>, DomainError> {
        self.inquiries.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::Timestamp;

    fn inquiry(name: &str, at: Timestamp) -> NewInquiry {
        NewInquiry {
            name: name.to_string(),
            email: "visitor@example.com".to_string(),
            phone: Some("  ".to_string()),
            message: "Do you offer day passes?".to_string(),
            submitted_at: at,
        }
    }

    #[tokio::test]
    async fn inquiries_are_listed_newest_first() {
        let store = Arc::new(InMemoryStore::new());
        let submit = SubmitInquiryHandler::new(store.clone());
        let now = Timestamp::now();
        submit.handle(inquiry("First", now)).await.unwrap();
        submit.handle(inquiry("Second", now.plus_minutes(1))).await.unwrap();

        let listed = ListInquiriesHandler::new(store).handle().await.unwrap();

        let names: Vec<_> = listed.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Second", "First"]);
        assert_eq!(listed[0].phone, None);
    }

    #[tokio::test]
    async fn invalid_inquiry_is_not_stored() {
        let store = Arc::new(InMemoryStore::new());
        let err = SubmitInquiryHandler::new(store.clone())
            .handle(NewInquiry {
                message: String::new(),
                ..inquiry("Visitor", Timestamp::now())
            })
            .await
            .unwrap_err();

        assert!(err.details.contains_key("message"));
        assert!(ListInquiriesHandler::new(store).handle().await.unwrap().is_empty());
    }
}
