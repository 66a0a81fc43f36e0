//! Inquiries submitted through the public contact form.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::text;
use crate::domain::foundation::{DomainError, FieldErrors, InquiryId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub submitted_at: Timestamp,
}

impl Inquiry {
    pub fn from_new(id: InquiryId, new: NewInquiry) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            message: new.message,
            submitted_at: new.submitted_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub submitted_at: Timestamp,
}

impl NewInquiry {
    pub fn validated(self) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();
        let name = errors.check(text::required("name", &self.name, 100));
        let email = errors.check(text::email("email", &self.email));
        let phone = errors.check(text::optional("phone", self.phone.as_deref(), 20));
        let message = errors.check(text::required("message", &self.message, 5000));
        errors.finish()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone: phone.flatten(),
            message: message.unwrap_or_default(),
            submitted_at: self.submitted_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_and_email_are_checked() {
        let err = NewInquiry {
            name: "Visitor".to_string(),
            email: "not-an-email".to_string(),
            phone: None,
            message: "  ".to_string(),
            submitted_at: Timestamp::now(),
        }
        .validated()
        .unwrap_err();

        assert!(err.details.contains_key("email"));
        assert!(err.details.contains_key("message"));
        assert!(!err.details.contains_key("name"));
    }
}
