use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::inquiry::NewInquiry;

use super::super::accounts::UserInfo;
use super::super::form;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
    /// Present when the request carried a valid token.
    pub user: Option<UserInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl InquiryForm {
    pub fn into_new_inquiry(self, submitted_at: Timestamp) -> NewInquiry {
        NewInquiry {
            name: self.name,
            email: self.email,
            phone: form::optional_text(self.phone),
            message: self.message,
            submitted_at,
        }
    }
}
