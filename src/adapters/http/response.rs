//! Redirect responses for successful form submissions.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::{Notice, NoticeLevel};

#[derive(Debug, Serialize)]
struct RedirectBody {
    redirect_to: String,
    notices: Vec<Notice>,
}

/// `303 See Other` to `location`, with the notices to show there in the body.
#[derive(Debug, Clone)]
pub struct SeeOther {
    location: String,
    notices: Vec<Notice>,
}

impl SeeOther {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            notices: Vec::new(),
        }
    }

    pub fn with(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    pub fn with_all(mut self, notices: impl IntoIterator<Item = Notice>) -> Self {
        self.notices.extend(notices);
        self
    }

    pub fn success(self, message: impl Into<String>) -> Self {
        self.with(Notice::success(message))
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn has_level(&self, level: NoticeLevel) -> bool {
        self.notices.iter().any(|n| n.level == level)
    }
}

impl IntoResponse for SeeOther {
    fn into_response(self) -> Response {
        (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, self.location.clone())],
            Json(RedirectBody {
                redirect_to: self.location,
                notices: self.notices,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn see_other_sets_location() {
        let response = SeeOther::to("/members").success("Member added successfully!").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/members");
    }

    #[test]
    fn notices_accumulate_in_order() {
        let redirect = SeeOther::to("/attendance")
            .with(Notice::warning("inactive"))
            .success("checked in");
        assert!(redirect.has_level(NoticeLevel::Warning));
        assert!(redirect.has_level(NoticeLevel::Success));
        assert!(!redirect.has_level(NoticeLevel::Info));
    }
}
