use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::dashboard::DashboardCounts;
use crate::domain::foundation::DomainError;

/// Read-only port for dashboard aggregates.
#[async_trait]
pub trait DashboardReader: Send + Sync {
    /// Counts and revenue as of `today` (UTC calendar day).
    async fn counts(&self, today: NaiveDate) -> Result<DashboardCounts, DomainError>;
}
