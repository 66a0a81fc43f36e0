//! Catalog repository ports: membership plans, trainers and workout plans.
//!
//! The three catalogs share one shape. Deleting an entry still assigned to a
//! member is refused by the application layer, and implementations backed by
//! a database also refuse it through foreign keys (`ResourceInUse`).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PlanId, TrainerId, WorkoutPlanId};
use crate::domain::membership::{MembershipPlan, PlanDetails};
use crate::domain::training::{Trainer, TrainerDetails, WorkoutPlan, WorkoutPlanDetails};

#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn insert(&self, details: PlanDetails) -> Result<MembershipPlan, DomainError>;

    /// # Errors
    ///
    /// - `PlanNotFound` if the plan doesn't exist
    async fn update(&self, plan: &MembershipPlan) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `PlanNotFound` if the plan doesn't exist
    /// - `ResourceInUse` if a member still references it
    async fn delete(&self, id: PlanId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: PlanId) -> Result<Option<MembershipPlan>, DomainError>;

    /// Ordered by name, then id.
    async fn list(&self) -> Result<Vec<MembershipPlan>, DomainError>;
}

#[async_trait]
pub trait TrainerRepository: Send + Sync {
    async fn insert(&self, details: TrainerDetails) -> Result<Trainer, DomainError>;

    async fn update(&self, trainer: &Trainer) -> Result<(), DomainError>;

    async fn delete(&self, id: TrainerId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: TrainerId) -> Result<Option<Trainer>, DomainError>;

    async fn list(&self) -> Result<Vec<Trainer>, DomainError>;
}

#[async_trait]
pub trait WorkoutPlanRepository: Send + Sync {
    async fn insert(&self, details: WorkoutPlanDetails) -> Result<WorkoutPlan, DomainError>;

    async fn update(&self, plan: &WorkoutPlan) -> Result<(), DomainError>;

    async fn delete(&self, id: WorkoutPlanId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: WorkoutPlanId) -> Result<Option<WorkoutPlan>, DomainError>;

    async fn list(&self) -> Result<Vec<WorkoutPlan>, DomainError>;
}
