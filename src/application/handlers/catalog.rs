//! Catalog maintenance: membership plans, trainers and workout plans.

use std::sync::Arc;

use crate::domain::foundation::{
    DomainError, ErrorCode, FieldErrors, PlanId, TrainerId, ValidationError, WorkoutPlanId,
};
use crate::domain::membership::{MemberDetails, MembershipPlan, PlanDetails};
use crate::domain::training::{Trainer, TrainerDetails, WorkoutPlan, WorkoutPlanDetails};
use crate::ports::{PlanRepository, TrainerRepository, WorkoutPlanRepository};

/// The three catalog repositories, bundled for handlers that resolve a
/// member's assignments.
#[derive(Clone)]
pub struct CatalogPorts {
    pub plans: Arc<dyn PlanRepository>,
    pub trainers: Arc<dyn TrainerRepository>,
    pub workout_plans: Arc<dyn WorkoutPlanRepository>,
}

impl CatalogPorts {
    pub fn new(
        plans: Arc<dyn PlanRepository>,
        trainers: Arc<dyn TrainerRepository>,
        workout_plans: Arc<dyn WorkoutPlanRepository>,
    ) -> Self {
        Self {
            plans,
            trainers,
            workout_plans,
        }
    }

    /// Every selected plan, trainer and workout plan must exist.
    pub async fn check_assignments(&self, details: &MemberDetails) -> Result<(), DomainError> {
        let mut errors = FieldErrors::new();
        if let Some(id) = details.plan_id {
            if self.plans.find_by_id(id).await?.is_none() {
                errors.push(not_a_choice("membership_plan_id"));
            }
        }
        if let Some(id) = details.trainer_id {
            if self.trainers.find_by_id(id).await?.is_none() {
                errors.push(not_a_choice("trainer_id"));
            }
        }
        if let Some(id) = details.workout_plan_id {
            if self.workout_plans.find_by_id(id).await?.is_none() {
                errors.push(not_a_choice("workout_plan_id"));
            }
        }
        errors.finish()
    }
}

pub(super) fn not_a_choice(field: &str) -> ValidationError {
    ValidationError::invalid(field, "Not a valid choice")
}

fn logged_in_use(err: DomainError, what: &str, id: i64) -> DomainError {
    if err.code == ErrorCode::ResourceInUse {
        tracing::warn!(id, "Refused to delete {} still assigned to members", what);
    }
    err
}

/// Adds, edits and deletes membership plans.
pub struct PlanCatalogHandler {
    plans: Arc<dyn PlanRepository>,
}

impl PlanCatalogHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn add(&self, details: PlanDetails) -> Result<MembershipPlan, DomainError> {
        let plan = self.plans.insert(details.validated()?).await?;
        tracing::info!(plan_id = %plan.id, name = %plan.name, "Membership plan added");
        Ok(plan)
    }

    pub async fn edit(&self, id: PlanId, details: PlanDetails) -> Result<MembershipPlan, DomainError> {
        let details = details.validated()?;
        let mut plan = self
            .plans
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::PlanNotFound, "Plan", id))?;
        plan.apply(details);
        self.plans.update(&plan).await?;
        tracing::info!(plan_id = %id, "Membership plan updated");
        Ok(plan)
    }

    /// # Errors
    ///
    /// - `PlanNotFound` if the plan doesn't exist
    /// - `ResourceInUse` if members are assigned to it; nothing changes
    pub async fn delete(&self, id: PlanId) -> Result<(), DomainError> {
        self.plans
            .delete(id)
            .await
            .map_err(|e| logged_in_use(e, "plan", id.value()))?;
        tracing::info!(plan_id = %id, "Membership plan deleted");
        Ok(())
    }
}

/// Adds, edits and deletes trainers.
pub struct TrainerCatalogHandler {
    trainers: Arc<dyn TrainerRepository>,
}

impl TrainerCatalogHandler {
    pub fn new(trainers: Arc<dyn TrainerRepository>) -> Self {
        Self { trainers }
    }

    pub async fn add(&self, details: TrainerDetails) -> Result<Trainer, DomainError> {
        let trainer = self.trainers.insert(details.validated()?).await?;
        tracing::info!(trainer_id = %trainer.id, "Trainer added");
        Ok(trainer)
    }

    pub async fn edit(&self, id: TrainerId, details: TrainerDetails) -> Result<Trainer, DomainError> {
        let details = details.validated()?;
        let mut trainer = self
            .trainers
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::TrainerNotFound, "Trainer", id))?;
        trainer.apply(details);
        self.trainers.update(&trainer).await?;
        tracing::info!(trainer_id = %id, "Trainer updated");
        Ok(trainer)
    }

    pub async fn delete(&self, id: TrainerId) -> Result<(), DomainError> {
        self.trainers
            .delete(id)
            .await
            .map_err(|e| logged_in_use(e, "trainer", id.value()))?;
        tracing::info!(trainer_id = %id, "Trainer deleted");
        Ok(())
    }
}

/// Adds, edits and deletes workout plans.
pub struct WorkoutPlanCatalogHandler {
    workout_plans: Arc<dyn WorkoutPlanRepository>,
}

impl WorkoutPlanCatalogHandler {
    pub fn new(workout_plans: Arc<dyn WorkoutPlanRepository>) -> Self {
        Self { workout_plans }
    }

    pub async fn add(&self, details: WorkoutPlanDetails) -> Result<WorkoutPlan, DomainError> {
        let plan = self.workout_plans.insert(details.validated()?).await?;
        tracing::info!(workout_plan_id = %plan.id, "Workout plan added");
        Ok(plan)
    }

    pub async fn edit(
        &self,
        id: WorkoutPlanId,
        details: WorkoutPlanDetails,
    ) -> Result<WorkoutPlan, DomainError> {
        let details = details.validated()?;
        let mut plan = self.workout_plans.find_by_id(id).await?.ok_or_else(|| {
            DomainError::not_found(ErrorCode::WorkoutPlanNotFound, "Workout plan", id)
        })?;
        plan.apply(details);
        self.workout_plans.update(&plan).await?;
        tracing::info!(workout_plan_id = %id, "Workout plan updated");
        Ok(plan)
    }

    pub async fn delete(&self, id: WorkoutPlanId) -> Result<(), DomainError> {
        self.workout_plans
            .delete(id)
            .await
            .map_err(|e| logged_in_use(e, "workout plan", id.value()))?;
        tracing::info!(workout_plan_id = %id, "Workout plan deleted");
        Ok(())
    }
}
