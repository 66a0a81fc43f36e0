use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, PlanId, TrainerId, WorkoutPlanId};
use crate::domain::membership::{MembershipPlan, PlanDetails};
use crate::domain::training::{Trainer, TrainerDetails, WorkoutPlan, WorkoutPlanDetails};
use crate::ports::{PlanRepository, TrainerRepository, WorkoutPlanRepository};

use super::InMemoryStore;

#[async_trait]
impl PlanRepository for InMemoryStore {
    async fn insert(&self, details: PlanDetails) -> Result<MembershipPlan, DomainError> {
        let mut t = self.tables.write().await;
        let plan = MembershipPlan::from_details(PlanId::new(t.next_id()), details);
        t.plans.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn update(&self, plan: &MembershipPlan) -> Result<(), DomainError> {
        let mut t = self.tables.write().await;
        let slot = t
            .plans
            .get_mut(&plan.id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::PlanNotFound, "Plan", plan.id))?;
        *slot = plan.clone();
        Ok(())
    }

    async fn delete(&self, id: PlanId) -> Result<(), DomainError> {
        let mut t = self.tables.write().await;
        if !t.plans.contains_key(&id) {
            return Err(DomainError::not_found(ErrorCode::PlanNotFound, "Plan", id));
        }
        if t.members.values().any(|m| m.plan_id == Some(id)) {
            return Err(DomainError::in_use(
                "Cannot delete plan: Members are currently assigned to it.",
            ));
        }
        t.plans.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: PlanId) -> Result<Option<MembershipPlan>, DomainError> {
        Ok(self.tables.read().await.plans.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<MembershipPlan>, DomainError> {
        let mut plans: Vec<_> = self.tables.read().await.plans.values().cloned().collect();
        plans.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(plans)
    }
}

#[async_trait]
impl TrainerRepository for InMemoryStore {
    async fn insert(&self, details: TrainerDetails) -> Result<Trainer, DomainError> {
        let mut t = self.tables.write().await;
        let trainer = Trainer::from_details(TrainerId::new(t.next_id()), details);
        t.trainers.insert(trainer.id, trainer.clone());
        Ok(trainer)
    }

    async fn update(&self, trainer: &Trainer) -> Result<(), DomainError> {
        let mut t = self.tables.write().await;
        let slot = t.trainers.get_mut(&trainer.id).ok_or_else(|| {
            DomainError::not_found(ErrorCode::TrainerNotFound, "Trainer", trainer.id)
        })?;
        *slot = trainer.clone();
        Ok(())
    }

    async fn delete(&self, id: TrainerId) -> Result<(), DomainError> {
        let mut t = self.tables.write().await;
        if !t.trainers.contains_key(&id) {
            return Err(DomainError::not_found(ErrorCode::TrainerNotFound, "Trainer", id));
        }
        if t.members.values().any(|m| m.trainer_id == Some(id)) {
            return Err(DomainError::in_use(
                "Cannot delete trainer: Members are currently assigned to them.",
            ));
        }
        t.trainers.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: TrainerId) -> Result<Option<Trainer>, DomainError> {
        Ok(self.tables.read().await.trainers.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Trainer>, DomainError> {
        let mut trainers: Vec<_> = self.tables.read().await.trainers.values().cloned().collect();
        trainers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(trainers)
    }
}

#[async_trait]
impl WorkoutPlanRepository for InMemoryStore {
    async fn insert(&self, details: WorkoutPlanDetails) -> Result<WorkoutPlan, DomainError> {
        let mut t = self.tables.write().await;
        let plan = WorkoutPlan::from_details(WorkoutPlanId::new(t.next_id()), details);
        t.workout_plans.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn update(&self, plan: &WorkoutPlan) -> Result<(), DomainError> {
        let mut t = self.tables.write().await;
        let slot = t.workout_plans.get_mut(&plan.id).ok_or_else(|| {
            DomainError::not_found(ErrorCode::WorkoutPlanNotFound, "Workout plan", plan.id)
        })?;
        *slot = plan.clone();
        Ok(())
    }

    async fn delete(&self, id: WorkoutPlanId) -> Result<(), DomainError> {
        let mut t = self.tables.write().await;
        if !t.workout_plans.contains_key(&id) {
            return Err(DomainError::not_found(
                ErrorCode::WorkoutPlanNotFound,
                "Workout plan",
                id,
            ));
        }
        if t.members.values().any(|m| m.workout_plan_id == Some(id)) {
            return Err(DomainError::in_use(
                "Cannot delete workout plan: Members are currently assigned to it.",
            ));
        }
        t.workout_plans.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: WorkoutPlanId) -> Result<Option<WorkoutPlan>, DomainError> {
        Ok(self.tables.read().await.workout_plans.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<WorkoutPlan>, DomainError> {
        let mut plans: Vec<_> = self.tables.read().await.workout_plans.values().cloned().collect();
        plans.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(plans)
    }
}
