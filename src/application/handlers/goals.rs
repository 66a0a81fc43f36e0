//! Self-service goal handlers.
//!
//! Every action on an existing goal goes through [`GoalAccessPolicy`] once,
//! whatever the actor's role.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{Actor, DomainError, ErrorCode, GoalId, Role, Timestamp};
use crate::domain::goal::{
    chart_series, Goal, GoalAccessPolicy, GoalAction, GoalChart, GoalDetails, NewGoal, Progress,
};
use crate::ports::GoalRepository;

pub(super) async fn load_goal(goals: &dyn GoalRepository, id: GoalId) -> Result<Goal, DomainError> {
    goals
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(ErrorCode::GoalNotFound, "Goal", id))
}

/// Loads a goal and checks `action` against the policy.
async fn authorized_goal(
    goals: &dyn GoalRepository,
    actor: &Actor,
    id: GoalId,
    action: GoalAction,
) -> Result<Goal, DomainError> {
    let goal = load_goal(goals, id).await?;
    let access = GoalAccessPolicy::can(actor, &goal, action);
    if !access.granted {
        tracing::warn!(
            user_id = %actor.user_id,
            goal_id = %id,
            action = ?action,
            "Goal access denied"
        );
    }
    access.into_result()?;
    Ok(goal)
}

/// Goals visible to an actor plus their chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalListing {
    pub goals: Vec<Goal>,
    pub charts: Vec<GoalChart>,
}

/// Lists goals: every goal for administrators, one's own otherwise.
pub struct ListGoalsHandler {
    goals: Arc<dyn GoalRepository>,
}

impl ListGoalsHandler {
    pub fn new(goals: Arc<dyn GoalRepository>) -> Self {
        Self { goals }
    }

    pub async fn handle(&self, actor: &Actor) -> Result<GoalListing, DomainError> {
        let owner = match actor.role {
            Role::Admin => None,
            Role::SubscriptionMember => Some(actor.user_id),
        };
        let goals = self.goals.list(owner).await?;
        let charts = chart_series(&goals, |g| g.description.clone());
        Ok(GoalListing { goals, charts })
    }
}

#[derive(Debug, Clone)]
pub struct AddGoalCommand {
    pub actor: Actor,
    pub details: GoalDetails,
    pub now: Timestamp,
}

/// Adds a goal owned by the actor. Self-set goals are never admin-set.
pub struct AddGoalHandler {
    goals: Arc<dyn GoalRepository>,
}

impl AddGoalHandler {
    pub fn new(goals: Arc<dyn GoalRepository>) -> Self {
        Self { goals }
    }

    pub async fn handle(&self, cmd: AddGoalCommand) -> Result<Goal, DomainError> {
        let details = cmd.details.validated()?;
        let goal = self
            .goals
            .insert(NewGoal::self_set(cmd.actor.user_id, details, cmd.now))
            .await?;
        tracing::info!(goal_id = %goal.id, user_id = %goal.user_id, "Goal added");
        Ok(goal)
    }
}

/// Loads a goal for its edit form; needs edit rights.
pub struct GetGoalHandler {
    goals: Arc<dyn GoalRepository>,
}

impl GetGoalHandler {
    pub fn new(goals: Arc<dyn GoalRepository>) -> Self {
        Self { goals }
    }

    pub async fn handle(&self, actor: &Actor, goal_id: GoalId) -> Result<Goal, DomainError> {
        authorized_goal(self.goals.as_ref(), actor, goal_id, GoalAction::Edit).await
    }
}

#[derive(Debug, Clone)]
pub struct EditGoalCommand {
    pub actor: Actor,
    pub goal_id: GoalId,
    pub details: GoalDetails,
    pub now: Timestamp,
}

pub struct EditGoalHandler {
    goals: Arc<dyn GoalRepository>,
}

impl EditGoalHandler {
    pub fn new(goals: Arc<dyn GoalRepository>) -> Self {
        Self { goals }
    }

    pub async fn handle(&self, cmd: EditGoalCommand) -> Result<Goal, DomainError> {
        let mut goal =
            authorized_goal(self.goals.as_ref(), &cmd.actor, cmd.goal_id, GoalAction::Edit).await?;
        goal.apply(cmd.details.validated()?, cmd.now);
        self.goals.update(&goal).await?;
        tracing::info!(goal_id = %goal.id, "Goal updated");
        Ok(goal)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteGoalCommand {
    pub actor: Actor,
    pub goal_id: GoalId,
}

pub struct DeleteGoalHandler {
    goals: Arc<dyn GoalRepository>,
}

impl DeleteGoalHandler {
    pub fn new(goals: Arc<dyn GoalRepository>) -> Self {
        Self { goals }
    }

    pub async fn handle(&self, cmd: DeleteGoalCommand) -> Result<(), DomainError> {
        authorized_goal(self.goals.as_ref(), &cmd.actor, cmd.goal_id, GoalAction::Delete).await?;
        self.goals.delete(cmd.goal_id).await?;
        tracing::info!(goal_id = %cmd.goal_id, "Goal deleted");
        Ok(())
    }
}

/// Command carrying the raw submitted progress value.
#[derive(Debug, Clone)]
pub struct UpdateProgressCommand {
    pub actor: Actor,
    pub goal_id: GoalId,
    pub progress: String,
    pub now: Timestamp,
}

pub struct UpdateProgressHandler {
    goals: Arc<dyn GoalRepository>,
}

impl UpdateProgressHandler {
    pub fn new(goals: Arc<dyn GoalRepository>) -> Self {
        Self { goals }
    }

    /// Access is checked before the value is parsed, so a denied actor
    /// always gets `Forbidden`.
    pub async fn handle(&self, cmd: UpdateProgressCommand) -> Result<Goal, DomainError> {
        let mut goal = authorized_goal(
            self.goals.as_ref(),
            &cmd.actor,
            cmd.goal_id,
            GoalAction::UpdateProgress,
        )
        .await?;

        let progress = Progress::parse(&cmd.progress)?;
        goal.record_progress(progress, cmd.now);
        self.goals.update(&goal).await?;
        tracing::info!(goal_id = %goal.id, progress = progress.value(), "Goal progress updated");
        Ok(goal)
    }
}
