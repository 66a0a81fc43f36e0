//! Administrator goal management across all users.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, GoalId, Timestamp, UserId};
use crate::domain::goal::{chart_series, Goal, GoalAssignment, GoalChart, NewGoal};
use crate::domain::user::UserSummary;
use crate::ports::{GoalRepository, UserRepository};

use super::goals::load_goal;

/// Goals for the admin view, with the user picker and charts labelled by owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminGoalListing {
    pub goals: Vec<Goal>,
    pub charts: Vec<GoalChart>,
    pub users: Vec<UserSummary>,
    pub selected_user_id: Option<UserId>,
}

pub struct AdminListGoalsHandler {
    goals: Arc<dyn GoalRepository>,
    users: Arc<dyn UserRepository>,
}

impl AdminListGoalsHandler {
    pub fn new(goals: Arc<dyn GoalRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { goals, users }
    }

    pub async fn handle(&self, user_id: Option<UserId>) -> Result<AdminGoalListing, DomainError> {
        let users: Vec<UserSummary> = self
            .users
            .list()
            .await?
            .iter()
            .map(|u| u.summary())
            .collect();
        let goals = self.goals.list(user_id).await?;

        let names: HashMap<UserId, &str> =
            users.iter().map(|u| (u.id, u.username.as_str())).collect();
        let charts = chart_series(&goals, |g| {
            let owner = names.get(&g.user_id).copied().unwrap_or("unknown");
            format!("{}: {}", owner, g.description)
        });

        Ok(AdminGoalListing {
            goals,
            charts,
            users,
            selected_user_id: user_id,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AdminAddGoalCommand {
    pub assignment: GoalAssignment,
    pub now: Timestamp,
}

/// Creates a goal for any user, with the flags the administrator chose.
pub struct AdminAddGoalHandler {
    goals: Arc<dyn GoalRepository>,
}

impl AdminAddGoalHandler {
    pub fn new(goals: Arc<dyn GoalRepository>) -> Self {
        Self { goals }
    }

    pub async fn handle(&self, cmd: AdminAddGoalCommand) -> Result<Goal, DomainError> {
        let assignment = cmd.assignment.validated()?;
        let goal = self.goals.insert(NewGoal::assigned(assignment, cmd.now)).await?;
        tracing::info!(
            goal_id = %goal.id,
            user_id = %goal.user_id,
            admin_set = goal.is_admin_set,
            "Goal assigned"
        );
        Ok(goal)
    }
}

#[derive(Debug, Clone)]
pub struct AdminEditGoalCommand {
    pub goal_id: GoalId,
    pub assignment: GoalAssignment,
    pub now: Timestamp,
}

pub struct AdminEditGoalHandler {
    goals: Arc<dyn GoalRepository>,
}

impl AdminEditGoalHandler {
    pub fn new(goals: Arc<dyn GoalRepository>) -> Self {
        Self { goals }
    }

    pub async fn handle(&self, cmd: AdminEditGoalCommand) -> Result<Goal, DomainError> {
        let mut goal = load_goal(self.goals.as_ref(), cmd.goal_id).await?;
        goal.apply_admin(cmd.assignment.validated()?, cmd.now);
        self.goals.update(&goal).await?;
        tracing::info!(goal_id = %goal.id, "Goal updated by administrator");
        Ok(goal)
    }
}

pub struct AdminDeleteGoalHandler {
    goals: Arc<dyn GoalRepository>,
}

impl AdminDeleteGoalHandler {
    pub fn new(goals: Arc<dyn GoalRepository>) -> Self {
        Self { goals }
    }

    pub async fn handle(&self, goal_id: GoalId) -> Result<(), DomainError> {
        self.goals.delete(goal_id).await?;
        tracing::info!(goal_id = %goal_id, "Goal deleted by administrator");
        Ok(())
    }
}
