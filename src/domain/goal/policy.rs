//! Goal access policy.
//!
//! Administrators may do anything with any goal. A subscription member may
//! view the goals they own, and may change one only if they own it and it was
//! not set by an administrator.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::{Actor, DomainError, GoalId, Role, UserId};

use super::Goal;

/// Something an actor wants to do with a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalAction {
    View,
    Edit,
    Delete,
    UpdateProgress,
}

impl GoalAction {
    pub const ALL: [GoalAction; 4] = [
        GoalAction::View,
        GoalAction::Edit,
        GoalAction::Delete,
        GoalAction::UpdateProgress,
    ];

    pub fn is_mutating(&self) -> bool {
        !matches!(self, GoalAction::View)
    }

    fn phrase(&self) -> &'static str {
        match self {
            GoalAction::View => "view",
            GoalAction::Edit => "edit",
            GoalAction::Delete => "delete",
            GoalAction::UpdateProgress => "update progress for",
        }
    }
}

impl fmt::Display for GoalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

/// Decision on one (actor, goal, action) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalAccess {
    pub granted: bool,
    pub goal_id: GoalId,
    pub user_id: UserId,
    pub action: GoalAction,
    pub denial_reason: Option<String>,
}

impl GoalAccess {
    fn granted(actor: &Actor, goal: &Goal, action: GoalAction) -> Self {
        Self {
            granted: true,
            goal_id: goal.id,
            user_id: actor.user_id,
            action,
            denial_reason: None,
        }
    }

    fn denied(actor: &Actor, goal: &Goal, action: GoalAction, reason: String) -> Self {
        Self {
            granted: false,
            goal_id: goal.id,
            user_id: actor.user_id,
            action,
            denial_reason: Some(reason),
        }
    }

    /// Converts a denial into a `Forbidden` error.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.granted {
            return Ok(());
        }
        let reason = self
            .denial_reason
            .unwrap_or_else(|| "Access denied".to_string());
        Err(DomainError::forbidden(reason)
            .with_detail("goal_id", self.goal_id.to_string())
            .with_detail("action", self.action.phrase()))
    }
}

pub struct GoalAccessPolicy;

impl GoalAccessPolicy {
    pub fn can(actor: &Actor, goal: &Goal, action: GoalAction) -> GoalAccess {
        match actor.role {
            Role::Admin => GoalAccess::granted(actor, goal, action),
            Role::SubscriptionMember => {
                let owns = goal.user_id == actor.user_id;
                if !owns {
                    let reason = format!("Access denied. You can only {} your own goals.", action);
                    return GoalAccess::denied(actor, goal, action, reason);
                }
                if action.is_mutating() && goal.is_admin_set {
                    let reason = format!(
                        "Access denied. You can only {} your own non-admin-set goals.",
                        action
                    );
                    return GoalAccess::denied(actor, goal, action, reason);
                }
                GoalAccess::granted(actor, goal, action)
            }
        }
    }

    /// Shorthand for `can(..).into_result()`.
    pub fn authorize(actor: &Actor, goal: &Goal, action: GoalAction) -> Result<(), DomainError> {
        Self::can(actor, goal, action).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, Timestamp};
    use crate::domain::goal::{GoalCategory, GoalDetails, NewGoal};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn goal(owner: i64, admin_set: bool) -> Goal {
        let mut new = NewGoal::self_set(
            UserId::new(owner),
            GoalDetails {
                category: GoalCategory::Daily,
                description: "Push-ups".to_string(),
                target_value: 50.0,
                unit: "reps".to_string(),
                end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            },
            Timestamp::now(),
        );
        new.is_admin_set = admin_set;
        Goal::from_new(GoalId::new(10), new)
    }

    fn actor(id: i64, role: Role) -> Actor {
        Actor::new(UserId::new(id), "someone", role, None)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Scenarios
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn member_cannot_edit_admin_set_goal_they_own() {
        let access = GoalAccessPolicy::can(
            &actor(1, Role::SubscriptionMember),
            &goal(1, true),
            GoalAction::Edit,
        );
        assert!(!access.granted);
        assert_eq!(
            access.denial_reason.as_deref(),
            Some("Access denied. You can only edit your own non-admin-set goals.")
        );
    }

    #[test]
    fn member_can_view_admin_set_goal_they_own() {
        let access = GoalAccessPolicy::can(
            &actor(1, Role::SubscriptionMember),
            &goal(1, true),
            GoalAction::View,
        );
        assert!(access.granted);
    }

    #[test]
    fn member_cannot_view_someone_elses_goal() {
        let access = GoalAccessPolicy::can(
            &actor(2, Role::SubscriptionMember),
            &goal(1, false),
            GoalAction::View,
        );
        assert!(!access.granted);
    }

    #[test]
    fn member_can_update_progress_on_own_goal() {
        assert!(GoalAccessPolicy::authorize(
            &actor(1, Role::SubscriptionMember),
            &goal(1, false),
            GoalAction::UpdateProgress,
        )
        .is_ok());
    }

    #[test]
    fn denial_becomes_forbidden_error() {
        let err = GoalAccessPolicy::authorize(
            &actor(2, Role::SubscriptionMember),
            &goal(1, false),
            GoalAction::Delete,
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.details.get("goal_id"), Some(&"10".to_string()));
        assert_eq!(err.details.get("action"), Some(&"delete".to_string()));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Properties
    // ════════════════════════════════════════════════════════════════════════

    fn any_action() -> impl Strategy<Value = GoalAction> {
        prop::sample::select(GoalAction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn admin_is_always_granted(
            admin in 1i64..50,
            owner in 1i64..50,
            admin_set in any::<bool>(),
            action in any_action(),
        ) {
            let access = GoalAccessPolicy::can(&actor(admin, Role::Admin), &goal(owner, admin_set), action);
            prop_assert!(access.granted);
        }

        #[test]
        fn member_mutation_needs_own_self_set_goal(
            me in 1i64..50,
            owner in 1i64..50,
            admin_set in any::<bool>(),
            action in any_action(),
        ) {
            prop_assume!(action.is_mutating());
            let access = GoalAccessPolicy::can(
                &actor(me, Role::SubscriptionMember),
                &goal(owner, admin_set),
                action,
            );
            prop_assert_eq!(access.granted, me == owner && !admin_set);
        }

        #[test]
        fn member_view_needs_ownership_only(
            me in 1i64..50,
            owner in 1i64..50,
            admin_set in any::<bool>(),
        ) {
            let access = GoalAccessPolicy::can(
                &actor(me, Role::SubscriptionMember),
                &goal(owner, admin_set),
                GoalAction::View,
            );
            prop_assert_eq!(access.granted, me == owner);
        }
    }
}
