//! Per-category chart series for goal listings.

use serde::Serialize;

use super::{Goal, GoalCategory};

/// Parallel label/current/target series for one goal category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalChart {
    #[serde(rename = "goal_type")]
    pub category: GoalCategory,
    pub labels: Vec<String>,
    pub current_values: Vec<f64>,
    pub target_values: Vec<f64>,
}

/// Builds one chart per category that has at least one goal, in
/// daily/weekly/monthly/yearly order, keeping the input order of goals.
pub fn chart_series<F>(goals: &[Goal], label: F) -> Vec<GoalChart>
where
    F: Fn(&Goal) -> String,
{
    GoalCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let in_category: Vec<&Goal> = goals.iter().filter(|g| g.category == category).collect();
            if in_category.is_empty() {
                return None;
            }
            Some(GoalChart {
                category,
                labels: in_category.iter().map(|&g| label(g)).collect(),
                current_values: in_category.iter().map(|g| g.current_value).collect(),
                target_values: in_category.iter().map(|g| g.target_value).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{GoalId, Timestamp, UserId};
    use crate::domain::goal::{GoalDetails, NewGoal};
    use chrono::NaiveDate;

    fn goal(id: i64, category: GoalCategory, description: &str, current: f64) -> Goal {
        let mut g = Goal::from_new(
            GoalId::new(id),
            NewGoal::self_set(
                UserId::new(1),
                GoalDetails {
                    category,
                    description: description.to_string(),
                    target_value: 10.0,
                    unit: "km".to_string(),
                    end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
                },
                Timestamp::now(),
            ),
        );
        g.current_value = current;
        g
    }

    #[test]
    fn empty_categories_are_skipped_and_order_is_fixed() {
        let goals = vec![
            goal(1, GoalCategory::Yearly, "Marathon", 1.0),
            goal(2, GoalCategory::Daily, "Stretch", 2.0),
        ];
        let charts = chart_series(&goals, |g| g.description.clone());

        let order: Vec<_> = charts.iter().map(|c| c.category).collect();
        assert_eq!(order, [GoalCategory::Daily, GoalCategory::Yearly]);
    }

    #[test]
    fn series_are_parallel_and_keep_goal_order() {
        let goals = vec![
            goal(1, GoalCategory::Weekly, "Run", 3.0),
            goal(2, GoalCategory::Weekly, "Swim", 4.0),
        ];
        let charts = chart_series(&goals, |g| format!("sam: {}", g.description));

        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].labels, ["sam: Run", "sam: Swim"]);
        assert_eq!(charts[0].current_values, [3.0, 4.0]);
        assert_eq!(charts[0].target_values, [10.0, 10.0]);
    }

    #[test]
    fn no_goals_no_charts() {
        assert!(chart_series(&[], |g| g.description.clone()).is_empty());
    }
}
