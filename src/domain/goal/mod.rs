//! Fitness goals.
//!
//! # Module Structure
//!
//! - `category` - GoalCategory (daily, weekly, monthly, yearly)
//! - `record` - Goal and its drafts
//! - `policy` - GoalAccessPolicy deciding who may view or change a goal
//! - `chart` - Chart series grouped by category

mod category;
mod chart;
mod policy;
mod record;

pub use category::GoalCategory;
pub use chart::{chart_series, GoalChart};
pub use policy::{GoalAccess, GoalAccessPolicy, GoalAction};
pub use record::{Goal, GoalAssignment, GoalDetails, NewGoal, Progress};
