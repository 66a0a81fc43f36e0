//! Trainers and workout plans that can be assigned to members.

mod trainer;
mod workout_plan;

pub use trainer::{Trainer, TrainerDetails};
pub use workout_plan::{WorkoutPlan, WorkoutPlanDetails};
