//! Default catalog entries for a fresh installation.

use serde::Serialize;

use crate::domain::foundation::{DomainError, Money};
use crate::domain::membership::PlanDetails;
use crate::domain::training::{TrainerDetails, WorkoutPlanDetails};

use super::CatalogPorts;

/// How many rows each catalog received. Zero means the table already had data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub plans: usize,
    pub trainers: usize,
    pub workout_plans: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.plans == 0 && self.trainers == 0 && self.workout_plans == 0
    }
}

fn default_plans() -> Result<Vec<PlanDetails>, DomainError> {
    Ok(vec![
        PlanDetails {
            name: "Monthly Basic".to_string(),
            duration_days: 30,
            price: Money::from_cents(3_000)?,
        },
        PlanDetails {
            name: "Yearly Premium".to_string(),
            duration_days: 365,
            price: Money::from_cents(30_000)?,
        },
    ])
}

fn default_trainers() -> Vec<TrainerDetails> {
    vec![
        TrainerDetails {
            name: "John Doe".to_string(),
            specialization: "Strength Training".to_string(),
            schedule: None,
        },
        TrainerDetails {
            name: "Jane Smith".to_string(),
            specialization: "Yoga".to_string(),
            schedule: None,
        },
    ]
}

fn default_workout_plans() -> Vec<WorkoutPlanDetails> {
    vec![
        WorkoutPlanDetails {
            name: "Beginner Full Body".to_string(),
            description: None,
            routines: Some("3 sets of 10 reps: Squats, Bench Press, Rows".to_string()),
        },
        WorkoutPlanDetails {
            name: "Advanced Cardio".to_string(),
            description: None,
            routines: Some("30 min HIIT, 15 min steady state".to_string()),
        },
    ]
}

/// Fills each empty catalog table with its defaults; tables that already
/// hold rows are left alone.
pub struct SeedCatalogHandler {
    catalog: CatalogPorts,
}

impl SeedCatalogHandler {
    pub fn new(catalog: CatalogPorts) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self) -> Result<SeedReport, DomainError> {
        let mut report = SeedReport::default();

        if self.catalog.plans.list().await?.is_empty() {
            for plan in default_plans()? {
                self.catalog.plans.insert(plan).await?;
                report.plans += 1;
            }
        }
        if self.catalog.trainers.list().await?.is_empty() {
            for trainer in default_trainers() {
                self.catalog.trainers.insert(trainer).await?;
                report.trainers += 1;
            }
        }
        if self.catalog.workout_plans.list().await?.is_empty() {
            for plan in default_workout_plans() {
                self.catalog.workout_plans.insert(plan).await?;
                report.workout_plans += 1;
            }
        }

        if report.is_empty() {
            tracing::debug!("Catalog already populated, nothing seeded");
        } else {
            tracing::info!(
                plans = report.plans,
                trainers = report.trainers,
                workout_plans = report.workout_plans,
                "Seeded default catalog"
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::ports::{PlanRepository, TrainerRepository};
    use std::sync::Arc;

    fn handler(store: &InMemoryStore) -> SeedCatalogHandler {
        let shared = Arc::new(store.clone());
        SeedCatalogHandler::new(CatalogPorts::new(shared.clone(), shared.clone(), shared))
    }

    #[tokio::test]
    async fn empty_store_gets_every_default() {
        let store = InMemoryStore::new();
        let report = handler(&store).handle().await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                plans: 2,
                trainers: 2,
                workout_plans: 2,
            }
        );
        let plans = PlanRepository::list(&store).await.unwrap();
        let yearly = plans.iter().find(|p| p.name == "Yearly Premium").unwrap();
        assert_eq!(yearly.duration_days, 365);
        assert_eq!(yearly.price.to_string(), "300.00");
    }

    #[tokio::test]
    async fn populated_tables_are_skipped() {
        let store = InMemoryStore::new();
        TrainerRepository::insert(
            &store,
            TrainerDetails {
                name: "Local Coach".to_string(),
                specialization: "Boxing".to_string(),
                schedule: None,
            },
        )
        .await
        .unwrap();

        let report = handler(&store).handle().await.unwrap();
        assert_eq!(report.trainers, 0);
        assert_eq!(report.plans, 2);

        assert!(handler(&store).handle().await.unwrap().is_empty());
    }
}
