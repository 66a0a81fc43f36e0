//! Plain-text member export.

use chrono::NaiveDate;

use super::{Member, MembershipPlan};
use crate::domain::training::{Trainer, WorkoutPlan};

/// A member together with the names of everything assigned to them.
#[derive(Debug, Clone)]
pub struct MemberExport<'a> {
    pub member: &'a Member,
    pub plan: Option<&'a MembershipPlan>,
    pub trainer: Option<&'a Trainer>,
    pub workout_plan: Option<&'a WorkoutPlan>,
}

impl MemberExport<'_> {
    /// Download name for the export file.
    pub fn filename(&self) -> String {
        format!("member_{}_details.txt", self.member.id)
    }

    /// Renders one `Label: value` line per field.
    pub fn render(&self) -> String {
        let m = self.member;
        let mut out = String::new();
        line(&mut out, "Member ID", &m.id.to_string());
        line(&mut out, "Name", &m.name);
        line(&mut out, "Email", &m.email);
        line(&mut out, "Phone", &m.phone);
        line(&mut out, "Join Date", &date(Some(m.join_date)));

        match self.plan {
            Some(plan) => {
                line(&mut out, "Membership Plan", &plan.name);
                line(&mut out, "Membership Start Date", &date(m.window.start));
                line(&mut out, "Membership End Date", &date(m.window.end));
            }
            None => line(&mut out, "Membership Plan", "N/A"),
        }

        line(&mut out, "Trainer", self.trainer.map_or("N/A", |t| t.name.as_str()));
        line(
            &mut out,
            "Workout Plan",
            self.workout_plan.map_or("N/A", |w| w.name.as_str()),
        );
        out
    }
}

fn line(out: &mut String, label: &str, value: &str) {
    out.push_str(label);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

fn date(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| "N/A".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MemberId, Money, PlanId, TrainerId};
    use crate::domain::membership::{MemberDetails, MembershipWindow, NewMember, PlanDetails};
    use crate::domain::training::TrainerDetails;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn member(window: MembershipWindow) -> Member {
        Member::from_new(
            MemberId::new(7),
            NewMember::joining(
                MemberDetails {
                    name: "Ada Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                    phone: "555-0100".to_string(),
                    window,
                    plan_id: None,
                    trainer_id: None,
                    workout_plan_id: None,
                },
                d(2024, 1, 1),
            ),
        )
    }

    #[test]
    fn renders_member_without_assignments() {
        let m = member(MembershipWindow::EMPTY);
        let export = MemberExport {
            member: &m,
            plan: None,
            trainer: None,
            workout_plan: None,
        };

        assert_eq!(
            export.render(),
            "Member ID: 7\n\
             Name: Ada Lovelace\n\
             Email: ada@example.com\n\
             Phone: 555-0100\n\
             Join Date: 2024-01-01\n\
             Membership Plan: N/A\n\
             Trainer: N/A\n\
             Workout Plan: N/A\n"
        );
        assert_eq!(export.filename(), "member_7_details.txt");
    }

    #[test]
    fn renders_plan_window_and_trainer() {
        let m = member(MembershipWindow::new(Some(d(2024, 1, 1)), None));
        let plan = MembershipPlan::from_details(
            PlanId::new(1),
            PlanDetails {
                name: "Monthly Basic".to_string(),
                duration_days: 30,
                price: Money::from_cents(3000).unwrap(),
            },
        );
        let trainer = Trainer::from_details(
            TrainerId::new(2),
            TrainerDetails {
                name: "John Doe".to_string(),
                specialization: "Strength Training".to_string(),
                schedule: None,
            },
        );
        let export = MemberExport {
            member: &m,
            plan: Some(&plan),
            trainer: Some(&trainer),
            workout_plan: None,
        };
        let text = export.render();

        assert!(text.contains("Membership Plan: Monthly Basic\n"));
        assert!(text.contains("Membership Start Date: 2024-01-01\n"));
        assert!(text.contains("Membership End Date: N/A\n"));
        assert!(text.contains("Trainer: John Doe\n"));
        assert!(text.ends_with("Workout Plan: N/A\n"));
    }
}
