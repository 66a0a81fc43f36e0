//! Member handlers: add, edit, delete, view and plain-text export.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{Actor, DomainError, ErrorCode, MemberId};
use crate::domain::membership::{Member, MemberDetails, MemberExport, MembershipPlan, NewMember};
use crate::domain::training::{Trainer, WorkoutPlan};
use crate::ports::MemberRepository;

use super::CatalogPorts;

fn member_not_found(id: MemberId) -> DomainError {
    DomainError::not_found(ErrorCode::MemberNotFound, "Member", id)
}

/// Command to add a member without a login account.
#[derive(Debug, Clone)]
pub struct AddMemberCommand {
    pub details: MemberDetails,
    pub today: NaiveDate,
}

pub struct AddMemberHandler {
    members: Arc<dyn MemberRepository>,
    catalog: CatalogPorts,
}

impl AddMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>, catalog: CatalogPorts) -> Self {
        Self { members, catalog }
    }

    pub async fn handle(&self, cmd: AddMemberCommand) -> Result<Member, DomainError> {
        let details = cmd.details.validated()?;
        self.catalog.check_assignments(&details).await?;

        let member = self.members.insert(NewMember::joining(details, cmd.today)).await?;
        tracing::info!(member_id = %member.id, "Member added");
        Ok(member)
    }
}

/// Command to overwrite a member's editable fields.
#[derive(Debug, Clone)]
pub struct EditMemberCommand {
    pub member_id: MemberId,
    pub details: MemberDetails,
}

pub struct EditMemberHandler {
    members: Arc<dyn MemberRepository>,
    catalog: CatalogPorts,
}

impl EditMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>, catalog: CatalogPorts) -> Self {
        Self { members, catalog }
    }

    pub async fn handle(&self, cmd: EditMemberCommand) -> Result<Member, DomainError> {
        let mut member = self
            .members
            .find_by_id(cmd.member_id)
            .await?
            .ok_or_else(|| member_not_found(cmd.member_id))?;

        let details = cmd.details.validated()?;
        self.catalog.check_assignments(&details).await?;

        member.apply(details);
        self.members.update(&member).await?;
        tracing::info!(member_id = %member.id, "Member updated");
        Ok(member)
    }
}

/// Deletes a member along with their payments and attendance.
pub struct DeleteMemberHandler {
    members: Arc<dyn MemberRepository>,
}

impl DeleteMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self, member_id: MemberId) -> Result<(), DomainError> {
        self.members.delete(member_id).await?;
        tracing::info!(member_id = %member_id, "Member deleted");
        Ok(())
    }
}

/// A member with the catalog entries assigned to them resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberView {
    pub member: Member,
    pub plan: Option<MembershipPlan>,
    pub trainer: Option<Trainer>,
    pub workout_plan: Option<WorkoutPlan>,
    pub membership_active: bool,
}

impl MemberView {
    pub fn export(&self) -> MemberExport<'_> {
        MemberExport {
            member: &self.member,
            plan: self.plan.as_ref(),
            trainer: self.trainer.as_ref(),
            workout_plan: self.workout_plan.as_ref(),
        }
    }
}

async fn load_view(
    members: &dyn MemberRepository,
    catalog: &CatalogPorts,
    member_id: MemberId,
    today: NaiveDate,
) -> Result<MemberView, DomainError> {
    let member = members
        .find_by_id(member_id)
        .await?
        .ok_or_else(|| member_not_found(member_id))?;

    let plan = match member.plan_id {
        Some(id) => catalog.plans.find_by_id(id).await?,
        None => None,
    };
    let trainer = match member.trainer_id {
        Some(id) => catalog.trainers.find_by_id(id).await?,
        None => None,
    };
    let workout_plan = match member.workout_plan_id {
        Some(id) => catalog.workout_plans.find_by_id(id).await?,
        None => None,
    };

    Ok(MemberView {
        membership_active: member.is_membership_active(today),
        member,
        plan,
        trainer,
        workout_plan,
    })
}

/// Shows one member. Subscription users may only see their own record.
pub struct GetMemberHandler {
    members: Arc<dyn MemberRepository>,
    catalog: CatalogPorts,
}

impl GetMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>, catalog: CatalogPorts) -> Self {
        Self { members, catalog }
    }

    pub async fn handle(
        &self,
        actor: &Actor,
        member_id: MemberId,
        today: NaiveDate,
    ) -> Result<MemberView, DomainError> {
        if !actor.can_view_member(member_id) {
            tracing::warn!(user_id = %actor.user_id, member_id = %member_id, "Member view denied");
            return Err(DomainError::forbidden(
                "Access denied. You can only view your own member record.",
            ));
        }
        load_view(self.members.as_ref(), &self.catalog, member_id, today).await
    }
}

/// A rendered member export ready to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFile {
    pub filename: String,
    pub body: String,
}

pub struct ExportMemberHandler {
    members: Arc<dyn MemberRepository>,
    catalog: CatalogPorts,
}

impl ExportMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>, catalog: CatalogPorts) -> Self {
        Self { members, catalog }
    }

    pub async fn handle(&self, member_id: MemberId, today: NaiveDate) -> Result<MemberFile, DomainError> {
        let view = load_view(self.members.as_ref(), &self.catalog, member_id, today).await?;
        let export = view.export();
        Ok(MemberFile {
            filename: export.filename(),
            body: export.render(),
        })
    }
}
