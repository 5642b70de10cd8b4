use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Course enquiry / enrollment form submitted from the public site and worked
/// through an admin pipeline.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_forms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub course_id: i64,
    pub status: FormStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Workflow: pending → verified → assigned → ongoing → completed → paid.
/// `rejected` is reachable from any non-terminal state.
#[derive(
    Debug, Clone, Copy, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "form_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FormStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "verified")]
    Verified,

    #[sea_orm(string_value = "assigned")]
    Assigned,

    #[sea_orm(string_value = "ongoing")]
    Ongoing,

    #[sea_orm(string_value = "completed")]
    Completed,

    #[sea_orm(string_value = "paid")]
    Paid,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl FormStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, FormStatus::Paid | FormStatus::Rejected)
    }

    /// Whether the workflow allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: FormStatus) -> bool {
        use FormStatus::*;
        if self == next {
            return false;
        }
        if next == Rejected {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Pending, Verified)
                | (Verified, Assigned)
                | (Assigned, Ongoing)
                | (Ongoing, Completed)
                | (Completed, Paid)
        )
    }
}

#[derive(Debug, Error)]
pub enum CourseFormError {
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition { from: FormStatus, to: FormStatus },

    #[error(transparent)]
    Db(#[from] DbErr),
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        name: &str,
        email: &str,
        mobile: &str,
        course_id: i64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_lowercase()),
            mobile: Set(mobile.to_owned()),
            course_id: Set(course_id),
            status: Set(FormStatus::Pending),
            admin_notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// Moves the form along the workflow, optionally replacing the admin
    /// notes. Rejects transitions the workflow does not allow.
    pub async fn transition(
        &self,
        db: &DatabaseConnection,
        next: FormStatus,
        admin_notes: Option<&str>,
    ) -> Result<Model, CourseFormError> {
        if !self.status.can_transition_to(next) {
            return Err(CourseFormError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        let mut active: ActiveModel = self.clone().into();
        active.status = Set(next);
        if let Some(notes) = admin_notes {
            active.admin_notes = Set(Some(notes.to_owned()));
        }
        active.updated_at = Set(Utc::now());
        Ok(active.update(db).await?)
    }
}
