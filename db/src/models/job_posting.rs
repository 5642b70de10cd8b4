use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Job-fair posting. Soft-deleted via `deleted_at`; deleted rows never appear
/// in list responses.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_postings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub company_name: String,
    pub job_link: Option<String>,
    pub job_type: JobType,
    pub salary: Option<f64>,
    pub application_deadline: DateTime<Utc>,
    pub status: PostingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "job_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum JobType {
    #[sea_orm(string_value = "full_time")]
    FullTime,

    #[sea_orm(string_value = "part_time")]
    PartTime,

    #[sea_orm(string_value = "internship")]
    Internship,

    #[sea_orm(string_value = "contract")]
    Contract,
}

#[derive(
    Debug, Clone, Copy, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "posting_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PostingStatus {
    #[sea_orm(string_value = "active")]
    Active,

    #[sea_orm(string_value = "closed")]
    Closed,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        title: &str,
        company_name: &str,
        job_link: Option<&str>,
        job_type: JobType,
        salary: Option<f64>,
        application_deadline: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            title: Set(title.to_owned()),
            company_name: Set(company_name.to_owned()),
            job_link: Set(job_link.map(str::to_owned)),
            job_type: Set(job_type),
            salary: Set(salary),
            application_deadline: Set(application_deadline),
            status: Set(PostingStatus::Active),
            deleted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// Finds a posting that has not been soft-deleted.
    pub async fn find_live(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(db)
            .await
    }

    /// Flips `active` <-> `closed`. Two toggles restore the original status.
    pub async fn toggle_status(&self, db: &DatabaseConnection) -> Result<Model, DbErr> {
        let next = match self.status {
            PostingStatus::Active => PostingStatus::Closed,
            PostingStatus::Closed => PostingStatus::Active,
        };
        let mut active: ActiveModel = self.clone().into();
        active.status = Set(next);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn soft_delete(&self, db: &DatabaseConnection) -> Result<Model, DbErr> {
        let mut active: ActiveModel = self.clone().into();
        active.deleted_at = Set(Some(Utc::now()));
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }
}
