use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A catalog course. Courses are never hard-deleted; removal means setting
/// `visibility` to `hidden`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub is_free: bool,
    pub visibility: Visibility,
    pub moderation_status: ModerationStatus,
    pub is_published: bool,
    pub is_featured: bool,
    /// Free-form tag list, stored as a JSON array of strings.
    pub tags: Json,
    pub thumbnail_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "visibility")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Visibility {
    #[sea_orm(string_value = "public")]
    Public,

    #[sea_orm(string_value = "hidden")]
    Hidden,
}

/// Editorial workflow state set by moderators.
#[derive(
    Debug, Clone, Copy, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "moderation_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModerationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "approved")]
    Approved,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::interview_question::Entity")]
    InterviewQuestion,

    #[sea_orm(has_many = "super::course_form::Entity")]
    CourseForm,

    #[sea_orm(has_many = "super::ebook::Entity")]
    Ebook,
}

impl Related<super::interview_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InterviewQuestion.def()
    }
}

impl Related<super::course_form::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseForm.def()
    }
}

impl Related<super::ebook::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ebook.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DatabaseConnection,
        title: &str,
        description: &str,
        category: &str,
        price: f64,
        is_free: bool,
        tags: Vec<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            title: Set(title.to_owned()),
            description: Set(description.to_owned()),
            category: Set(category.to_owned()),
            price: Set(if is_free { 0.0 } else { price }),
            is_free: Set(is_free),
            visibility: Set(Visibility::Public),
            moderation_status: Set(ModerationStatus::Pending),
            is_published: Set(false),
            is_featured: Set(false),
            tags: Set(serde_json::json!(tags)),
            thumbnail_path: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn set_moderation(
        &self,
        db: &DatabaseConnection,
        status: ModerationStatus,
    ) -> Result<Model, DbErr> {
        let mut active: ActiveModel = self.clone().into();
        active.moderation_status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn set_published(
        &self,
        db: &DatabaseConnection,
        published: bool,
    ) -> Result<Model, DbErr> {
        let mut active: ActiveModel = self.clone().into();
        active.is_published = Set(published);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn set_featured(
        &self,
        db: &DatabaseConnection,
        featured: bool,
    ) -> Result<Model, DbErr> {
        let mut active: ActiveModel = self.clone().into();
        active.is_featured = Set(featured);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// "Delete" a course: hide it from the public catalog. Idempotent.
    pub async fn hide(&self, db: &DatabaseConnection) -> Result<Model, DbErr> {
        if self.visibility == Visibility::Hidden {
            return Ok(self.clone());
        }
        let mut active: ActiveModel = self.clone().into();
        active.visibility = Set(Visibility::Hidden);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    pub async fn set_thumbnail_path(
        &self,
        db: &DatabaseConnection,
        path: &str,
    ) -> Result<Model, DbErr> {
        let mut active: ActiveModel = self.clone().into();
        active.thumbnail_path = Set(Some(path.to_owned()));
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }
}
