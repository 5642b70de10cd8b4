use chrono::{DateTime, Duration, Utc};
use rand::{Rng, thread_rng};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One-time password issued for the forgot-password flow. Codes are 6-digit
/// numerics, single-use, and expire after a configurable window.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "password_reset_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    /// Set once the OTP has been checked; the reset endpoint only accepts
    /// verified codes.
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    fn generate_code() -> String {
        format!("{:06}", thread_rng().gen_range(0..1_000_000))
    }

    pub async fn create(
        db: &DatabaseConnection,
        user_id: i64,
        expiry_minutes: i64,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            user_id: Set(user_id),
            code: Set(Self::generate_code()),
            expires_at: Set(Utc::now() + Duration::minutes(expiry_minutes)),
            used: Set(false),
            verified: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// Finds an unexpired, unused code for the given user.
    pub async fn find_valid(
        db: &DatabaseConnection,
        user_id: i64,
        code: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Code.eq(code))
            .filter(Column::Used.eq(false))
            .filter(Column::ExpiresAt.gt(Utc::now()))
            .one(db)
            .await
    }

    /// Finds a verified, still-valid code for the final reset step.
    pub async fn find_verified(
        db: &DatabaseConnection,
        user_id: i64,
        code: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Code.eq(code))
            .filter(Column::Used.eq(false))
            .filter(Column::Verified.eq(true))
            .filter(Column::ExpiresAt.gt(Utc::now()))
            .one(db)
            .await
    }

    pub async fn mark_verified(&self, db: &DatabaseConnection) -> Result<Model, DbErr> {
        let mut active: ActiveModel = self.clone().into();
        active.verified = Set(true);
        active.update(db).await
    }

    pub async fn mark_used(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let mut active: ActiveModel = self.clone().into();
        active.used = Set(true);
        active.update(db).await?;
        Ok(())
    }

    /// Number of codes issued for `user_id` in the past hour; drives the
    /// issuance rate limit.
    pub async fn issued_in_last_hour(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CreatedAt.gt(Utc::now() - Duration::hours(1)))
            .count(db)
            .await
    }
}
