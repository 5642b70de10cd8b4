use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only salary history entry for a slip.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "salary_revisions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub salary_slip_id: i64,
    pub amount: f64,
    pub note: Option<String>,
    pub effective_from: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::salary_slip::Entity",
        from = "Column::SalarySlipId",
        to = "super::salary_slip::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SalarySlip,
}

impl Related<super::salary_slip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalarySlip.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        salary_slip_id: i64,
        amount: f64,
        note: Option<&str>,
        effective_from: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            salary_slip_id: Set(salary_slip_id),
            amount: Set(amount),
            note: Set(note.map(str::to_owned)),
            effective_from: Set(effective_from),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// History for one slip, newest first.
    pub async fn find_for_slip(
        db: &DatabaseConnection,
        salary_slip_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::SalarySlipId.eq(salary_slip_id))
            .order_by_desc(Column::EffectiveFrom)
            .all(db)
            .await
    }
}
