use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Payroll record for a staff member. The current salary lives here; raises
/// are appended to `salary_revisions`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "salary_slips")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub designation: String,
    pub department: String,
    pub salary: f64,
    pub bank_account_number: String,
    pub bank_name: String,
    pub bank_ifsc_code: String,
    /// Postal address as a JSON object (street/city/state/pincode).
    pub address: Json,
    pub status: EmploymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "employment_status")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EmploymentStatus {
    #[sea_orm(string_value = "active")]
    Active,

    #[sea_orm(string_value = "on_leave")]
    OnLeave,

    #[sea_orm(string_value = "resigned")]
    Resigned,

    #[sea_orm(string_value = "terminated")]
    Terminated,
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

    #[sea_orm(has_many = "super::salary_revision::Entity")]
    SalaryRevision,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::salary_revision::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalaryRevision.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i64,
        designation: &str,
        department: &str,
        salary: f64,
        bank_account_number: &str,
        bank_name: &str,
        bank_ifsc_code: &str,
        address: Json,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            user_id: Set(user_id),
            designation: Set(designation.to_owned()),
            department: Set(department.to_owned()),
            salary: Set(salary),
            bank_account_number: Set(bank_account_number.to_owned()),
            bank_name: Set(bank_name.to_owned()),
            bank_ifsc_code: Set(bank_ifsc_code.to_uppercase()),
            address: Set(address),
            status: Set(EmploymentStatus::Active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn set_status(
        &self,
        db: &DatabaseConnection,
        status: EmploymentStatus,
    ) -> Result<Model, DbErr> {
        let mut active: ActiveModel = self.clone().into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// Updates the current salary; callers append the matching revision row.
    pub async fn set_salary(&self, db: &DatabaseConnection, amount: f64) -> Result<Model, DbErr> {
        let mut active: ActiveModel = self.clone().into();
        active.salary = Set(amount);
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }
}
