use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608150004_create_job_postings"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("job_postings"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("title")).string().not_null())
                    .col(ColumnDef::new(Alias::new("company_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("job_link")).string().null())
                    .col(ColumnDef::new(Alias::new("job_type")).string().not_null())
                    .col(ColumnDef::new(Alias::new("salary")).double().null())
                    .col(ColumnDef::new(Alias::new("application_deadline")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("status")).string().not_null().default("active"))
                    .col(ColumnDef::new(Alias::new("deleted_at")).timestamp().null())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("job_postings")).to_owned())
            .await
    }
}
