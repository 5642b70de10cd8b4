use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202608150001_create_users::Migration),
            Box::new(migrations::m202608150002_create_password_reset_tokens::Migration),
            Box::new(migrations::m202608150003_create_courses::Migration),
            Box::new(migrations::m202608150004_create_job_postings::Migration),
            Box::new(migrations::m202608150005_create_salary_slips::Migration),
            Box::new(migrations::m202608150006_create_salary_revisions::Migration),
            Box::new(migrations::m202608150007_create_interview_questions::Migration),
            Box::new(migrations::m202608150008_create_course_forms::Migration),
            Box::new(migrations::m202608150009_create_ebooks::Migration),
        ]
    }
}
