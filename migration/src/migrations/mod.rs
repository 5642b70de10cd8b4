pub mod m202608150001_create_users;
pub mod m202608150002_create_password_reset_tokens;
pub mod m202608150003_create_courses;
pub mod m202608150004_create_job_postings;
pub mod m202608150005_create_salary_slips;
pub mod m202608150006_create_salary_revisions;
pub mod m202608150007_create_interview_questions;
pub mod m202608150008_create_course_forms;
pub mod m202608150009_create_ebooks;
