pub mod course;
pub mod course_form;
pub mod ebook;
pub mod interview_question;
pub mod job_posting;
pub mod password_reset_token;
pub mod salary_revision;
pub mod salary_slip;
pub mod user;
