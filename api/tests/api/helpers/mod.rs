
pub use app::{make_test_app, multipart_body, read_json, test_user};
