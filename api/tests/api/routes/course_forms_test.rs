#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, read_json, test_user};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::course::Model as Course;
    use sea_orm::DatabaseConnection;
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    fn post_public(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_req(method: &str, uri: &str, token: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_auth(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn course(db: &DatabaseConnection) -> Course {
        Course::create(db, "Fullstack", "d", "programming", 5000.0, false, vec![])
            .await
            .unwrap()
    }

    fn enquiry(course_id: i64) -> serde_json::Value {
        json!({
            "name": "Asha Kumar",
            "email": "Asha@Example.com",
            "mobile": "+919876543210",
            "course_id": course_id
        })
    }

    #[tokio::test]
    #[serial]
    async fn test_public_submission() {
        let (app, state, _storage) = make_test_app().await;
        let course = course(state.db()).await;

        let submitted = app
            .clone()
            .oneshot(post_public("/api/course-forms", &enquiry(course.id)))
            .await
            .unwrap();
        assert_eq!(submitted.status(), StatusCode::CREATED);
        let body = read_json(submitted).await;
        assert_eq!(body["data"]["status"], "pending");
        assert_eq!(body["data"]["email"], "asha@example.com");

        let bad_mobile = app
            .clone()
            .oneshot(post_public(
                "/api/course-forms",
                &json!({
                    "name": "Bad Mobile",
                    "email": "bad@example.com",
                    "mobile": "not-a-number",
                    "course_id": course.id
                }),
            ))
            .await
            .unwrap();
        assert_eq!(bad_mobile.status(), StatusCode::BAD_REQUEST);

        let missing_course = app
            .oneshot(post_public("/api/course-forms", &enquiry(999999)))
            .await
            .unwrap();
        assert_eq!(missing_course.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn test_admin_list_is_guarded_and_filterable() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_user, user_token) = test_user(db, "form_user", false).await;
        let (_admin, admin_token) = test_user(db, "form_admin", true).await;
        let course = course(db).await;

        app.clone()
            .oneshot(post_public("/api/course-forms", &enquiry(course.id)))
            .await
            .unwrap();

        let forbidden = app
            .clone()
            .oneshot(get_auth("/api/course-forms", &user_token))
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let pending = app
            .clone()
            .oneshot(get_auth("/api/course-forms?status=pending", &admin_token))
            .await
            .unwrap();
        let body = read_json(pending).await;
        assert_eq!(body["data"]["course_forms"].as_array().unwrap().len(), 1);

        let rejected = app
            .oneshot(get_auth("/api/course-forms?status=rejected", &admin_token))
            .await
            .unwrap();
        let body = read_json(rejected).await;
        assert!(body["data"]["course_forms"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_workflow_transitions() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "flow_admin", true).await;
        let course = course(db).await;

        let submitted = app
            .clone()
            .oneshot(post_public("/api/course-forms", &enquiry(course.id)))
            .await
            .unwrap();
        let body = read_json(submitted).await;
        let id = body["data"]["id"].as_i64().unwrap();

        // Skipping a stage is refused by the workflow.
        let skip = app
            .clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/course-forms/{id}/status"),
                &admin_token,
                &json!({"status": "paid"}),
            ))
            .await
            .unwrap();
        assert_eq!(skip.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // Unknown status is a plain validation failure.
        let unknown = app
            .clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/course-forms/{id}/status"),
                &admin_token,
                &json!({"status": "lost"}),
            ))
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

        for next in ["verified", "assigned", "ongoing", "completed", "paid"] {
            let moved = app
                .clone()
                .oneshot(json_req(
                    "PUT",
                    &format!("/api/course-forms/{id}/status"),
                    &admin_token,
                    &json!({"status": next, "admin_notes": format!("moved to {next}")}),
                ))
                .await
                .unwrap();
            assert_eq!(moved.status(), StatusCode::OK);
            let body = read_json(moved).await;
            assert_eq!(body["data"]["status"], next);
        }

        // Paid is terminal; even rejection is refused.
        let reject_after_paid = app
            .oneshot(json_req(
                "PUT",
                &format!("/api/course-forms/{id}/status"),
                &admin_token,
                &json!({"status": "rejected"}),
            ))
            .await
            .unwrap();
        assert_eq!(reject_after_paid.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    #[serial]
    async fn test_reject_from_mid_pipeline() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "reject_admin", true).await;
        let course = course(db).await;

        let submitted = app
            .clone()
            .oneshot(post_public("/api/course-forms", &enquiry(course.id)))
            .await
            .unwrap();
        let body = read_json(submitted).await;
        let id = body["data"]["id"].as_i64().unwrap();

        app.clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/course-forms/{id}/status"),
                &admin_token,
                &json!({"status": "verified"}),
            ))
            .await
            .unwrap();

        let rejected = app
            .oneshot(json_req(
                "PUT",
                &format!("/api/course-forms/{id}/status"),
                &admin_token,
                &json!({"status": "rejected", "admin_notes": "unreachable by phone"}),
            ))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::OK);
        let body = read_json(rejected).await;
        assert_eq!(body["data"]["status"], "rejected");
        assert_eq!(body["data"]["admin_notes"], "unreachable by phone");
    }

    #[tokio::test]
    #[serial]
    async fn test_edit_contact_and_delete() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "editform_admin", true).await;
        let course = course(db).await;

        let submitted = app
            .clone()
            .oneshot(post_public("/api/course-forms", &enquiry(course.id)))
            .await
            .unwrap();
        let body = read_json(submitted).await;
        let id = body["data"]["id"].as_i64().unwrap();

        let edited = app
            .clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/course-forms/{id}"),
                &admin_token,
                &json!({"mobile": "+919812345678"}),
            ))
            .await
            .unwrap();
        assert_eq!(edited.status(), StatusCode::OK);
        let body = read_json(edited).await;
        assert_eq!(body["data"]["mobile"], "+919812345678");
        // Status untouched by contact edits.
        assert_eq!(body["data"]["status"], "pending");

        let deleted = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/course-forms/{id}"))
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);

        let gone = app
            .oneshot(get_auth(&format!("/api/course-forms/{id}"), &admin_token))
            .await
            .unwrap();
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }
}
