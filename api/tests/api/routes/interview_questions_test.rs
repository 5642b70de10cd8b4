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

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
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

    fn json_req(method: &str, uri: &str, token: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn course(db: &DatabaseConnection) -> Course {
        Course::create(db, "DSA Prep", "d", "programming", 0.0, true, vec![])
            .await
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_create_question_requires_existing_course() {
        let (app, state, _storage) = make_test_app().await;
        let (_admin, admin_token) = test_user(state.db(), "q_admin", true).await;
        let course = course(state.db()).await;

        let created = app
            .clone()
            .oneshot(json_req(
                "POST",
                "/api/interview-questions",
                &admin_token,
                &json!({
                    "course_id": course.id,
                    "question": "What is a B-tree?",
                    "answer": ["Balanced", "High fan-out"]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = read_json(created).await;
        assert_eq!(body["data"]["is_active"], true);
        assert_eq!(body["data"]["answer"], json!(["Balanced", "High fan-out"]));

        let orphan = app
            .oneshot(json_req(
                "POST",
                "/api/interview-questions",
                &admin_token,
                &json!({
                    "course_id": 424242,
                    "question": "Where is my course?",
                    "answer": ["Nowhere"]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(orphan.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn test_public_only_sees_active_questions() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "vis_q_admin", true).await;
        let course = course(db).await;

        let created = app
            .clone()
            .oneshot(json_req(
                "POST",
                "/api/interview-questions",
                &admin_token,
                &json!({
                    "course_id": course.id,
                    "question": "Soon disabled?",
                    "answer": ["Yes"]
                }),
            ))
            .await
            .unwrap();
        let body = read_json(created).await;
        let id = body["data"]["id"].as_i64().unwrap();

        let toggled = app
            .clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/interview-questions/{id}/toggle"),
                &admin_token,
                &json!({}),
            ))
            .await
            .unwrap();
        let body = read_json(toggled).await;
        assert_eq!(body["data"]["is_active"], false);

        let public_list = app
            .clone()
            .oneshot(get("/api/interview-questions"))
            .await
            .unwrap();
        let body = read_json(public_list).await;
        assert!(body["data"]["interview_questions"].as_array().unwrap().is_empty());

        let public_get = app
            .clone()
            .oneshot(get(&format!("/api/interview-questions/{id}")))
            .await
            .unwrap();
        assert_eq!(public_get.status(), StatusCode::NOT_FOUND);

        let admin_list = app
            .clone()
            .oneshot(get_auth("/api/interview-questions", &admin_token))
            .await
            .unwrap();
        let body = read_json(admin_list).await;
        assert_eq!(body["data"]["interview_questions"].as_array().unwrap().len(), 1);

        // A second toggle restores visibility.
        app.clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/interview-questions/{id}/toggle"),
                &admin_token,
                &json!({}),
            ))
            .await
            .unwrap();
        let public_again = app
            .oneshot(get(&format!("/api/interview-questions/{id}")))
            .await
            .unwrap();
        assert_eq!(public_again.status(), StatusCode::OK);
    }

    #[tokio::test]
    #[serial]
    async fn test_filter_by_course_and_query() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "filter_q_admin", true).await;
        let course_a = course(db).await;
        let course_b = Course::create(db, "SQL Prep", "d", "databases", 0.0, true, vec![])
            .await
            .unwrap();

        for (course_id, question) in [
            (course_a.id, "Explain quicksort"),
            (course_a.id, "Explain mergesort"),
            (course_b.id, "Explain joins"),
        ] {
            app.clone()
                .oneshot(json_req(
                    "POST",
                    "/api/interview-questions",
                    &admin_token,
                    &json!({"course_id": course_id, "question": question, "answer": ["..."]}),
                ))
                .await
                .unwrap();
        }

        let for_course = app
            .clone()
            .oneshot(get(&format!(
                "/api/interview-questions?course_id={}",
                course_a.id
            )))
            .await
            .unwrap();
        let body = read_json(for_course).await;
        assert_eq!(body["data"]["interview_questions"].as_array().unwrap().len(), 2);

        let searched = app
            .oneshot(get("/api/interview-questions?query=joins"))
            .await
            .unwrap();
        let body = read_json(searched).await;
        let questions = body["data"]["interview_questions"].as_array().unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0]["question"], "Explain joins");
    }

    #[tokio::test]
    #[serial]
    async fn test_edit_and_delete_question() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "edit_q_admin", true).await;
        let course = course(db).await;

        let created = app
            .clone()
            .oneshot(json_req(
                "POST",
                "/api/interview-questions",
                &admin_token,
                &json!({"course_id": course.id, "question": "Tyop?", "answer": ["Fix me"]}),
            ))
            .await
            .unwrap();
        let body = read_json(created).await;
        let id = body["data"]["id"].as_i64().unwrap();

        let edited = app
            .clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/interview-questions/{id}"),
                &admin_token,
                &json!({"question": "Typo?"}),
            ))
            .await
            .unwrap();
        assert_eq!(edited.status(), StatusCode::OK);
        let body = read_json(edited).await;
        assert_eq!(body["data"]["question"], "Typo?");

        let deleted = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/interview-questions/{id}"))
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);

        let gone = app
            .oneshot(get_auth(
                &format!("/api/interview-questions/{id}"),
                &admin_token,
            ))
            .await
            .unwrap();
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }
}
