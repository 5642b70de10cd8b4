#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, multipart_body, read_json, test_user};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::course::{Model as Course, ModerationStatus};
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

    fn json_req(method: &str, uri: &str, token: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn approved_course(db: &DatabaseConnection, title: &str) -> Course {
        let course = Course::create(db, title, "desc", "programming", 1000.0, false, vec![])
            .await
            .unwrap();
        course.set_moderation(db, ModerationStatus::Approved).await.unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_create_course_is_admin_only() {
        let (app, state, _storage) = make_test_app().await;
        let (_user, user_token) = test_user(state.db(), "course_user", false).await;
        let (_admin, admin_token) = test_user(state.db(), "course_admin", true).await;

        let payload = json!({
            "title": "Rust Basics",
            "description": "Start here",
            "category": "programming",
            "price": 2999.0,
            "is_free": false,
            "tags": ["rust"]
        });

        let forbidden = app
            .clone()
            .oneshot(json_req("POST", "/api/courses", &user_token, &payload))
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let created = app
            .oneshot(json_req("POST", "/api/courses", &admin_token, &payload))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = read_json(created).await;
        assert_eq!(body["data"]["title"], "Rust Basics");
        assert_eq!(body["data"]["moderation_status"], "pending");
        assert_eq!(body["data"]["is_published"], false);
    }

    #[tokio::test]
    #[serial]
    async fn test_free_course_price_is_zeroed() {
        let (app, state, _storage) = make_test_app().await;
        let (_admin, admin_token) = test_user(state.db(), "free_admin", true).await;

        let created = app
            .oneshot(json_req(
                "POST",
                "/api/courses",
                &admin_token,
                &json!({
                    "title": "Freebie",
                    "description": "no charge",
                    "category": "general",
                    "price": 999.0,
                    "is_free": true
                }),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = read_json(created).await;
        assert_eq!(body["data"]["price"], 0.0);
    }

    #[tokio::test]
    #[serial]
    async fn test_public_list_hides_unapproved_courses() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "vis_admin", true).await;

        approved_course(db, "Visible").await;
        // Pending moderation: admin-only.
        Course::create(db, "Pending", "d", "general", 0.0, true, vec![])
            .await
            .unwrap();

        let public = app.clone().oneshot(get("/api/courses")).await.unwrap();
        assert_eq!(public.status(), StatusCode::OK);
        let body = read_json(public).await;
        let courses = body["data"]["courses"].as_array().unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0]["title"], "Visible");

        let admin_view = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/courses")
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = read_json(admin_view).await;
        assert_eq!(body["data"]["courses"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn test_get_hidden_course_is_404_for_public() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let course = approved_course(db, "Soon hidden").await;
        course.hide(db).await.unwrap();

        let response = app
            .oneshot(get(&format!("/api/courses/{}", course.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_filters_and_pagination() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();

        for i in 0..5 {
            approved_course(db, &format!("Course {i}")).await;
        }
        let free = Course::create(db, "Free one", "d", "general", 0.0, true, vec![])
            .await
            .unwrap();
        free.set_moderation(db, ModerationStatus::Approved).await.unwrap();

        let page = app
            .clone()
            .oneshot(get("/api/courses?per_page=4"))
            .await
            .unwrap();
        let body = read_json(page).await;
        assert_eq!(body["data"]["total"], 6);
        assert!(body["data"]["courses"].as_array().unwrap().len() <= 4);

        let free_only = app
            .clone()
            .oneshot(get("/api/courses?is_free=true"))
            .await
            .unwrap();
        let body = read_json(free_only).await;
        let courses = body["data"]["courses"].as_array().unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0]["title"], "Free one");

        let searched = app
            .oneshot(get("/api/courses?query=Course%203"))
            .await
            .unwrap();
        let body = read_json(searched).await;
        assert_eq!(body["data"]["courses"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_moderation_and_publish_endpoints() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "mod_admin", true).await;
        let course = Course::create(db, "Needs review", "d", "general", 10.0, false, vec![])
            .await
            .unwrap();

        let bad_status = app
            .clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/courses/{}/moderation", course.id),
                &admin_token,
                &json!({"status": "nonsense"}),
            ))
            .await
            .unwrap();
        assert_eq!(bad_status.status(), StatusCode::BAD_REQUEST);

        let approved = app
            .clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/courses/{}/moderation", course.id),
                &admin_token,
                &json!({"status": "approved"}),
            ))
            .await
            .unwrap();
        assert_eq!(approved.status(), StatusCode::OK);
        let body = read_json(approved).await;
        assert_eq!(body["data"]["moderation_status"], "approved");

        // Idempotent in effect: repeating the same publish state succeeds.
        for _ in 0..2 {
            let published = app
                .clone()
                .oneshot(json_req(
                    "PUT",
                    &format!("/api/courses/{}/publish", course.id),
                    &admin_token,
                    &json!({"is_published": true}),
                ))
                .await
                .unwrap();
            assert_eq!(published.status(), StatusCode::OK);
            let body = read_json(published).await;
            assert_eq!(body["data"]["is_published"], true);
        }

        let featured = app
            .oneshot(json_req(
                "PUT",
                &format!("/api/courses/{}/feature", course.id),
                &admin_token,
                &json!({"is_featured": true}),
            ))
            .await
            .unwrap();
        let body = read_json(featured).await;
        assert_eq!(body["data"]["is_featured"], true);
    }

    #[tokio::test]
    #[serial]
    async fn test_edit_course() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "edit_admin", true).await;
        let course = approved_course(db, "Old title").await;

        let edited = app
            .oneshot(json_req(
                "PUT",
                &format!("/api/courses/{}", course.id),
                &admin_token,
                &json!({"title": "New title", "is_free": true}),
            ))
            .await
            .unwrap();
        assert_eq!(edited.status(), StatusCode::OK);
        let body = read_json(edited).await;
        assert_eq!(body["data"]["title"], "New title");
        assert_eq!(body["data"]["price"], 0.0);
    }

    #[tokio::test]
    #[serial]
    async fn test_delete_hides_and_is_idempotent() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "del_admin", true).await;
        let course = approved_course(db, "Goner").await;

        for _ in 0..2 {
            let deleted = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("DELETE")
                        .uri(format!("/api/courses/{}", course.id))
                        .header("Authorization", format!("Bearer {admin_token}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(deleted.status(), StatusCode::OK);
        }

        let public_list = app.oneshot(get("/api/courses")).await.unwrap();
        let body = read_json(public_list).await;
        assert!(body["data"]["courses"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_thumbnail_upload_and_download() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "thumb_admin", true).await;
        let course = approved_course(db, "Pictured").await;

        let boundary = "test-boundary";
        let body = multipart_body(boundary, &[], Some(("cover.png", b"\x89PNG fake image")));
        let uploaded = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/courses/{}/thumbnail", course.id))
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .header(
                        "Content-Type",
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(uploaded.status(), StatusCode::OK);

        let downloaded = app
            .clone()
            .oneshot(get(&format!("/api/courses/{}/thumbnail", course.id)))
            .await
            .unwrap();
        assert_eq!(downloaded.status(), StatusCode::OK);
        assert_eq!(
            downloaded.headers().get("Content-Type").unwrap(),
            "image/png"
        );
        let bytes = axum::body::to_bytes(downloaded.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"\x89PNG fake image");

        // Unsupported extension is refused.
        let body = multipart_body(boundary, &[], Some(("evil.exe", b"MZ")));
        let refused = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/courses/{}/thumbnail", course.id))
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .header(
                        "Content-Type",
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(refused.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn test_thumbnail_reupload_replaces_old_file() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "rethumb_admin", true).await;
        let course = approved_course(db, "Recovered").await;

        let boundary = "test-boundary";
        for (filename, bytes) in [
            ("cover.png", b"\x89PNG fake image".as_slice()),
            ("cover.webp", b"RIFF fake webp".as_slice()),
        ] {
            let body = multipart_body(boundary, &[], Some((filename, bytes)));
            let uploaded = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri(format!("/api/courses/{}/thumbnail", course.id))
                        .header("Authorization", format!("Bearer {admin_token}"))
                        .header(
                            "Content-Type",
                            format!("multipart/form-data; boundary={boundary}"),
                        )
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(uploaded.status(), StatusCode::OK);
        }

        // The png written by the first upload is gone; only the webp remains.
        assert!(!common::paths::course_thumbnail_path(course.id, "png").exists());
        assert!(common::paths::course_thumbnail_path(course.id, "webp").exists());

        let downloaded = app
            .oneshot(get(&format!("/api/courses/{}/thumbnail", course.id)))
            .await
            .unwrap();
        assert_eq!(downloaded.status(), StatusCode::OK);
        assert_eq!(
            downloaded.headers().get("Content-Type").unwrap(),
            "image/webp"
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_hidden_course_thumbnail_follows_course_visibility() {
        let (app, state, _storage) = make_test_app().await;
        let db = state.db();
        let (_admin, admin_token) = test_user(db, "thumb_vis_admin", true).await;
        let course = approved_course(db, "Cover art").await;

        let boundary = "test-boundary";
        let body = multipart_body(boundary, &[], Some(("cover.png", b"\x89PNG fake image")));
        let uploaded = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/courses/{}/thumbnail", course.id))
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .header(
                        "Content-Type",
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(uploaded.status(), StatusCode::OK);

        let deleted = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/courses/{}", course.id))
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);

        // Hiding the course hides its thumbnail from the public too.
        let anonymous = app
            .clone()
            .oneshot(get(&format!("/api/courses/{}/thumbnail", course.id)))
            .await
            .unwrap();
        assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

        let admin_view = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/courses/{}/thumbnail", course.id))
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(admin_view.status(), StatusCode::OK);
    }
}
