#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, read_json, test_user};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::AppConfig;
    use db::models::password_reset_token::{Column as TokenColumn, Entity as TokenEntity};
    use sea_orm::{
        ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    };
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn latest_otp(db: &DatabaseConnection, user_id: i64) -> String {
        TokenEntity::find()
            .filter(TokenColumn::UserId.eq(user_id))
            .order_by_desc(TokenColumn::Id)
            .one(db)
            .await
            .unwrap()
            .expect("No reset token issued")
            .code
    }

    #[tokio::test]
    #[serial]
    async fn test_register_issues_token() {
        let (app, _state, _storage) = make_test_app().await;

        let req = post_json(
            "/api/auth/register",
            &json!({
                "username": "newuser",
                "email": "NewUser@Test.com",
                "password": "password123"
            }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["username"], "newuser");
        // Emails are stored lowercased.
        assert_eq!(body["data"]["email"], "newuser@test.com");
        assert_eq!(body["data"]["admin"], false);
        assert!(body["data"]["token"].as_str().is_some());
    }

    #[tokio::test]
    #[serial]
    async fn test_register_duplicate_email_conflicts() {
        let (app, state, _storage) = make_test_app().await;
        test_user(state.db(), "taken", false).await;

        let req = post_json(
            "/api/auth/register",
            &json!({
                "username": "someone_else",
                "email": "taken@test.com",
                "password": "password123"
            }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    #[serial]
    async fn test_register_duplicate_username_conflicts() {
        let (app, state, _storage) = make_test_app().await;
        test_user(state.db(), "taken_name", false).await;

        let req = post_json(
            "/api/auth/register",
            &json!({
                "username": "taken_name",
                "email": "fresh@test.com",
                "password": "password123"
            }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = read_json(response).await;
        assert_eq!(body["message"], "A user with this username already exists");
    }

    #[tokio::test]
    #[serial]
    async fn test_register_rejects_short_password() {
        let (app, _state, _storage) = make_test_app().await;

        let req = post_json(
            "/api/auth/register",
            &json!({
                "username": "shorty",
                "email": "shorty@test.com",
                "password": "short"
            }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn test_login_success_and_failure() {
        let (app, state, _storage) = make_test_app().await;
        test_user(state.db(), "loginuser", false).await;

        let ok = app
            .clone()
            .oneshot(post_json(
                "/api/auth/login",
                &json!({"username": "loginuser", "password": "password123"}),
            ))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        let body = read_json(ok).await;
        assert!(body["data"]["token"].as_str().is_some());

        // Wrong password and unknown user answer identically.
        let bad_password = app
            .clone()
            .oneshot(post_json(
                "/api/auth/login",
                &json!({"username": "loginuser", "password": "wrong-password"}),
            ))
            .await
            .unwrap();
        assert_eq!(bad_password.status(), StatusCode::UNAUTHORIZED);
        let bad_body = read_json(bad_password).await;

        let unknown = app
            .oneshot(post_json(
                "/api/auth/login",
                &json!({"username": "nobody", "password": "password123"}),
            ))
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        let unknown_body = read_json(unknown).await;
        assert_eq!(bad_body["message"], unknown_body["message"]);
    }

    #[tokio::test]
    #[serial]
    async fn test_me_requires_auth() {
        let (app, state, _storage) = make_test_app().await;
        let (user, token) = test_user(state.db(), "profileuser", false).await;

        let unauthorized = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/auth/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let ok = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/auth/me")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        let body = read_json(ok).await;
        assert_eq!(body["data"]["id"], user.id);
        assert_eq!(body["data"]["username"], "profileuser");
    }

    #[tokio::test]
    #[serial]
    async fn test_change_password_requires_current() {
        let (app, state, _storage) = make_test_app().await;
        let (_user, token) = test_user(state.db(), "changepw", false).await;

        let wrong = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/change-password")
                    .header("Authorization", format!("Bearer {token}"))
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        json!({"current_password": "not-it", "new_password": "password456"})
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

        let ok = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/change-password")
                    .header("Authorization", format!("Bearer {token}"))
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        json!({"current_password": "password123", "new_password": "password456"})
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let relogin = app
            .oneshot(post_json(
                "/api/auth/login",
                &json!({"username": "changepw", "password": "password456"}),
            ))
            .await
            .unwrap();
        assert_eq!(relogin.status(), StatusCode::OK);
    }

    #[tokio::test]
    #[serial]
    async fn test_password_reset_request_hides_unknown_emails() {
        let (app, _state, _storage) = make_test_app().await;

        let response = app
            .oneshot(post_json(
                "/api/auth/password-reset/request",
                &json!({"email": "ghost@test.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    #[serial]
    async fn test_password_reset_full_flow() {
        let (app, state, _storage) = make_test_app().await;
        let (user, _) = test_user(state.db(), "resetuser", false).await;

        let request = app
            .clone()
            .oneshot(post_json(
                "/api/auth/password-reset/request",
                &json!({"email": "resetuser@test.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(request.status(), StatusCode::OK);

        let code = latest_otp(state.db(), user.id).await;
        assert_eq!(code.len(), 6);

        // Confirm without verify is refused.
        let premature = app
            .clone()
            .oneshot(post_json(
                "/api/auth/password-reset/confirm",
                &json!({
                    "email": "resetuser@test.com",
                    "code": code,
                    "new_password": "password789"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(premature.status(), StatusCode::BAD_REQUEST);

        let verify = app
            .clone()
            .oneshot(post_json(
                "/api/auth/password-reset/verify",
                &json!({"email": "resetuser@test.com", "code": code}),
            ))
            .await
            .unwrap();
        assert_eq!(verify.status(), StatusCode::OK);

        let confirm = app
            .clone()
            .oneshot(post_json(
                "/api/auth/password-reset/confirm",
                &json!({
                    "email": "resetuser@test.com",
                    "code": code,
                    "new_password": "password789"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(confirm.status(), StatusCode::OK);

        // The code is single-use.
        let replay = app
            .clone()
            .oneshot(post_json(
                "/api/auth/password-reset/confirm",
                &json!({
                    "email": "resetuser@test.com",
                    "code": code,
                    "new_password": "password000"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(replay.status(), StatusCode::BAD_REQUEST);

        let relogin = app
            .oneshot(post_json(
                "/api/auth/login",
                &json!({"username": "resetuser", "password": "password789"}),
            ))
            .await
            .unwrap();
        assert_eq!(relogin.status(), StatusCode::OK);
    }

    #[tokio::test]
    #[serial]
    async fn test_password_reset_request_is_rate_limited() {
        let (app, state, _storage) = make_test_app().await;
        let (user, _) = test_user(state.db(), "limiteduser", false).await;
        AppConfig::set_max_password_reset_requests_per_hour(1);

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(post_json(
                    "/api/auth/password-reset/request",
                    &json!({"email": "limiteduser@test.com"}),
                ))
                .await
                .unwrap();
            // Over-limit requests still answer 200; nothing is issued.
            assert_eq!(response.status(), StatusCode::OK);
        }

        let issued = TokenEntity::find()
            .filter(TokenColumn::UserId.eq(user.id))
            .count(state.db())
            .await
            .unwrap();
        assert_eq!(issued, 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_wrong_otp_is_rejected() {
        let (app, state, _storage) = make_test_app().await;
        let (user, _) = test_user(state.db(), "wrongotp", false).await;

        app.clone()
            .oneshot(post_json(
                "/api/auth/password-reset/request",
                &json!({"email": "wrongotp@test.com"}),
            ))
            .await
            .unwrap();

        let code = latest_otp(state.db(), user.id).await;
        let wrong = if code == "000000" { "000001" } else { "000000" };

        let verify = app
            .oneshot(post_json(
                "/api/auth/password-reset/verify",
                &json!({"email": "wrongotp@test.com", "code": wrong}),
            ))
            .await
            .unwrap();
        assert_eq!(verify.status(), StatusCode::BAD_REQUEST);
    }
}
