#[cfg(test)]
mod tests {
    use crate::helpers::{make_test_app, read_json, test_user};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    fn get(uri: &str, token: &str) -> Request<Body> {
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

    fn slip_payload(user_id: i64) -> serde_json::Value {
        json!({
            "user_id": user_id,
            "designation": "Instructor",
            "department": "Academics",
            "salary": 55000.0,
            "bank_account_number": "000111222333",
            "bank_name": "State Bank",
            "bank_ifsc_code": "sbin0001234",
            "address": {"city": "Pune", "pincode": "411001"}
        })
    }

    #[tokio::test]
    #[serial]
    async fn test_group_is_admin_only() {
        let (app, state, _storage) = make_test_app().await;
        let (_user, user_token) = test_user(state.db(), "payroll_user", false).await;

        let anonymous = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/salary-slips")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let forbidden = app
            .oneshot(get("/api/salary-slips", &user_token))
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn test_create_slip_normalizes_ifsc_and_seeds_history() {
        let (app, state, _storage) = make_test_app().await;
        let (_admin, admin_token) = test_user(state.db(), "payroll_admin", true).await;
        let (staff, _) = test_user(state.db(), "staff_member", false).await;

        let created = app
            .clone()
            .oneshot(json_req(
                "POST",
                "/api/salary-slips",
                &admin_token,
                &slip_payload(staff.id),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = read_json(created).await;
        assert_eq!(body["data"]["bank_ifsc_code"], "SBIN0001234");
        assert_eq!(body["data"]["status"], "active");
        let id = body["data"]["id"].as_i64().unwrap();

        let detail = app
            .oneshot(get(&format!("/api/salary-slips/{id}"), &admin_token))
            .await
            .unwrap();
        assert_eq!(detail.status(), StatusCode::OK);
        let body = read_json(detail).await;
        let revisions = body["data"]["revisions"].as_array().unwrap();
        assert_eq!(revisions.len(), 1);
        assert_eq!(revisions[0]["amount"], 55000.0);
    }

    #[tokio::test]
    #[serial]
    async fn test_create_slip_for_unknown_user_is_404() {
        let (app, state, _storage) = make_test_app().await;
        let (_admin, admin_token) = test_user(state.db(), "orphan_admin", true).await;

        let missing = app
            .oneshot(json_req(
                "POST",
                "/api/salary-slips",
                &admin_token,
                &slip_payload(987654),
            ))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn test_revision_updates_salary_and_orders_history() {
        let (app, state, _storage) = make_test_app().await;
        let (_admin, admin_token) = test_user(state.db(), "raise_admin", true).await;
        let (staff, _) = test_user(state.db(), "raise_staff", false).await;

        let created = app
            .clone()
            .oneshot(json_req(
                "POST",
                "/api/salary-slips",
                &admin_token,
                &slip_payload(staff.id),
            ))
            .await
            .unwrap();
        let body = read_json(created).await;
        let id = body["data"]["id"].as_i64().unwrap();

        let raised = app
            .clone()
            .oneshot(json_req(
                "POST",
                &format!("/api/salary-slips/{id}/revisions"),
                &admin_token,
                &json!({"amount": 60000.0, "note": "annual raise"}),
            ))
            .await
            .unwrap();
        assert_eq!(raised.status(), StatusCode::CREATED);

        let detail = app
            .oneshot(get(&format!("/api/salary-slips/{id}"), &admin_token))
            .await
            .unwrap();
        let body = read_json(detail).await;
        assert_eq!(body["data"]["salary"], 60000.0);
        let revisions = body["data"]["revisions"].as_array().unwrap();
        assert_eq!(revisions.len(), 2);
        // Newest first.
        assert_eq!(revisions[0]["amount"], 60000.0);
        assert_eq!(revisions[1]["amount"], 55000.0);
    }

    #[tokio::test]
    #[serial]
    async fn test_status_and_filters() {
        let (app, state, _storage) = make_test_app().await;
        let (_admin, admin_token) = test_user(state.db(), "status_admin", true).await;
        let (staff, _) = test_user(state.db(), "status_staff", false).await;

        let created = app
            .clone()
            .oneshot(json_req(
                "POST",
                "/api/salary-slips",
                &admin_token,
                &slip_payload(staff.id),
            ))
            .await
            .unwrap();
        let body = read_json(created).await;
        let id = body["data"]["id"].as_i64().unwrap();

        let invalid = app
            .clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/salary-slips/{id}/status"),
                &admin_token,
                &json!({"status": "fired"}),
            ))
            .await
            .unwrap();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let on_leave = app
            .clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/salary-slips/{id}/status"),
                &admin_token,
                &json!({"status": "on_leave"}),
            ))
            .await
            .unwrap();
        let body = read_json(on_leave).await;
        assert_eq!(body["data"]["status"], "on_leave");

        let filtered = app
            .clone()
            .oneshot(get("/api/salary-slips?status=on_leave", &admin_token))
            .await
            .unwrap();
        let body = read_json(filtered).await;
        assert_eq!(body["data"]["salary_slips"].as_array().unwrap().len(), 1);

        let by_user = app
            .oneshot(get(
                &format!("/api/salary-slips?user_id={}", staff.id),
                &admin_token,
            ))
            .await
            .unwrap();
        let body = read_json(by_user).await;
        assert_eq!(body["data"]["salary_slips"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_edit_and_delete_slip() {
        let (app, state, _storage) = make_test_app().await;
        let (_admin, admin_token) = test_user(state.db(), "editslip_admin", true).await;
        let (staff, _) = test_user(state.db(), "editslip_staff", false).await;

        let created = app
            .clone()
            .oneshot(json_req(
                "POST",
                "/api/salary-slips",
                &admin_token,
                &slip_payload(staff.id),
            ))
            .await
            .unwrap();
        let body = read_json(created).await;
        let id = body["data"]["id"].as_i64().unwrap();

        let edited = app
            .clone()
            .oneshot(json_req(
                "PUT",
                &format!("/api/salary-slips/{id}"),
                &admin_token,
                &json!({"department": "Placements", "bank_ifsc_code": "hdfc0000123"}),
            ))
            .await
            .unwrap();
        assert_eq!(edited.status(), StatusCode::OK);
        let body = read_json(edited).await;
        assert_eq!(body["data"]["department"], "Placements");
        assert_eq!(body["data"]["bank_ifsc_code"], "HDFC0000123");

        let deleted = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/salary-slips/{id}"))
                    .header("Authorization", format!("Bearer {admin_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);

        let gone = app
            .oneshot(get(&format!("/api/salary-slips/{id}"), &admin_token))
            .await
            .unwrap();
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }
}
