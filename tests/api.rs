#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use worklog::server::{routes, seed_default_project, AppState};

    macro_rules! test_app {
        ($db_path:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState { db_path: $db_path.clone() }))
                    .configure(routes),
            )
            .await
        };
    }

    fn setup_db() -> (tempfile::TempDir, std::path::PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("worklog.db");
        seed_default_project(&db_path).unwrap();
        (temp_dir, db_path)
    }

    #[actix_web::test]
    async fn project_all_contains_the_default_project() {
        let (_tmp, db_path) = setup_db();
        let app = test_app!(db_path);

        let req = test::TestRequest::get().uri("/api/project/all").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        let names: Vec<&str> = body["payload"].as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
        assert!(names.contains(&"@Default"));
    }

    #[actix_web::test]
    async fn duplicate_project_names_are_rejected() {
        let (_tmp, db_path) = setup_db();
        let app = test_app!(db_path);

        let req = test::TestRequest::post()
            .uri("/api/project/create")
            .set_json(json!({"name": "Client"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/project/create")
            .set_json(json!({"name": "Client"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["payload"]["message"], "Project already exists");
        assert!(body["payload"]["timestamp"].is_string());
    }

    #[actix_web::test]
    async fn empty_project_name_is_a_validation_error() {
        let (_tmp, db_path) = setup_db();
        let app = test_app!(db_path);

        let req = test::TestRequest::post()
            .uri("/api/project/create")
            .set_json(json!({"name": "   "}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["payload"]["errors"].as_array().unwrap()[0].as_str().unwrap().contains("name"));
    }

    #[actix_web::test]
    async fn deleting_the_default_project_is_rejected() {
        let (_tmp, db_path) = setup_db();
        let app = test_app!(db_path);

        let req = test::TestRequest::get().uri("/api/project/all").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let default_id = body["payload"][0]["id"].as_str().unwrap().to_string();

        for flag in [true, false] {
            let req = test::TestRequest::delete()
                .uri("/api/project/delete")
                .set_json(json!({"id": default_id, "shouldDeleteWorkEntries": flag}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["payload"]["message"], "Default project cannot be deleted");
        }
    }

    #[actix_web::test]
    async fn work_entry_with_inverted_interval_is_rejected() {
        let (_tmp, db_path) = setup_db();
        let app = test_app!(db_path);

        let req = test::TestRequest::get().uri("/api/project/all").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let project_id = body["payload"][0]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/work/create")
            .set_json(json!({
                "startTime": "2024-03-05T11:00:00Z",
                "endTime": "2024-03-05T09:00:00Z",
                "projectId": project_id,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["payload"]["message"], "Start time cannot be greater than end time");
    }

    #[actix_web::test]
    async fn work_entry_lifecycle_roundtrip() {
        let (_tmp, db_path) = setup_db();
        let app = test_app!(db_path);

        let req = test::TestRequest::get().uri("/api/project/all").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let project_id = body["payload"][0]["id"].as_str().unwrap().to_string();

        // Create an entry in March 2024.
        let req = test::TestRequest::post()
            .uri("/api/work/create")
            .set_json(json!({
                "startTime": "2024-03-05T09:00:00Z",
                "endTime": "2024-03-05T11:00:00Z",
                "projectId": project_id,
                "description": "pairing",
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        let entry_id = body["payload"]["id"].as_str().unwrap().to_string();

        // Page over March 2024.
        let req = test::TestRequest::post()
            .uri("/api/work/all")
            .set_json(json!({"monthCursor": "2024-03-01"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let payload = &body["payload"];
        assert_eq!(payload["items"].as_array().unwrap().len(), 1);
        assert_eq!(payload["hasMore"], false);
        assert!(payload["nextCursor"].is_null());

        // Statistics for March 2024.
        let req = test::TestRequest::post()
            .uri("/api/work/statistics")
            .set_json(json!({"type": "monthly", "month": 3, "year": 2024}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let items = body["payload"].as_array().unwrap();
        assert_eq!(items.len(), 31);
        assert_eq!(items[4]["totalHours"], 2.0);

        // Years list.
        let req = test::TestRequest::get().uri("/api/work/years").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["payload"], json!(["2024"]));

        // An edit may not move the end into the future.
        let future = (Utc::now() + Duration::days(1)).to_rfc3339();
        let req = test::TestRequest::put()
            .uri("/api/work/update")
            .set_json(json!({
                "id": entry_id,
                "startTime": "2024-03-05T09:00:00Z",
                "endTime": future,
                "projectId": project_id,
                "description": "pairing",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // A valid edit goes through.
        let req = test::TestRequest::put()
            .uri("/api/work/update")
            .set_json(json!({
                "id": entry_id,
                "startTime": "2024-03-05T09:00:00Z",
                "endTime": "2024-03-05T12:00:00Z",
                "projectId": project_id,
                "description": "pairing, extended",
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["payload"]["endTime"], "2024-03-05T12:00:00Z");

        // Delete and confirm the entry is gone.
        let req = test::TestRequest::delete()
            .uri(&format!("/api/work/delete?id={}", entry_id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/work/delete?id={}", entry_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn unknown_statistics_type_is_a_validation_error() {
        let (_tmp, db_path) = setup_db();
        let app = test_app!(db_path);

        let req = test::TestRequest::post()
            .uri("/api/work/statistics")
            .set_json(json!({"type": "weekly", "month": 3, "year": 2024}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["payload"]["errors"].is_array());
    }

    #[actix_web::test]
    async fn report_generation_returns_an_attachment() {
        let (_tmp, db_path) = setup_db();
        let app = test_app!(db_path);

        let req = test::TestRequest::get().uri("/api/project/all").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let project_id = body["payload"][0]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/work/create")
            .set_json(json!({
                "startTime": "2024-03-05T09:00:00Z",
                "endTime": "2024-03-05T11:00:00Z",
                "projectId": project_id,
            }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/report/generate")
            .set_json(json!({
                "startDate": "2024-03-01T00:00:00Z",
                "endDate": "2024-03-31T23:59:59Z",
                "type": "csv",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/csv");
        let disposition = resp.headers().get("Content-Disposition").unwrap().to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=time_report_"));

        let bytes = test::read_body(resp).await;
        let content = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(content.contains("@Default"));
        assert!(content.contains("2.00"));
    }
}
