//! HTTP-level tests for the diary and profile routes
//!
//! Drives the full router (middleware included) against the in-memory
//! store via `tower::ServiceExt::oneshot`.

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::repositories::MemoryStore;
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use fitdiary_shared::types::{DiaryEntryResponse, ErrorResponse, ProfileResponse, SummaryResponse};
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(AppConfig::default(), Arc::new(MemoryStore::new()));
        create_router(state)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> T {
        serde_json::from_slice(bytes).unwrap()
    }

    fn survey_body() -> serde_json::Value {
        json!({
            "telegramId": 7,
            "name": "Test",
            "gender": "male",
            "age": 30,
            "heightCm": 176.0,
            "weightKg": 80.0,
            "goal": "maintain",
            "activity": "moderate",
            "preferences": []
        })
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app();
        for uri in ["/health", "/health/live", "/health/ready"] {
            let (status, _) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_survey_roundtrip_over_http() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/api/v1/profile", Some(survey_body())).await;
        assert_eq!(status, StatusCode::OK);
        let response: ProfileResponse = decode(&body);
        assert_eq!(response.targets.calories, 2720);

        let (status, body) = send(&app, Method::GET, "/api/v1/profile/7", None).await;
        assert_eq!(status, StatusCode::OK);
        let response: ProfileResponse = decode(&body);
        assert_eq!(response.user.telegram_id, 7);
    }

    #[tokio::test]
    async fn test_invalid_survey_yields_structured_error() {
        let app = app();
        let mut bad = survey_body();
        bad["weightKg"] = json!(5.0);
        let (status, body) = send(&app, Method::POST, "/api/v1/profile", Some(bad)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = decode(&body);
        assert!(!error.ok);
        assert_eq!(error.error.code, "VALIDATION_ERROR");
        assert_eq!(error.error.field.as_deref(), Some("weightKg"));
    }

    #[tokio::test]
    async fn test_diary_meal_flow_over_http() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/diary/2024-03-07/meals",
            Some(json!({"title": "Breakfast", "calories": 400, "protein_g": 25})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: DiaryEntryResponse = decode(&body);
        assert_eq!(response.totals.calories, 400);
        let meal_id = response.entry.meals[0].id.clone();

        // toggle then delete through the API
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/v1/diary/2024-03-07/items/{meal_id}/toggle"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: DiaryEntryResponse = decode(&body);
        assert!(response.entry.meals[0].done);

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/diary/2024-03-07/items/{meal_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: DiaryEntryResponse = decode(&body);
        assert!(response.entry.meals.is_empty());
    }

    #[tokio::test]
    async fn test_recipe_logging_and_summary() {
        let app = app();
        send(&app, Method::POST, "/api/v1/profile", Some(survey_body())).await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/diary/2024-03-07/meals/recipe",
            Some(json!({"recipe_slug": "banana-oatmeal", "target_calories": 500})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) =
            send(&app, Method::GET, "/api/v1/summary/7?date=2024-03-07", None).await;
        assert_eq!(status, StatusCode::OK);
        let summary: SummaryResponse = decode(&body);
        assert_eq!(summary.target.cal, 2720);
        assert_eq!(summary.consumed.cal, 500);
    }

    #[tokio::test]
    async fn test_unknown_recipe_is_404() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/diary/2024-03-07/meals/recipe",
            Some(json!({"recipe_slug": "nope", "target_calories": 500})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = decode(&body);
        assert_eq!(error.error.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_catalog_endpoints() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/v1/catalog/recipes", None).await;
        assert_eq!(status, StatusCode::OK);
        let recipes: Vec<serde_json::Value> = decode(&body);
        assert_eq!(recipes.len(), 4);

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/catalog/recipes/banana-oatmeal/portions?target=430",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let portions: serde_json::Value = decode(&body);
        assert_eq!(portions["variants"].as_array().unwrap().len(), 6);
        assert_eq!(portions["selected"]["calories"], 400);
        assert!(portions["ingredients"].is_array());

        let (status, _) = send(&app, Method::GET, "/api/v1/catalog/presets", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, "/api/v1/catalog/workouts", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_selected_date_routes() {
        let app = app();
        let (status, _) = send(&app, Method::GET, "/api/v1/diary/selected-date", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/diary/selected-date",
            Some(json!({"date": "2024-12-31"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let selected: serde_json::Value = decode(&body);
        assert_eq!(selected["date"], "2024-12-31");
    }

    #[tokio::test]
    async fn test_rest_day_water_sleep_setters() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/api/v1/diary/2024-03-07/workouts/template",
            Some(json!({"template_slug": "full-body-a"})),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/diary/2024-03-07/rest-day",
            Some(json!({"is_rest_day": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: DiaryEntryResponse = decode(&body);
        assert!(response.entry.workouts.is_empty());

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/diary/2024-03-07/water",
            Some(json!({"liters": 2.5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: DiaryEntryResponse = decode(&body);
        assert_eq!(response.entry.water_l, 2.5);

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/diary/2024-03-07/sleep",
            Some(json!({"start": "23:00", "end": "07:00", "quality": 4})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: DiaryEntryResponse = decode(&body);
        assert_eq!(response.entry.sleep.quality, Some(4));
    }
}
