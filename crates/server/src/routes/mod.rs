use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod blog;
pub mod case_studies;
pub mod jobs;
pub mod labs;
pub mod leads;
pub mod pages;
pub mod products;
pub mod services;
pub mod settings;
pub mod solutions;
pub mod timeline;

/// All entity routers, mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/api",
        Router::new()
            .merge(auth::router())
            .merge(blog::router())
            .merge(case_studies::router())
            .merge(jobs::router())
            .merge(labs::router())
            .merge(leads::router())
            .merge(pages::router())
            .merge(products::router())
            .merge(services::router())
            .merge(settings::router())
            .merge(solutions::router())
            .merge(timeline::router()),
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use ::services::services::{auth::AuthService, importer::ImporterService};
    use tower::ServiceExt;

    use super::*;

    async fn app() -> (axum::Router, db::DbService) {
        let db = db::DbService::new_in_memory().await.unwrap();
        let state = AppState::new(db.clone(), ImporterService::new().unwrap());
        (router().with_state(state), db)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn admin_writes_require_a_token() {
        let (app, _db) = app().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/services",
                json!({"name": "Web Apps", "description": "d", "category": "builds"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_then_create_and_read_back() {
        let (app, db) = app().await;
        AuthService::create_user(&db.pool, "admin@example.com", "hunter2")
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({"email": "admin@example.com", "password": "hunter2"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let mut request = json_request(
            "POST",
            "/api/services",
            json!({"name": "Web Apps", "description": "Custom builds", "category": "builds"}),
        );
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Derived slug is readable without auth.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/services/slug/web-apps")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["name"], "Web Apps");
    }

    #[tokio::test]
    async fn contact_form_is_public_and_validated() {
        let (app, db) = app().await;
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/leads/contact",
                json!({"name": "Jo", "email": "jo@example.com", "message": "hi"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            db::models::lead::Lead::count(&db.pool).await.unwrap(),
            1
        );

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/leads/contact",
                json!({"name": "Jo", "email": "not-an-email", "message": "hi"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            db::models::lead::Lead::count(&db.pool).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn grouped_products_bucket_by_category() {
        use db::models::product::{CreateProduct, Product, ProductCategory};

        let (app, db) = app().await;

        let base = CreateProduct {
            name: "Helpdesk".into(),
            slug: None,
            tagline: None,
            description: "d".into(),
            category: ProductCategory::Saas,
            status: Default::default(),
            is_featured: false,
            source_url: None,
            demo_url: None,
            tech_stack: vec![],
            screenshots: vec![],
            features: vec![],
            pricing: None,
            changelog: vec![],
        };
        Product::create(&db.pool, &base).await.unwrap();
        Product::create(
            &db.pool,
            &CreateProduct {
                name: "CRM".into(),
                ..base.clone()
            },
        )
        .await
        .unwrap();
        Product::create(
            &db.pool,
            &CreateProduct {
                name: "Landing Kit".into(),
                category: ProductCategory::Template,
                ..base
            },
        )
        .await
        .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/products/grouped")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["saas"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["template"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_slug_is_404_with_error_envelope() {
        let (app, _db) = app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/blog/slug/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
    }
}
