//! HTTP surface: public pages, the admin area and the settings API, served by axum.

pub mod admin;
pub mod api;
pub mod error;
pub mod public;
pub mod state;

pub use state::AppState;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/", get(admin::profile).post(admin::save_profile))
        .route("/sections", get(admin::sections))
        .route("/sections/:variant", post(admin::create_section))
        .route("/sections/:variant/new", get(admin::new_section))
        .route(
            "/sections/:variant/:id",
            get(admin::edit_section).post(admin::update_section),
        )
        .route("/sections/:variant/:id/toggle", post(admin::toggle_section))
        .route("/sections/:variant/:id/delete", post(admin::delete_section))
        .route("/sections/:variant/:id/move", post(admin::move_section_handler))
        .route("/navigation/:variant/toggle", post(admin::toggle_navigation))
        .route(
            "/items/:collection",
            get(admin::items_index).post(admin::create_item),
        )
        .route("/items/:collection/new", get(admin::new_item))
        .route(
            "/items/:collection/:id",
            get(admin::edit_item).post(admin::update_item),
        )
        .route("/items/:collection/:id/toggle", post(admin::toggle_item))
        .route("/items/:collection/:id/delete", post(admin::delete_item))
        .route("/items/:collection/:id/move", post(admin::move_item))
        .route("/news", get(admin::news_index).post(admin::create_article))
        .route("/news/new", get(admin::new_article))
        .route(
            "/news/:id",
            get(admin::edit_article).post(admin::update_article),
        )
        .route("/news/:id/publish", post(admin::toggle_article))
        .route("/news/:id/delete", post(admin::delete_article))
        .route("/footer", get(admin::footer))
        .route("/footer/:kind", post(admin::save_footer))
        .route("/contact", get(admin::contact_info))
        .route(
            "/uploads/:bucket",
            post(admin::upload).delete(admin::delete_upload),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin::require_admin_page,
        ));

    let api_routes = Router::new()
        .route(
            "/site-settings",
            get(api::get_settings).put(api::put_settings),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_admin_api,
        ));

    Router::new()
        .route("/", get(public::home))
        .route("/contact", post(public::contact))
        .route("/news", get(public::news_index))
        .route("/news/:slug", get(public::news_article))
        .nest("/admin", admin_routes)
        .nest("/api/admin", api_routes)
        .nest_service("/uploads", ServeDir::new(state.blobs.root()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        config::site::{AdminToken, AppConfig},
        core::{
            contact::{ContactSubmission, ContactTransport},
            navigation::toggle_navigation_membership,
            section::SectionVariant,
        },
        entities::HeroSection,
        errors::Result,
        test_utils::{create_test_about, create_test_hero, init_test_tracing, setup_test_db},
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use sea_orm::{DatabaseConnection, EntityTrait};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    const ADMIN: &str = "Bearer admin-token";
    const EDITOR: &str = "Bearer editor-token";

    fn test_config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            bind_address: "127.0.0.1:0".parse().unwrap(),
            upload_dir: std::env::temp_dir().join("storefront-web-tests"),
            public_upload_base: "/uploads".to_string(),
            login_url: "/login".to_string(),
            admin_tokens: vec![
                AdminToken {
                    token: "admin-token".to_string(),
                    role: "admin".to_string(),
                },
                AdminToken {
                    token: "editor-token".to_string(),
                    role: "editor".to_string(),
                },
            ],
        }
    }

    async fn app() -> Result<(Router, DatabaseConnection)> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let router = build_router(AppState::new(db.clone(), test_config()));
        Ok((router, db))
    }

    async fn send(router: &Router, request: Request<Body>) -> Response {
        router.clone().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_post(uri: &str, auth: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, auth)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_home_renders_with_fallback_settings() -> Result<()> {
        let (router, db) = app().await?;
        create_test_hero(&db, "Welcome aboard", 0).await?;
        toggle_navigation_membership(&db, SectionVariant::Hero).await?;

        let response = send(&router, get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Your Company"));
        assert!(html.contains("Welcome aboard"));
        assert!(html.contains("#hero\">Hero"));
        assert!(html.contains("Get In Touch"));
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_requires_login() -> Result<()> {
        let (router, _db) = app().await?;

        let anonymous = send(&router, get("/admin/sections")).await;
        assert_eq!(anonymous.status(), StatusCode::SEE_OTHER);
        assert_eq!(anonymous.headers()[header::LOCATION], "/login");

        let editor = Request::builder()
            .uri("/admin/sections")
            .header(header::AUTHORIZATION, EDITOR)
            .body(Body::empty())
            .unwrap();
        let response = send(&router, editor).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let admin = Request::builder()
            .uri("/admin/sections")
            .header(header::AUTHORIZATION, ADMIN)
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&router, admin).await.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn test_move_route_reorders_sections() -> Result<()> {
        let (router, db) = app().await?;
        let hero = create_test_hero(&db, "Welcome", 0).await?;
        let about = create_test_about(&db, "About us", 1).await?;

        let uri = format!("/admin/sections/about/{}/move", about.id);
        let response = send(&router, form_post(&uri, ADMIN, "direction=up")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let hero = HeroSection::find_by_id(hero.id).one(&db).await?.unwrap();
        assert_eq!(hero.display_order, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_editing_deleted_section_is_not_found() -> Result<()> {
        let (router, db) = app().await?;
        let hero = create_test_hero(&db, "Gone soon", 0).await?;
        let uri = format!("/admin/sections/hero/{}", hero.id);

        let delete = form_post(&format!("{uri}/delete"), ADMIN, "");
        assert_eq!(send(&router, delete).await.status(), StatusCode::SEE_OTHER);

        let edit = Request::builder()
            .uri(&uri)
            .header(header::AUTHORIZATION, ADMIN)
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&router, edit).await.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_section_form_is_rerendered() -> Result<()> {
        let (router, _db) = app().await?;
        let response = send(&router, form_post("/admin/sections/hero", ADMIN, "title=")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_text(response).await;
        assert!(html.contains("Title is required"));
        assert!(html.contains("name=\"background_image_url\""));
        Ok(())
    }

    #[tokio::test]
    async fn test_settings_api() -> Result<()> {
        let (router, _db) = app().await?;

        let anonymous = send(&router, get("/api/admin/site-settings")).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(anonymous).await.contains("\"error\""));

        let put = Request::builder()
            .method("PUT")
            .uri("/api/admin/site-settings")
            .header(header::AUTHORIZATION, ADMIN)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r##"{"company_name":"Acme","primary_color":"#ff0000"}"##))
            .unwrap();
        let response = send(&router, put).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await)?;
        assert_eq!(json["company_name"], "Acme");
        assert_eq!(json["secondary_color"], "#1e40af");

        let bad = Request::builder()
            .method("PUT")
            .uri("/api/admin/site-settings")
            .header(header::AUTHORIZATION, ADMIN)
            .body(Body::from("[1, 2]"))
            .unwrap();
        let response = send(&router, bad).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[derive(Default)]
    struct RecordingTransport(Mutex<Vec<ContactSubmission>>);

    impl ContactTransport for RecordingTransport {
        fn deliver(&self, submission: &ContactSubmission) -> Result<()> {
            self.0.lock().unwrap().push(submission.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_contact_form_redirects_with_status() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let transport = Arc::new(RecordingTransport::default());
        let state = AppState::new(db, test_config()).with_contact_transport(transport.clone());
        let router = build_router(state);

        let ok = send(
            &router,
            form_post(
                "/contact",
                "",
                "name=Ada&email=ada%40example.com&subject=Hi&message=Hello",
            ),
        )
        .await;
        assert_eq!(ok.headers()[header::LOCATION], "/?contact=sent#contact");
        assert_eq!(transport.0.lock().unwrap().len(), 1);

        let bad = send(&router, form_post("/contact", "", "name=Ada&email=nope")).await;
        assert_eq!(bad.headers()[header::LOCATION], "/?contact=error#contact");
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_article_is_not_found() -> Result<()> {
        let (router, _db) = app().await?;
        let response = send(&router, get("/news/missing")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }
}
