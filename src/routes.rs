use crate::db_storage::HumanStore;
use crate::handlers::{self, AppState, ErrorBody};
use crate::models::{Human, HumanRequest};
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Request body size limit for the humans API.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "Humans API", description = "API for managing humans"),
    paths(
        handlers::create_human,
        handlers::get_human_by_id,
        handlers::list_humans,
        handlers::update_human,
        handlers::delete_human,
    ),
    components(schemas(Human, HumanRequest, ErrorBody)),
    tags((name = "humans", description = "Human records enriched with age, gender and country"))
)]
pub struct ApiDoc;

/// Builds the full application router.
///
/// Generic over the record store so tests can drive it without Postgres.
pub fn app<S: HumanStore>(state: Arc<AppState<S>>) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/humans",
            get(handlers::list_humans::<S>).post(handlers::create_human::<S>),
        )
        .route(
            "/api/humans/:id",
            get(handlers::get_human_by_id::<S>)
                .put(handlers::update_human::<S>)
                .delete(handlers::delete_human::<S>),
        )
        // Enforced by the body extractor so an oversized body still gets the JSON envelope
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
