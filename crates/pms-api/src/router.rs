//! Route table and HTTP middleware stack

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use pms_shared::config::CorsSettings;
use pms_shared::constants::TENANT_SUBDOMAIN_HEADER;

use crate::handlers::{auth, bookings, dashboard, guests, health, properties, reports, rooms, tenants};
use crate::state::AppState;

pub fn build_router(state: AppState, cors: &CorsSettings) -> Router {
    let public_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/tenants/current", get(tenants::current));

    let protected_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::me))
        .route("/tenants", get(tenants::list).post(tenants::create))
        .route(
            "/tenants/{id}",
            get(tenants::get).put(tenants::update).delete(tenants::delete),
        )
        .route("/tenants/{id}/admin", post(tenants::create_admin))
        .route("/properties", get(properties::list).post(properties::create))
        .route(
            "/properties/{id}",
            get(properties::get).put(properties::update).delete(properties::delete),
        )
        .route("/rooms", get(rooms::list).post(rooms::create))
        .route(
            "/rooms/{id}",
            get(rooms::get).put(rooms::update).delete(rooms::delete),
        )
        .route("/guests", get(guests::list).post(guests::create))
        .route(
            "/guests/{id}",
            get(guests::get).put(guests::update).delete(guests::delete),
        )
        .route("/bookings", get(bookings::list).post(bookings::create))
        .route(
            "/bookings/{id}",
            get(bookings::get).put(bookings::update).delete(bookings::delete),
        )
        .route("/reports/guests/{id}/revenue", get(reports::guest_revenue))
        .route("/reports/properties/{id}/revenue", get(reports::property_revenue))
        .route("/reports/financial", get(reports::financial))
        .route("/dashboard/stats", get(dashboard::stats));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", public_routes.merge(protected_routes))
        .layer(cors_layer(cors))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// `*` allows any origin; entries that are not valid header values are skipped.
fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(TENANT_SUBDOMAIN_HEADER),
        ]);

    if settings.allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}
