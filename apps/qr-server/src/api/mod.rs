// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header::ACCESS_CONTROL_REQUEST_METHOD, Method},
    middleware::{from_fn, from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_api_key, KeyName, API_KEY_HEADER},
    config::MAX_BODY_BYTES,
    error::ApiError,
    models::{ErrorResponse, HealthResponse, UpdateTargetRequest, UpdateTargetResponse},
    state::AppState,
};

pub mod health;
pub mod qr;

pub fn router(state: AppState) -> Router {
    let main_key = from_fn_with_state(state.guard(KeyName::Main), require_api_key);

    // `route_layer` only wraps the methods registered before it, so `GET /qr`
    // and the 405 fallbacks stay public.
    let routes = Router::new()
        .route(
            "/health",
            post(health::health)
                .route_layer(main_key.clone())
                .fallback(method_not_allowed),
        )
        .route(
            "/qr",
            post(qr::update_target)
                .route_layer(main_key)
                .get(qr::redirect_to_target)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state);

    routes
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(reject_plain_options))
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

/// `CorsLayer` answers every `OPTIONS` request itself. Only real preflights
/// (carrying `Access-Control-Request-Method`) may reach it. Plain `OPTIONS`
/// is not a supported method on any route.
async fn reject_plain_options(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS
        && !request.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD)
    {
        return ApiError::method_not_allowed().into_response();
    }
    next.run(request).await
}

#[derive(OpenApi)]
#[openapi(
    paths(health::health, qr::redirect_to_target, qr::update_target),
    components(
        schemas(
            HealthResponse,
            UpdateTargetRequest,
            UpdateTargetResponse,
            ErrorResponse
        )
    ),
    modifiers(&ApiKeyAddon),
    tags(
        (name = "Health", description = "Authenticated health check"),
        (name = "QR", description = "Redirect target lookup and update")
    )
)]
pub struct ApiDoc;

struct ApiKeyAddon;

impl Modify for ApiKeyAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{
            header::{ACCESS_CONTROL_ALLOW_ORIGIN, LOCATION, ORIGIN},
            HeaderMap, Request, StatusCode,
        },
    };
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::with_key("s3cret"))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn bare(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, _, body) = send(app(), bare("GET", "/api-doc/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);

        let doc: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(doc["paths"]["/health"]["post"].is_object());
        assert!(doc["paths"]["/qr"]["post"].is_object());
    }

    #[tokio::test]
    async fn unsupported_methods_get_json_405() {
        let cases = [
            ("PUT", "/qr"),
            ("DELETE", "/qr"),
            ("PATCH", "/health"),
            ("GET", "/health"),
            ("OPTIONS", "/qr"),
            ("OPTIONS", "/health"),
        ];
        for (method, uri) in cases {
            let (status, _, body) = send(app(), bare(method, uri)).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
            assert_eq!(body, r#"{"error":"Method not allowed"}"#);
        }
    }

    #[tokio::test]
    async fn cors_preflight_is_still_answered() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/qr")
            .header(ORIGIN, "https://app.example")
            .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let (status, headers, _) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers.contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn unknown_path_gets_json_404() {
        let (status, _, body) = send(app(), bare("GET", "/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Not found"}"#);
    }

    #[tokio::test]
    async fn get_qr_needs_no_key() {
        let (status, headers, _) = send(app(), bare("GET", "/qr")).await;
        assert_eq!(status, StatusCode::FOUND);
        assert_eq!(headers[LOCATION], "https://google.com");
    }

    #[test]
    fn openapi_documents_routes_and_key_scheme() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert!(doc["paths"]["/health"]["post"]["requestBody"].is_object());
        assert!(doc["paths"]["/qr"]["get"].is_object());
        assert!(doc["paths"]["/qr"]["post"].is_object());
        assert_eq!(
            doc["components"]["securitySchemes"]["api_key"]["name"],
            "x-api-key"
        );
    }
}
