use crate::config::{AppState, HttpConfig};
use crate::logger;
use crate::params;
use crate::render;
use crate::response;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

pub const HEALTH_PATH: &str = "/health";
pub const USAGE_PATH: &str = "/";

/// Check HTTP method and return early response if not GET/HEAD
/// Returns Some(response) for OPTIONS/405, None to continue processing
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(response::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(response::build_405_response())
        }
    }
}

/// Route the request by path, in priority order: health check, usage
/// document, then the catch-all image route. The first two never touch
/// the parser or the renderer.
pub fn route_request(
    path: &str,
    query: Option<&str>,
    http_config: &HttpConfig,
) -> Response<Full<Bytes>> {
    if path == HEALTH_PATH {
        return response::build_health_response();
    }

    if path == USAGE_PATH {
        return response::build_usage_response();
    }

    // Image route: validate once at the boundary, then render
    match params::parse(query) {
        None => response::build_missing_params_response(),
        Some(request) => {
            let svg = render::render(&request);
            match response::build_svg_response(svg, http_config) {
                Ok(resp) => resp,
                Err(e) => {
                    logger::log_error(&format!("Failed to build image response: {e}"));
                    response::build_500_response()
                }
            }
        }
    }
}

pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    if access_log {
        logger::log_request(method, uri, req.version());
    }

    // Check HTTP method
    if let Some(resp) = check_http_method(method) {
        return Ok(resp);
    }

    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let resp = route_request(uri.path(), uri.query(), &state.config.http);

    if access_log {
        let size = resp.body().size_hint().exact().unwrap_or(0);
        logger::log_response(
            resp.status().as_u16(),
            usize::try_from(size).unwrap_or(usize::MAX),
        );
    }

    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    fn test_http_config() -> HttpConfig {
        HttpConfig {
            server_name: "OgImage/1.0".to_string(),
        }
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        use http_body_util::BodyExt;
        let bytes = resp
            .into_body()
            .collect()
            .await
            .expect("body collect")
            .to_bytes();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test]
    async fn test_health_ignores_query() {
        let resp = route_request(HEALTH_PATH, Some("brand=&model="), &test_http_config());
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "OK");
    }

    #[tokio::test]
    async fn test_root_serves_usage_document() {
        let resp = route_request(USAGE_PATH, None, &test_http_config());
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        let body = body_string(resp).await;
        assert!(body.contains("\"parameters\""));
        assert!(body.contains("brand"));
    }

    #[tokio::test]
    async fn test_missing_params_is_client_error() {
        let resp = route_request(
            "/vehicle",
            Some("model=Corolla&price=1.000.000\u{20ba}"),
            &test_http_config(),
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(resp).await,
            r#"{"error":"Missing required parameters: brand, model, price"}"#
        );
    }

    #[tokio::test]
    async fn test_image_route_full_request() {
        let resp = route_request(
            "/vehicle",
            Some("brand=Volkswagen&model=Golf&trim=1.5TSI&price=1.250.000%E2%82%BA&change=+5.2%"),
            &test_http_config(),
        );
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "image/svg+xml");
        assert_eq!(resp.headers()["Cache-Control"], "public, max-age=86400");
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");

        let body = body_string(resp).await;
        assert!(body.contains(">Volkswagen Golf</text>"));
        assert!(body.contains(">1.5TSI</text>"));
        assert!(body.contains(">1.250.000\u{20ba}</text>"));
        assert!(body.contains(">\u{2191} 5.2%</text>"));
    }

    #[tokio::test]
    async fn test_image_route_without_optionals() {
        let resp = route_request(
            "/vehicle",
            Some("brand=Fiat&model=Egea&price=900.000%E2%82%BA"),
            &test_http_config(),
        );
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        assert!(body.contains(">Fiat Egea</text>"));
        assert!(!body.contains('\u{2191}'));
        assert!(!body.contains('\u{2193}'));
    }

    #[test]
    fn test_check_http_method() {
        assert!(check_http_method(&Method::GET).is_none());
        assert!(check_http_method(&Method::HEAD).is_none());

        let resp = check_http_method(&Method::OPTIONS).unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = check_http_method(&Method::POST).unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
