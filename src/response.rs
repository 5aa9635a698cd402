use crate::config::HttpConfig;
use crate::params;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Freshness window for rendered images, shared by CDN and social crawlers
const IMAGE_MAX_AGE_SECS: u32 = 86_400;

pub fn build_health_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("OK")))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("OK"))))
}

/// Static usage document served at the root path.
pub fn build_usage_response() -> Response<Full<Bytes>> {
    let usage = serde_json::json!({
        "service": "og-image-server",
        "usage": "GET /<any-path>?brand=...&model=...&price=...[&trim=...][&change=...]",
        "parameters": {
            "brand": "required, vehicle brand",
            "model": "required, vehicle model",
            "price": "required, pre-formatted display price",
            "trim": "optional, trim level line",
            "change": "optional, signed percentage; leading + renders red/up, leading - renders green/down"
        },
        "response": "image/svg+xml, 1200x630",
        "example": "/vehicle?brand=Volkswagen&model=Golf&trim=1.5TSI&price=1.250.000%E2%82%BA&change=%2B5.2%25"
    });

    let json = serde_json::to_string_pretty(&usage)
        .unwrap_or_else(|_| r#"{"service":"og-image-server"}"#.to_string());

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("OK"))))
}

/// Build the image response. Cacheable by intermediaries for a day and
/// embeddable from any origin (social-media unfurlers fetch cross-site).
pub fn build_svg_response(
    svg: String,
    http_config: &HttpConfig,
) -> Result<Response<Full<Bytes>>, hyper::http::Error> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "image/svg+xml")
        .header("Cache-Control", format!("public, max-age={IMAGE_MAX_AGE_SECS}"))
        .header("Access-Control-Allow-Origin", "*")
        .header("Server", http_config.server_name.as_str())
        .body(Full::new(Bytes::from(svg)))
}

pub fn build_missing_params_response() -> Response<Full<Bytes>> {
    let body = format!(
        r#"{{"error":"Missing required parameters: {}"}}"#,
        params::REQUIRED_PARAMS.join(", ")
    );
    Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Bad Request"))))
}

pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(r#"{"error":"Internal server error"}"#)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))))
}

pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Method Not Allowed")))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Method Not Allowed"))))
}

pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", "GET, HEAD, OPTIONS")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("")))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from(""))))
}
