//! `tiny_http` server adapter
//!
//! Handles routing, body parsing, and response conversion for `tiny_http`.

use std::io::{Cursor, Read as _};

use serde::{Serialize, de::DeserializeOwned};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use herbtrace::api::{
    self, ApiError, ApiResponse, CreateBatchRequest, ErrorCode, RecordEventRequest, ScanRequest,
};
use herbtrace::core::models::BatchStatus;
use herbtrace::core::services::Ledger;

type HttpResponse = Response<Cursor<Vec<u8>>>;

/// Serve the API until the process is stopped
pub fn serve(ledger: &Ledger, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let server = Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?;

    log::info!("Listening on http://{addr}");
    println!("herbtrace API listening on http://{addr}");
    println!("Press Ctrl+C to stop");

    for mut request in server.incoming_requests() {
        log::debug!("{} {}", request.method(), request.url());
        let response = handle_request(ledger, &mut request);
        if let Err(e) = request.respond(response) {
            log::warn!("Failed to send response: {e}");
        }
    }

    Ok(())
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Route a request to a page, the QR landing view, or the API
pub fn handle_request(ledger: &Ledger, request: &mut Request) -> HttpResponse {
    let url = request.url().to_string();
    let (path, query) = url.split_once('?').unwrap_or((&url, ""));

    if *request.method() == Method::Get {
        if path == "/" {
            return html_response(INDEX_HTML);
        }
        // QR codes point here
        if path.starts_with("/verify/") {
            let req = ScanRequest {
                payload: path.to_string(),
            };
            return handle_result(api::scan(ledger, &req));
        }
    }

    if path == "/api" || path.starts_with("/api/") {
        return handle_api_request(ledger, request, path, query);
    }

    not_found_response(&format!("Not found: {path}"))
}

/// Handle an API request and return a response
///
/// Supports both `/api/v1/...` and `/api/...`.
fn handle_api_request(
    ledger: &Ledger,
    request: &mut Request,
    path: &str,
    query: &str,
) -> HttpResponse {
    let method = request.method().clone();
    let api_path = path
        .strip_prefix("/api/v1")
        .or_else(|| path.strip_prefix("/api"))
        .unwrap_or(path);

    match (&method, api_path) {
        (&Method::Get, "/status") => handle_result(api::get_status(ledger)),
        (&Method::Get, "/batches") => match status_filter(query) {
            Ok(status) => handle_result(api::list_batches_with_status(ledger, status)),
            Err(e) => error_response(&e),
        },
        (&Method::Get, "/herbs") => success_response(api::list_herbs()),
        (&Method::Get, "/roles") => success_response(api::list_roles()),

        (&Method::Post, "/batches") => match read_json_body::<CreateBatchRequest>(request) {
            Ok(req) => handle_result(api::create_batch(ledger, &req)),
            Err(e) => error_response(&e),
        },

        (&Method::Post, "/scan") => match read_json_body::<ScanRequest>(request) {
            Ok(req) => handle_result(api::scan(ledger, &req)),
            Err(e) => error_response(&e),
        },

        _ => match batch_route(api_path) {
            Some((id, None)) if method == Method::Get => handle_result(api::get_batch(ledger, id)),
            Some((id, Some("events"))) if method == Method::Post => {
                match read_json_body::<RecordEventRequest>(request) {
                    Ok(req) => handle_result(api::record_event(ledger, id, &req)),
                    Err(e) => error_response(&e),
                }
            },
            Some((id, Some(action))) if method == Method::Get => match action {
                "verify" => handle_result(api::verify_batch(ledger, id)),
                "report" => handle_result(api::get_report(ledger, id)),
                "timeline" => handle_result(api::get_timeline(ledger, id)),
                "map" => handle_result(api::get_map(ledger, id)),
                "qr" => handle_result(api::get_qr(ledger, id)),
                _ => not_found_response(&format!("API endpoint not found: {method} {api_path}")),
            },
            _ => not_found_response(&format!("API endpoint not found: {method} {api_path}")),
        },
    }
}

/// Parse the optional `status` query parameter
fn status_filter(query: &str) -> Result<Option<BatchStatus>, ApiError> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("status="))
        .map(|value| value.parse::<BatchStatus>().map_err(ApiError::bad_request))
        .transpose()
}

/// Split `/batches/{id}[/{action}]` into its parts
fn batch_route(api_path: &str) -> Option<(&str, Option<&str>)> {
    let rest = api_path.strip_prefix("/batches/")?;
    let mut parts = rest.splitn(2, '/');
    let id = parts.next().filter(|id| !id.is_empty())?;
    match parts.next() {
        None | Some("") => Some((id, None)),
        Some(action) if !action.contains('/') => Some((id, Some(action))),
        Some(_) => None,
    }
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read and parse JSON body from request
fn read_json_body<T: DeserializeOwned>(request: &mut Request) -> Result<T, ApiError> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;

    serde_json::from_str(&body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to an HTTP response
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => {
            if e.status_code() >= 500 {
                log::error!("{e}");
            }
            error_response(&e)
        },
    }
}

/// Create a successful JSON response
fn success_response<T: Serialize>(data: T) -> HttpResponse {
    let response = ApiResponse::success(data);
    json_response(&response, 200)
}

/// Create an error JSON response with appropriate status code
fn error_response(error: &ApiError) -> HttpResponse {
    let response = ApiResponse::<()>::error(error);
    json_response(&response, error.status_code())
}

/// Create a 404 not found response
fn not_found_response(message: &str) -> HttpResponse {
    error_response(&ApiError::new(ErrorCode::NotFound, message))
}

/// Serialize data to JSON response with status code
fn json_response<T: Serialize>(data: &T, status: u16) -> HttpResponse {
    let json = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    with_content_type(Response::from_data(json.into_bytes()), "application/json")
        .with_status_code(StatusCode(status))
}

fn html_response(content: &str) -> HttpResponse {
    with_content_type(Response::from_data(content.as_bytes().to_vec()), "text/html; charset=utf-8")
}

fn with_content_type(response: HttpResponse, value: &str) -> HttpResponse {
    match Header::from_bytes("Content-Type", value) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>herbtrace</title>
</head>
<body>
    <h1>herbtrace</h1>
    <p>Herb batch traceability API.</p>
    <ul>
        <li><a href="/api/v1/status">/api/v1/status</a></li>
        <li><a href="/api/v1/batches">/api/v1/batches</a></li>
        <li><a href="/api/v1/herbs">/api/v1/herbs</a></li>
        <li><a href="/api/v1/roles">/api/v1/roles</a></li>
    </ul>
    <p>Scan a batch QR code or open <code>/verify/&lt;batch-id&gt;</code> to verify it.</p>
</body>
</html>
"#;
