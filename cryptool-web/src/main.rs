#![deny(missing_docs)]
//! A web server exposing the cryptool operations as JSON endpoints.

use axum::{
    Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    response::Json,
    routing::{get, post},
};
use cryptool_core::{Config, Dispatcher, Envelope, Operation, OperationRequest};
use local_ip_address::local_ip;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

const DEFAULT_PORT: u16 = 5000;
const PORT_VAR: &str = "CRYPTOOL_PORT";

/// Slack on top of the encoded input for the other JSON fields.
const BODY_OVERHEAD: usize = 64 * 1024;
/// Worst-case growth of one input byte inside a JSON string (`\u0000`).
/// Base64 file data (4/3) always fits within this.
const JSON_ESCAPE_FACTOR: usize = 6;

/// Shared application state
struct AppState {
    dispatcher: Dispatcher,
}

#[derive(Serialize)]
struct ApiStatus {
    success: bool,
    message: &'static str,
    timestamp: f64,
    endpoints: Vec<&'static str>,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::from_env();
    let port = port_from(env::var(PORT_VAR).ok());
    info!(
        "RSA keys: {} bits, input limit: {} bytes",
        config.rsa_key_bits, config.max_input_bytes
    );

    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("listening on:");
    match local_ip() {
        Ok(my_local_ip) => println!("  - http://{my_local_ip}:{port}/api/test"),
        Err(e) => warn!("Could not determine the local IP address: {e}"),
    }
    println!("  - http://127.0.0.1:{port}/api/test");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}

fn port_from(value: Option<String>) -> u16 {
    match value {
        None => DEFAULT_PORT,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {PORT_VAR}={raw:?}: not a port number, using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
    }
}

/// Builds the router: one POST route per operation plus the status route.
fn router(config: Config) -> Router {
    let body_limit = body_limit(config.max_input_bytes);
    let app_state = Arc::new(AppState {
        dispatcher: Dispatcher::new(config),
    });

    let mut app = Router::new().route("/api/test", get(status_handler));
    for operation in Operation::ALL {
        app = app.route(
            &format!("/api/{}", operation.endpoint()),
            post(
                move |state: State<Arc<AppState>>,
                      payload: Result<Json<OperationRequest>, JsonRejection>| {
                    operation_handler(operation, state, payload)
                },
            ),
        );
    }

    app.with_state(app_state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
}

/// Largest JSON body that can still carry `max_input_bytes` of input, however
/// it is encoded, so oversized input is reported by the dispatcher rather
/// than rejected by the body limit.
const fn body_limit(max_input_bytes: usize) -> usize {
    max_input_bytes
        .saturating_mul(JSON_ESCAPE_FACTOR)
        .saturating_add(BODY_OVERHEAD)
}

/// Runs one operation. Every outcome, including an unreadable body, is a 200
/// carrying an envelope.
async fn operation_handler(
    operation: Operation,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OperationRequest>, JsonRejection>,
) -> Json<Envelope> {
    let request_id = Uuid::new_v4();
    let endpoint = operation.endpoint();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("[{request_id}] /api/{endpoint}: rejected body: {rejection}");
            return Json(Envelope::failure(format!(
                "Invalid request body: {}",
                rejection.body_text()
            )));
        }
    };
    info!(
        "[{request_id}] /api/{endpoint}: '{}' ({} bytes declared)",
        request.name, request.size
    );

    let dispatcher = state.dispatcher.clone();
    let envelope = match tokio::task::spawn_blocking(move || {
        dispatcher.dispatch(operation, &request).to_envelope()
    })
    .await
    {
        Ok(envelope) => envelope,
        Err(e) => {
            error!("[{request_id}] /api/{endpoint}: worker failed: {e}");
            Envelope::failure(format!("Internal error: {e}"))
        }
    };

    debug!("[{request_id}] /api/{endpoint}: success={}", envelope.success);
    Json(envelope)
}

/// Reports that the API is up and which operations it serves.
async fn status_handler() -> Json<ApiStatus> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64());
    Json(ApiStatus {
        success: true,
        message: "API is working",
        timestamp,
        endpoints: Operation::ALL.iter().map(|op| op.endpoint()).collect(),
    })
}
