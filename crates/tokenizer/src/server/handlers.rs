//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{
    protocol::{
        DecryptDataRequest, DecryptDataResponse, EncryptDataRequest, EncryptDataResponse,
        ErrorResponse, HealthResponse, TokenResponse, TokenizeCardRequest,
    },
    ServiceError,
};
use tracing::{info, warn};

use super::state::AppState;

/// `POST /tokenize/card` — encrypt and store a PAN, returning its token.
pub async fn tokenize_card(
    State(state): State<AppState>,
    body: Result<Json<TokenizeCardRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rejection) => return rejected(rejection),
    };
    if req.pan.is_empty() {
        return error_response(ServiceError::BadRequest("pan is required".into()));
    }

    match state.service.tokenize_card(
        &req.pan,
        req.exp_month,
        req.exp_year,
        &req.cvv,
        &req.reference,
    ) {
        Ok(summary) => {
            info!(token_id = summary.token_id, brand = %summary.brand, "card tokenized");
            (StatusCode::OK, Json(TokenResponse::from(summary))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// `GET /tokens/:id` — return the last four digits and brand for a token.
///
/// The PAN is never decrypted on this path.
pub async fn get_token(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<u64>() else {
        return error_response(ServiceError::BadRequest("invalid token id".into()));
    };

    match state.service.get_token(id) {
        Ok(summary) => (StatusCode::OK, Json(TokenResponse::from(summary))).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /encrypt` — encrypt an arbitrary string with the service key.
pub async fn encrypt_data(
    State(state): State<AppState>,
    body: Result<Json<EncryptDataRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rejection) => return rejected(rejection),
    };
    if req.data.is_empty() {
        return error_response(ServiceError::BadRequest("data field is required".into()));
    }

    match state.service.encrypt_data(&req.data) {
        Ok(encrypted_data) => {
            (StatusCode::OK, Json(EncryptDataResponse { encrypted_data })).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// `POST /decrypt` — decrypt a value produced by `POST /encrypt`.
pub async fn decrypt_data(
    State(state): State<AppState>,
    body: Result<Json<DecryptDataRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rejection) => return rejected(rejection),
    };
    if req.encrypted_data.is_empty() {
        return error_response(ServiceError::BadRequest(
            "encrypted_data field is required".into(),
        ));
    }

    match state.service.decrypt_data(&req.encrypted_data) {
        Ok(data) => (StatusCode::OK, Json(DecryptDataResponse { data })).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /health` — liveness check.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        service: state.service_name.as_str().to_owned(),
        tokens_issued: state.service.tokens_issued(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Map a body rejection to a fixed message. serde's error text quotes the
/// offending value, which may be a PAN or CVV, so it is never returned.
fn rejected(rejection: JsonRejection) -> Response {
    let message = match rejection {
        JsonRejection::JsonSyntaxError(_) => "malformed JSON body",
        JsonRejection::MissingJsonContentType(_) => "expected an application/json body",
        _ => "invalid request body",
    };
    error_response(ServiceError::BadRequest(message.into()))
}

/// Render a [`ServiceError`] as a JSON error body with its mapped status.
fn error_response(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        warn!(error = %err, "request failed");
    }
    (status, Json(ErrorResponse::from(&err))).into_response()
}
