use std::path::PathBuf;

use axum::extract::{FromRequest, FromRequestParts, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use http::{Method, StatusCode, Uri};
use lmz_accounts::{Account, AccountStore, NewAccount};
use lmz_core::{Context, ErrorKind, ExpectedError, ResultExt};

use crate::error::ApiError;

/// JSON body extractor whose rejections render as expected errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor whose rejections render as expected errors
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Shared state for account routes
#[derive(Clone)]
pub struct AccountsState {
    pub store: AccountStore,
    pub seed_file: Option<PathBuf>,
}

/// Routes for the account directory
pub fn account_router(state: AccountsState) -> Router {
    Router::new()
        .route("/v1/accounts", get(list_accounts).post(create_account))
        .route("/v1/accounts/reload", post(reload_accounts))
        .route("/v1/accounts/{id}", get(get_account).delete(delete_account))
        .with_state(state)
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Fallback for known paths hit with an unsupported method
pub async fn method_not_allowed_fallback(method: Method, uri: Uri) -> ApiError {
    ExpectedError::new(
        ErrorKind::MethodNotAllowed,
        "method not allowed",
        Context::new().with("method", method.as_str()).with("path", uri.path()),
    )
    .into()
}

/// Fallback for unmatched paths
pub async fn not_found_fallback(uri: Uri) -> ApiError {
    ExpectedError::not_found("route not found")
        .with_context("path", uri.path())
        .into()
}

async fn list_accounts(State(state): State<AccountsState>) -> Json<Vec<Account>> {
    Json(state.store.list().await)
}

async fn get_account(
    State(state): State<AccountsState>,
    ApiPath(raw_id): ApiPath<String>,
) -> Result<Json<Account>, ApiError> {
    let id = parse_id(&raw_id)?;
    Ok(Json(state.store.get(id).await?))
}

async fn create_account(
    State(state): State<AccountsState>,
    ApiJson(request): ApiJson<NewAccount>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state.store.create(request).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn delete_account(
    State(state): State<AccountsState>,
    ApiPath(raw_id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the directory with the configured seed file
async fn reload_accounts(State(state): State<AccountsState>) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(path) = state.seed_file.as_deref() else {
        return Err(ExpectedError::new(
            ErrorKind::NotFound,
            "no seed file configured",
            Context::from([("resource", "seedFile")]),
        )
        .into());
    };

    let count = state.store.reload(path).await.annotate("operation", "reload")?;
    Ok(Json(serde_json::json!({ "reloaded": count })))
}

fn parse_id(raw: &str) -> Result<u64, ExpectedError> {
    raw.parse().map_err(|_| {
        ExpectedError::invalid("account id must be a non-negative integer")
            .with_context("field", "id")
            .with_context("value", raw)
    })
}
