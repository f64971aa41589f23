use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value as JsonValue};

use greenloop_core::{AssetId, DomainError};
use greenloop_infra::ai::items_from_json;
use greenloop_infra::assets::{AssetUpdate, NewAsset};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_assets).post(create_asset))
        .route("/analyze", post(analyze))
        .route("/analysis", get(list_analyses))
        .route("/:id", get(get_asset).put(update_asset).delete(delete_asset))
}

fn parse_id(raw: &str) -> Result<AssetId, axum::response::Response> {
    raw.parse().map_err(errors::domain_error_to_response)
}

fn decode<T: serde::de::DeserializeOwned>(body: JsonValue) -> Result<T, axum::response::Response> {
    serde_json::from_value(body)
        .map_err(|e| errors::domain_error_to_response(DomainError::validation(e.to_string())))
}

pub async fn list_assets(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.assets.list().await {
        Ok(assets) => Json(assets).into_response(),
        Err(e) => errors::storage_error_to_response(e),
    }
}

pub async fn get_asset(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.assets.get(id).await {
        Ok(Some(asset)) => Json(asset).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", format!("asset {id} not found")),
        Err(e) => errors::storage_error_to_response(e),
    }
}

pub async fn create_asset(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<JsonValue>,
) -> axum::response::Response {
    let asset: NewAsset = match decode(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if let Err(e) = asset.validate() {
        return errors::domain_error_to_response(e);
    }

    match services.assets.create(asset).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::storage_error_to_response(e),
    }
}

pub async fn update_asset(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<JsonValue>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let update: AssetUpdate = match decode(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if let Err(e) = update.validate() {
        return errors::domain_error_to_response(e);
    }

    match services.assets.update(id, update).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => errors::storage_error_to_response(e),
    }
}

pub async fn delete_asset(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.assets.delete(id).await {
        Ok(removed) => Json(json!({ "deleted": removed.id })).into_response(),
        Err(e) => errors::storage_error_to_response(e),
    }
}

pub async fn analyze(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> axum::response::Response {
    let request = match body {
        Ok(Json(body)) => dto::AnalyzeRequest::from_body(body),
        Err(rejection) => Err(DomainError::invalid_input(rejection.body_text())),
    };
    let items = match request.and_then(|r| items_from_json(r.items)) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let outcome = services.analyzer.analyze(&items).await;
    tracing::debug!(
        items = items.len(),
        source = outcome.source.as_str(),
        "analysis served"
    );
    Json(outcome).into_response()
}

pub async fn list_analyses(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.history().list().await {
        Ok(records) => Json(records).into_response(),
        Err(e) => errors::storage_error_to_response(e),
    }
}
