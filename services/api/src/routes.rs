use crate::infra::AppState;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use labelscan::analysis::{analyze, AnalysisInput, AnalysisResult, InputError};
use labelscan::error::AppError;
use serde::Deserialize;
use serde_json::json;
use std::io::Write;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct CheckRequest {
    #[serde(default)]
    pub(crate) ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) text: Option<String>,
}

impl CheckRequest {
    /// Resolves the loose two-field body into the engine's tagged input.
    /// A present-but-empty ingredient list falls through to `text` so a
    /// client can send both and let the populated one win.
    fn into_input(self) -> Result<AnalysisInput, InputError> {
        match (self.ingredients, self.text) {
            (Some(list), _) if !list.is_empty() => Ok(AnalysisInput::IngredientList(list)),
            (_, Some(text)) => Ok(AnalysisInput::FreeText(text)),
            (Some(list), None) => Ok(AnalysisInput::IngredientList(list)),
            (None, None) => Err(InputError::Missing),
        }
    }
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/ingredients/check",
            post(check_ingredients_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// One endpoint serves both intake shapes: a multipart upload with an
/// `image` field goes through the OCR collaborator first, anything else
/// is expected to be a JSON body with `ingredients` or `text`.
pub(crate) async fn check_ingredients_endpoint(
    Extension(state): Extension<AppState>,
    request: Request,
) -> Result<Json<AnalysisResult>, AppError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|_| InputError::Missing)?;
        return check_image(&state, multipart).await;
    }

    let Json(body) = Json::<CheckRequest>::from_request(request, &())
        .await
        .map_err(|_| InputError::Missing)?;
    let input = body.into_input()?;
    Ok(Json(analyze(&state.store, &input)))
}

async fn check_image(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| InputError::Missing)?
    {
        if field.name() != Some("image") {
            continue;
        }

        let bytes = field.bytes().await.map_err(|_| InputError::EmptyUpload)?;
        if bytes.is_empty() {
            return Err(InputError::EmptyUpload.into());
        }

        let mut uploaded = tempfile::NamedTempFile::new()?;
        uploaded.write_all(&bytes)?;
        let text = state.extractor.extract_text(uploaded.path())?;
        debug!(chars = text.len(), "extracted label text from upload");

        let input = AnalysisInput::FreeText(text);
        return Ok(Json(analyze(&state.store, &input)));
    }

    Err(InputError::Missing.into())
}
