use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use describer_core::prompt::{
    build_instruction, DescribeOptions, DEFAULT_DESCRIPTION_TYPE, DEFAULT_OUTPUT_LENGTH,
    DEFAULT_TONE,
};
use describer_core::validate::probe_image;
use describer_core::vision::VisionProvider;

use crate::api::DescribeResponse;
use crate::error::ApiError;

/// Uploads above this size are refused by the framework before the handler runs.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub vision: Arc<dyn VisionProvider>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/describe", post(describe))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// The one real endpoint: upload -> probe -> instruction -> model -> text.
async fn describe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DescribeResponse>, ApiError> {
    let mut image: Option<Bytes> = None;
    let mut description_type: Option<String> = None;
    let mut tone: Option<String> = None;
    let mut length: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(ApiError::internal)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => image = Some(field.bytes().await.map_err(ApiError::internal)?),
            "description_type" => {
                description_type = Some(field.text().await.map_err(ApiError::internal)?);
            }
            "tone" => tone = Some(field.text().await.map_err(ApiError::internal)?),
            "length" => length = Some(field.text().await.map_err(ApiError::internal)?),
            _ => {}
        }
    }

    // A missing file field probes as empty bytes and fails the same way.
    let image = image.unwrap_or_default();
    let format = probe_image(&image).map_err(|_| ApiError::InvalidImage)?;

    let opts = DescribeOptions {
        description_type: description_type
            .unwrap_or_else(|| DEFAULT_DESCRIPTION_TYPE.to_string()),
        tone: tone.unwrap_or_else(|| DEFAULT_TONE.to_string()),
        output_length: length.unwrap_or_else(|| DEFAULT_OUTPUT_LENGTH.to_string()),
        ..DescribeOptions::default()
    };

    info!(
        "Describe request: {} bytes of {:?}, type '{}', tone '{}', length '{}'",
        image.len(),
        format,
        opts.description_type,
        opts.tone,
        opts.output_length
    );

    let instruction = build_instruction(&opts, false);

    let description = state
        .vision
        .describe(&image, format.to_mime_type(), &instruction)
        .await?;

    Ok(Json(DescribeResponse { description }))
}
