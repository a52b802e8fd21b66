use std::path::Path;
use std::sync::Arc;

use axum::{extract::Multipart, response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::infra::{config::Config, error::ApiError};
use crate::modules::rand::generate_random_string;

/// Accepts a single image under the `file` multipart field and returns the
/// URL it will be served from, for inline embedding in markdown content.
pub async fn upload_image(
    Extension(config): Extension<Arc<Config>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::MalformedPayload)?
    {
        if field.name() != Some("file") {
            continue;
        }

        if !field
            .content_type()
            .is_some_and(|content_type| content_type.starts_with("image/"))
        {
            return Err(ApiError::Validation(vec!["file must be an image".to_string()]));
        }

        let extension = field
            .file_name()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_else(|| "png".to_string());

        let data = field.bytes().await.map_err(|_| ApiError::MalformedPayload)?;

        let filename = format!("{}.{extension}", generate_random_string(16));
        tokio::fs::create_dir_all(&config.upload_dir).await?;
        tokio::fs::write(Path::new(&config.upload_dir).join(&filename), &data).await?;

        return Ok(Json(json!({ "url": format!("/uploads/{filename}") })));
    }

    Err(ApiError::Validation(vec!["file".to_string()]))
}
