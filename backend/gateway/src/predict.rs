//! Leaf photo prediction (`POST /predict`).
//!
//! Accepts a multipart form with a `file` field, stores the photo, runs the
//! classifier and answers with the label, confidence and advice.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use krishimitra_core::{AdviceRecord, DiseaseLabel};
use krishimitra_logging::{EventLogger, ServiceEvent};
use krishimitra_media::validate_upload;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::{ApiError, NO_FILE_UPLOADED};
use crate::server::GatewayState;

/// Multipart field carrying the photo.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub disease: DiseaseLabel,
    pub confidence: f32,
    pub image_url: String,
    pub advice: &'static AdviceRecord,
}

/// An uploaded file part: client file name (possibly empty) and payload.
struct Upload {
    file_name: String,
    data: Vec<u8>,
}

/// Handler for `POST /predict`.
pub async fn predict(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let result = run_prediction(&state, &request_id, multipart).await;

    if let Err(err) = &result {
        let event = if err.status() == StatusCode::INTERNAL_SERVER_ERROR {
            ServiceEvent::Error {
                error_msg: err.message().to_string(),
            }
        } else {
            ServiceEvent::UploadRejected {
                reason: err.message().to_string(),
            }
        };
        EventLogger::log_event(&request_id, event);
    }
    result.map(Json)
}

#[instrument(skip(state, multipart))]
async fn run_prediction(
    state: &GatewayState,
    request_id: &str,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<PredictResponse, ApiError> {
    let Some(upload) = read_file_field(multipart?).await? else {
        return Err(ApiError::bad_request(NO_FILE_UPLOADED));
    };

    let mime_type = validate_upload(Some(&upload.file_name), &upload.data)?;
    let stored = state.uploads.save(&upload.file_name, &upload.data).await?;

    let prediction = state.classifier.classify(&upload.data, mime_type).await?;
    let advice = prediction.advice();

    info!(
        disease = %prediction.label,
        confidence = prediction.confidence,
        classifier = state.classifier.name(),
        "Prediction complete"
    );
    EventLogger::log_event(
        request_id,
        ServiceEvent::Prediction {
            disease: prediction.label.to_string(),
            confidence: prediction.confidence,
            urgency: advice.urgency().as_str().to_string(),
            image: stored.file_name.clone(),
        },
    );

    Ok(PredictResponse {
        success: true,
        disease: prediction.label,
        confidence: prediction.confidence,
        image_url: stored.url(),
        advice,
    })
}

/// Pull the first `file` part out of the form, skipping any other fields.
///
/// A `file` part without a `filename` parameter is a plain form value, not an
/// upload, and is skipped too.
async fn read_file_field(mut multipart: Multipart) -> Result<Option<Upload>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let data = field.bytes().await?;
        return Ok(Some(Upload {
            file_name,
            data: data.to_vec(),
        }));
    }
    Ok(None)
}
