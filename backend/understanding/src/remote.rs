//! Classifier backed by a model server speaking the TensorFlow Serving REST API.
//!
//! Request: `{"instances": [{"b64": "<image>"}]}`.
//! Response: `{"predictions": [[p0, ..., p14]]}` (row format) or
//! `{"outputs": [[...]]}` (columnar format).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use krishimitra_core::{KrishiError, PredictionResult};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::classifier::Classifier;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Model server client.
pub struct RemoteClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteClassifier {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, KrishiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| KrishiError::Classifier(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Build the predict request body for one image.
pub fn build_request(image: &[u8]) -> Value {
    json!({ "instances": [{ "b64": STANDARD.encode(image) }] })
}

/// Pull the first score row out of a predict response.
pub fn parse_scores(body: &Value) -> Result<Vec<f32>, KrishiError> {
    let rows = body
        .get("predictions")
        .or_else(|| body.get("outputs"))
        .ok_or_else(|| {
            KrishiError::InvalidPrediction("response has no predictions or outputs".into())
        })?;

    // A single-output model may return the row directly instead of a batch.
    let row = match rows.as_array().and_then(|batch| batch.first()) {
        Some(first) if first.is_array() => first,
        Some(_) => rows,
        None => {
            return Err(KrishiError::InvalidPrediction(
                "predictions are empty or not an array".into(),
            ))
        }
    };

    row.as_array()
        .ok_or_else(|| KrishiError::InvalidPrediction("prediction row is not an array".into()))?
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64().map(|f| f as f32).ok_or_else(|| {
                KrishiError::InvalidPrediction(format!("score at index {i} is not a number"))
            })
        })
        .collect()
}

#[async_trait]
impl Classifier for RemoteClassifier {
    fn name(&self) -> &str {
        "remote"
    }

    async fn classify(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<PredictionResult, KrishiError> {
        let started = Instant::now();
        debug!(endpoint = %self.endpoint, bytes = image.len(), mime = mime_type, "Sending image to model server");

        let mut request = self.client.post(&self.endpoint).json(&build_request(image));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| KrishiError::Classifier(format!("model server unreachable: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status = %status, "Model server returned an error");
            return Err(KrishiError::Classifier(format!(
                "model server returned {status}: {text}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| KrishiError::Classifier(format!("malformed model response: {e}")))?;

        let prediction = PredictionResult::from_scores(&parse_scores(&body)?)?;
        info!(
            label = %prediction.label,
            confidence = prediction.confidence,
            latency_ms = started.elapsed().as_millis() as u64,
            "Classified leaf image"
        );
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krishimitra_core::DiseaseLabel;

    fn row(index: usize) -> Vec<f64> {
        let mut scores = vec![0.0; DiseaseLabel::COUNT];
        scores[index] = 0.93;
        scores
    }

    #[test]
    fn request_carries_base64_image() {
        let body = build_request(b"leaf");
        assert_eq!(body["instances"][0]["b64"], "bGVhZg==");
    }

    #[test]
    fn parses_row_format() {
        let body = json!({ "predictions": [row(10)] });
        let scores = parse_scores(&body).unwrap();
        let prediction = PredictionResult::from_scores(&scores).unwrap();
        assert_eq!(prediction.label, DiseaseLabel::TomatoSpiderMites);
    }

    #[test]
    fn parses_columnar_format() {
        let body = json!({ "outputs": [row(0)] });
        let prediction = PredictionResult::from_scores(&parse_scores(&body).unwrap()).unwrap();
        assert_eq!(prediction.label, DiseaseLabel::PepperBacterialSpot);
    }

    #[test]
    fn accepts_unbatched_row() {
        let body = json!({ "predictions": row(14) });
        let prediction = PredictionResult::from_scores(&parse_scores(&body).unwrap()).unwrap();
        assert_eq!(prediction.label, DiseaseLabel::TomatoHealthy);
    }

    #[test]
    fn rejects_missing_predictions() {
        let err = parse_scores(&json!({ "error": "model not found" })).unwrap_err();
        assert!(matches!(err, KrishiError::InvalidPrediction(_)));
    }

    #[test]
    fn rejects_non_numeric_scores() {
        let err = parse_scores(&json!({ "predictions": [["a", "b"]] })).unwrap_err();
        assert!(err.to_string().contains("index 0"));
    }

    #[test]
    fn rejects_empty_batch() {
        assert!(parse_scores(&json!({ "predictions": [] })).is_err());
    }

    #[tokio::test]
    async fn unreachable_server_is_classifier_error() {
        let classifier = RemoteClassifier::new(
            "http://127.0.0.1:9/v1/models/plant_disease:predict",
            None,
            Duration::from_millis(500),
        )
        .unwrap();
        let err = classifier.classify(b"leaf", "image/png").await.unwrap_err();
        assert!(matches!(err, KrishiError::Classifier(_)));
    }

    /// Serve `app` on an ephemeral loopback port and return its predict URL.
    async fn spawn_model_server(app: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/models/plant_disease:predict")
    }

    fn classifier_for(endpoint: String, api_key: Option<&str>) -> RemoteClassifier {
        RemoteClassifier::new(endpoint, api_key.map(str::to_owned), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn error_status_is_classifier_error() {
        use axum::http::StatusCode;

        let app = axum::Router::new()
            .fallback(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model is loading") });
        let classifier = classifier_for(spawn_model_server(app).await, None);

        let err = classifier.classify(b"leaf", "image/jpeg").await.unwrap_err();
        match err {
            KrishiError::Classifier(msg) => {
                assert!(msg.contains("503"), "{msg}");
                assert!(msg.contains("model is loading"), "{msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_classifier_error() {
        let app = axum::Router::new().fallback(|| async { "Tomato Healthy" });
        let classifier = classifier_for(spawn_model_server(app).await, None);

        let err = classifier.classify(b"leaf", "image/jpeg").await.unwrap_err();
        match err {
            KrishiError::Classifier(msg) => {
                assert!(msg.starts_with("malformed model response"), "{msg}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn api_key_is_sent_as_bearer_token() {
        use axum::http::{header, HeaderMap, StatusCode};
        use axum::response::IntoResponse;

        let app = axum::Router::new().fallback(|headers: HeaderMap| async move {
            let authorized = headers
                .get(header::AUTHORIZATION)
                .is_some_and(|v| v == "Bearer tfs-key-123");
            if authorized {
                axum::Json(json!({ "predictions": [row(3)] })).into_response()
            } else {
                StatusCode::UNAUTHORIZED.into_response()
            }
        });
        let endpoint = spawn_model_server(app).await;

        let prediction = classifier_for(endpoint.clone(), Some("tfs-key-123"))
            .classify(b"leaf", "image/jpeg")
            .await
            .unwrap();
        assert_eq!(prediction.label, DiseaseLabel::PotatoLateBlight);

        let err = classifier_for(endpoint, None)
            .classify(b"leaf", "image/jpeg")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("401"));
    }
}
