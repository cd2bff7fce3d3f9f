//! Classifier trait and the fixed-answer implementation.

use async_trait::async_trait;
use krishimitra_core::{KrishiError, PredictionResult};
use tracing::debug;

/// Turns a leaf photograph into a disease prediction.
///
/// Implementations own whatever preprocessing the model needs; callers hand
/// over the encoded image bytes as uploaded.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short name for logs and the health endpoint (e.g. "remote").
    fn name(&self) -> &str;

    /// Classify one encoded image.
    async fn classify(&self, image: &[u8], mime_type: &str)
        -> Result<PredictionResult, KrishiError>;
}

/// Always answers with the same prediction.
///
/// Used for offline runs without a model server and in tests.
#[derive(Debug, Clone)]
pub struct StaticClassifier {
    prediction: PredictionResult,
}

impl StaticClassifier {
    pub fn new(prediction: PredictionResult) -> Self {
        Self { prediction }
    }
}

#[async_trait]
impl Classifier for StaticClassifier {
    fn name(&self) -> &str {
        "static"
    }

    async fn classify(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<PredictionResult, KrishiError> {
        debug!(bytes = image.len(), mime = mime_type, label = %self.prediction.label, "Static classification");
        Ok(self.prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krishimitra_core::DiseaseLabel;

    #[tokio::test]
    async fn static_classifier_returns_fixed_prediction() {
        let expected = PredictionResult::new(DiseaseLabel::PotatoEarlyBlight, 0.72);
        let classifier = StaticClassifier::new(expected);
        let got = classifier.classify(b"not really a jpeg", "image/jpeg").await.unwrap();
        assert_eq!(got, expected);
        assert_eq!(classifier.name(), "static");
    }
}
