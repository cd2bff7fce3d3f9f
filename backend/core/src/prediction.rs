use serde::Serialize;

use crate::advice::AdviceRecord;
use crate::error::KrishiError;
use crate::label::DiseaseLabel;

/// The classifier's verdict for one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: DiseaseLabel,
    /// Probability of `label`, clamped into `[0, 1]`.
    pub confidence: f32,
}

impl PredictionResult {
    pub fn new(label: DiseaseLabel, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self { label, confidence }
    }

    /// Reduce a probability vector in classifier order to its arg-max.
    ///
    /// The vector must hold exactly one finite score per label. Ties go to the
    /// lowest index.
    pub fn from_scores(scores: &[f32]) -> Result<Self, KrishiError> {
        if scores.len() != DiseaseLabel::COUNT {
            return Err(KrishiError::InvalidPrediction(format!(
                "expected {} scores, got {}",
                DiseaseLabel::COUNT,
                scores.len()
            )));
        }
        if let Some(pos) = scores.iter().position(|s| !s.is_finite()) {
            return Err(KrishiError::InvalidPrediction(format!(
                "score at index {pos} is not finite"
            )));
        }

        let (best, score) = scores
            .iter()
            .copied()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |(best, max), (i, s)| {
                if s > max {
                    (i, s)
                } else {
                    (best, max)
                }
            });

        let label = DiseaseLabel::from_index(best).ok_or_else(|| {
            KrishiError::InvalidPrediction(format!("no label at index {best}"))
        })?;
        Ok(Self::new(label, score))
    }

    pub fn advice(&self) -> &'static AdviceRecord {
        self.label.advice()
    }
}
