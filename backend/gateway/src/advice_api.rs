//! Advice lookup endpoints.
//!
//!   GET /api/labels          - every label in classifier order with its advice
//!   GET /api/advice/:label   - advice for one label

use axum::{extract::Path, Json};
use krishimitra_core::{resolve, AdviceRecord, DiseaseLabel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LabelAdvice {
    pub index: usize,
    pub label: DiseaseLabel,
    pub healthy: bool,
    pub advice: &'static AdviceRecord,
}

#[derive(Debug, Serialize)]
pub struct AdviceLookup {
    pub label: String,
    /// False when the label is not one the classifier emits and the
    /// default record was returned.
    pub known: bool,
    pub advice: &'static AdviceRecord,
}

/// Handler for `GET /api/labels`.
pub async fn list_labels() -> Json<Vec<LabelAdvice>> {
    let labels = DiseaseLabel::ALL
        .iter()
        .map(|&label| LabelAdvice {
            index: label.index(),
            label,
            healthy: label.is_healthy(),
            advice: label.advice(),
        })
        .collect();
    Json(labels)
}

/// Handler for `GET /api/advice/:label`.
pub async fn get_advice(Path(label): Path<String>) -> Json<AdviceLookup> {
    let known = label.parse::<DiseaseLabel>().is_ok();
    let advice = resolve(&label);
    Json(AdviceLookup {
        label,
        known,
        advice,
    })
}
