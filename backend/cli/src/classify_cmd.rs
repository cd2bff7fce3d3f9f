//! `krishimitra classify <image>`: run the configured classifier on a local file.

use std::path::Path;

use anyhow::{Context, Result};
use krishimitra_config::KrishiConfig;
use krishimitra_core::{AdviceRecord, DiseaseLabel};
use krishimitra_media::validate_upload;
use serde::Serialize;

use crate::setup::build_classifier;

#[derive(Debug, Serialize)]
struct ClassifyReport<'a> {
    image: &'a str,
    disease: DiseaseLabel,
    confidence: f32,
    advice: &'static AdviceRecord,
}

pub async fn run(config: &KrishiConfig, image: &Path) -> Result<()> {
    let data = tokio::fs::read(image)
        .await
        .with_context(|| format!("Failed to read {}", image.display()))?;
    let file_name = image.file_name().and_then(|n| n.to_str());
    let mime_type = validate_upload(file_name, &data)?;

    let classifier = build_classifier(config)?;
    let prediction = classifier.classify(&data, mime_type).await?;

    let path = image.display().to_string();
    let report = ClassifyReport {
        image: &path,
        disease: prediction.label,
        confidence: prediction.confidence,
        advice: prediction.advice(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
