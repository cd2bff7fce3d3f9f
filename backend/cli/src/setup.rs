//! Wiring shared by the commands: config location, logging and classifier.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use krishimitra_config::{config_dir, config_file_path, KrishiConfig};
use krishimitra_core::{DiseaseLabel, PredictionResult};
use krishimitra_logging::LogOptions;
use krishimitra_understanding::{Classifier, RemoteClassifier, StaticClassifier};
use tracing::info;

/// `--config` if given, else the default config file.
pub fn config_path(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| config_file_path(&config_dir()))
}

pub fn log_options(config: &KrishiConfig) -> LogOptions {
    LogOptions {
        level: config.log_level().to_string(),
        dir: config.log_dir().map(PathBuf::from),
        json: config.log_json(),
    }
}

/// Build the classifier selected by `classifier.kind`.
pub fn build_classifier(config: &KrishiConfig) -> Result<Arc<dyn Classifier>> {
    let section = config.classifier.clone().unwrap_or_default();
    match config.classifier_kind() {
        "remote" => {
            let classifier = RemoteClassifier::new(
                config.classifier_endpoint(),
                section.api_key,
                Duration::from_secs(config.classifier_timeout_secs()),
            )?;
            info!(endpoint = %classifier.endpoint(), "Using remote classifier");
            Ok(Arc::new(classifier))
        }
        "static" => {
            let Some(label) = section.label else {
                bail!("classifier.label is required for the static classifier");
            };
            let label: DiseaseLabel = label
                .parse()
                .with_context(|| format!("Invalid classifier.label '{label}'"))?;
            let prediction = PredictionResult::new(label, section.confidence.unwrap_or(1.0));
            info!(label = %label, "Using static classifier");
            Ok(Arc::new(StaticClassifier::new(prediction)))
        }
        other => bail!("Unknown classifier kind '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krishimitra_config::{apply_all_defaults, ClassifierConfig};

    fn with_classifier(section: ClassifierConfig) -> KrishiConfig {
        apply_all_defaults(KrishiConfig {
            classifier: Some(section),
            ..Default::default()
        })
    }

    #[test]
    fn default_config_builds_remote_classifier() {
        let classifier = build_classifier(&apply_all_defaults(KrishiConfig::default())).unwrap();
        assert_eq!(classifier.name(), "remote");
    }

    #[tokio::test]
    async fn static_config_answers_with_its_label() {
        let classifier = build_classifier(&with_classifier(ClassifierConfig {
            kind: Some("static".into()),
            label: Some("Pepper Bacterial Spot".into()),
            confidence: Some(0.75),
            ..Default::default()
        }))
        .unwrap();
        let prediction = classifier.classify(b"leaf", "image/jpeg").await.unwrap();
        assert_eq!(prediction.label, DiseaseLabel::PepperBacterialSpot);
        assert_eq!(prediction.confidence, 0.75);
    }

    #[test]
    fn static_config_without_label_fails() {
        let result = build_classifier(&with_classifier(ClassifierConfig {
            kind: Some("static".into()),
            ..Default::default()
        }));
        assert!(result.is_err());
    }

    #[test]
    fn log_options_follow_config() {
        let mut config = apply_all_defaults(KrishiConfig::default());
        config.logging.as_mut().unwrap().dir = Some("logs".into());
        let options = log_options(&config);
        assert_eq!(options.level, "info");
        assert_eq!(options.dir, Some(PathBuf::from("logs")));
        assert!(!options.json);
    }
}
