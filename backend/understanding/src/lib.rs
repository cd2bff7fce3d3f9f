//! Leaf image classification.
//!
//! The model itself lives outside this process. This crate holds the
//! [`Classifier`] seam and its two implementations: a TensorFlow Serving
//! client and a fixed-answer stand-in.

pub mod classifier;
pub mod remote;

pub use classifier::{Classifier, StaticClassifier};
pub use remote::{build_request, parse_scores, RemoteClassifier, DEFAULT_TIMEOUT};
