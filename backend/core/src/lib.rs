//! Core domain types for KrishiMitra.
//!
//! Everything here is static: the fifteen disease labels the leaf classifier
//! can emit, the treatment advice attached to each, and the keyword chat
//! responder. No I/O happens in this crate.

pub mod advice;
pub mod chat;
pub mod error;
pub mod label;
pub mod prediction;

pub use advice::{resolve, AdviceRecord, Guidance, Urgency, DEFAULT_ADVICE};
pub use chat::{respond, ChatTopic, DEFAULT_RESPONSE};
pub use error::KrishiError;
pub use label::{DiseaseLabel, ParseLabelError};
pub use prediction::PredictionResult;
