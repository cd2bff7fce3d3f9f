//! KrishiMitra Gateway HTTP API Server
//!
//! Leaf photo prediction, the farming chatbot, advice lookup and upload hosting.

pub mod advice_api;
pub mod chat_api;
pub mod error;
pub mod health_api;
pub mod home;
pub mod predict;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, start_server, GatewayState};
