use serde::{Deserialize, Serialize};

pub mod client;
pub mod controller;
pub mod error;
pub mod image;
pub mod labels;
pub mod session;

pub use client::AiClient;
pub use controller::WizardController;
pub use error::{ClientError, WizardError};
pub use image::{ImageData, SegmentedImage};
pub use session::{RequestId, Session, SourceImage, WizardStep};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IdentifyResponse {
    pub objects: Vec<String>,
}

/// Isolated object returned by `/api/segment`; `data` is base64.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SegmentResponse {
    pub label: String,
    pub mime_type: String,
    pub data: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub gemini_configured: bool,
}
