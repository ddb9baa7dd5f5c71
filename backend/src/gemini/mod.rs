pub mod gemini_service;
pub mod models;

pub use gemini_service::{GeminiError, GeminiService};
