//! Remote model integration for Persona Studio.
//!
//! - `gemini_api`: `generateContent` wire types and the reqwest transport
//! - `instructions`: the natural-language instructions sent to the model
//! - `studio_client`: [`GeminiStudioClient`], the `TransformationService` implementation

pub mod gemini_api;
pub mod instructions;
pub mod studio_client;

pub use gemini_api::{GeminiRestApi, GenerateContentApi};
pub use studio_client::GeminiStudioClient;
