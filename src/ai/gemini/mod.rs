pub mod client;
pub mod concepts;
pub mod image;
pub mod types;

pub use client::GeminiClient;
pub use concepts::GeminiConceptClient;
pub use image::GeminiImageModel;
