//! Provider-agnostic analysis request

use super::error::DomainError;
use crate::prompt::AnalysisPrompt;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A user-submitted photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    bytes: Arc<[u8]>,
    file_name: String,
    mime_type: String,
}

impl ImageInput {
    /// Wrap raw image bytes. The MIME type is derived from the file extension.
    pub fn new(bytes: impl Into<Vec<u8>>, file_name: impl Into<String>) -> Result<Self, DomainError> {
        let bytes: Vec<u8> = bytes.into();
        if bytes.is_empty() {
            return Err(DomainError::EmptyImage);
        }
        let file_name = file_name.into();
        let mime_type = mime_type_for(&file_name).to_string();
        Ok(Self {
            bytes: bytes.into(),
            file_name,
            mime_type,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Self-contained `data:` URL embedding the image as base64
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

fn mime_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        _ => "image/jpeg",
    }
}

/// Generation parameters sent with every attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_tokens: u32,
    /// Kept low to bias providers toward deterministic phrasing
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            temperature: 0.1,
        }
    }
}

/// Image plus instructions, ready to be sent to any provider.
///
/// Immutable; built once per submission and reused across every attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    image: ImageInput,
    image_url: String,
    prompt: String,
    generation: GenerationParams,
}

impl AnalysisRequest {
    /// Pair the image with the standard analysis instructions
    pub fn new(image: ImageInput, generation: GenerationParams) -> Self {
        Self {
            image_url: image.data_url(),
            image,
            prompt: AnalysisPrompt::instructions(),
            generation,
        }
    }

    pub fn image(&self) -> &ImageInput {
        &self.image
    }

    /// The image encoded as a `data:` URL, computed once in [`Self::new`]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn generation(&self) -> GenerationParams {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_image_rejected() {
        assert_eq!(
            ImageInput::new(Vec::new(), "hair.jpg"),
            Err(DomainError::EmptyImage)
        );
    }

    #[test]
    fn test_mime_type_from_extension() {
        let png = ImageInput::new(vec![1, 2, 3], "Curls.PNG").unwrap();
        assert_eq!(png.mime_type(), "image/png");

        let unknown = ImageInput::new(vec![1, 2, 3], "upload").unwrap();
        assert_eq!(unknown.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_data_url() {
        let image = ImageInput::new(b"hair".to_vec(), "photo.jpg").unwrap();
        assert_eq!(image.data_url(), "data:image/jpeg;base64,aGFpcg==");
        assert_eq!(image.size_bytes(), 4);
    }

    #[test]
    fn test_request_carries_prompt_and_params() {
        let image = ImageInput::new(vec![0xFF, 0xD8], "photo.jpg").unwrap();
        let request = AnalysisRequest::new(image, GenerationParams::default());
        assert!(request.prompt().contains("isHairImage"));
        assert_eq!(request.generation().max_tokens, 2000);
        assert!((request.generation().temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_request_encodes_image_once() {
        let image = ImageInput::new(b"hair".to_vec(), "photo.png").unwrap();
        let request = AnalysisRequest::new(image, GenerationParams::default());
        assert_eq!(request.image_url(), "data:image/png;base64,aGFpcg==");
        assert_eq!(request.clone().image_url(), request.image_url());
    }
}
