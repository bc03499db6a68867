//! Image generation tool backed by OpenAI's Images API.
//!
//! The worker passes a `prompt`; the tool calls the API and returns a
//! [`ToolPayload::Media`] pointing at the result. With a media directory
//! configured, the image is requested base64-encoded, decoded, and written
//! to disk under a generated filename, so the returned location is a local
//! path the final document can embed. Without one, the provider's hosted
//! URL is passed through (those URLs typically expire within an hour).
//!
//! A missing API key fails with [`ToolError::Authentication`], which a
//! worker escalates instead of retrying.

use crate::workforce::tool::{ToolBackend, ToolError, ToolMetadata, ToolParameter, ToolParameterType, ToolPayload};
use crate::workforce::tools::map_transport_error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use uuid::Uuid;

const DEFAULT_MODEL: &str = "dall-e-3";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_SIZE: &str = "1024x1024";

/// OpenAI image generation tool.
pub struct ImageGenerationTool {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    /// When set, images are decoded and saved here instead of returning
    /// short-lived hosted URLs.
    media_dir: Option<PathBuf>,
    size: String,
}

impl ImageGenerationTool {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            media_dir: None,
            size: DEFAULT_SIZE.to_string(),
        }
    }

    /// Construct with the API key from `OPENAI_API_KEY`, if set.
    pub fn from_env() -> Self {
        Self::new(std::env::var("OPENAI_API_KEY").ok())
    }

    /// Save generated images under `dir` and return local paths.
    pub fn with_media_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.media_dir = Some(dir.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the tool at an OpenAI-compatible base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Requested image dimensions, e.g. `"1024x1024"` or `"1792x1024"`.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Metadata describing this tool to workers and models.
    pub fn metadata() -> ToolMetadata {
        ToolMetadata::new(
            "generate_image",
            "Generate an image from a text prompt. Returns the location of \
             the generated image; reference it in Markdown as \
             ![description](location) so it appears in the final document.",
        )
        .with_parameter(
            ToolParameter::new("prompt", ToolParameterType::String)
                .with_description(
                    "Text description of the image. Include style, mood, and \
                     composition details for better results.",
                )
                .required(),
        )
    }
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: Option<String>,
    b64_json: Option<String>,
}

/// Pick a file extension by sniffing the image's magic bytes through
/// their base64 encoding.
fn image_extension(b64_data: &str) -> &'static str {
    if b64_data.starts_with("iVBORw0KG") {
        "png"
    } else if b64_data.starts_with("/9j/") {
        "jpg"
    } else if b64_data.starts_with("UklGRi") {
        "webp"
    } else {
        "bin"
    }
}

/// Decode standard base64, tolerating padding and embedded line breaks.
fn decode_base64(input: &str) -> Result<Vec<u8>, String> {
    let mut sextets = Vec::with_capacity(input.len());
    for &byte in input.as_bytes() {
        let value = match byte {
            b'A'..=b'Z' => byte - b'A',
            b'a'..=b'z' => byte - b'a' + 26,
            b'0'..=b'9' => byte - b'0' + 52,
            b'+' => 62,
            b'/' => 63,
            b'=' | b'\n' | b'\r' => continue,
            other => return Err(format!("invalid base64 byte 0x{:02x}", other)),
        };
        sextets.push(value);
    }

    let mut bytes = Vec::with_capacity(sextets.len() * 3 / 4);
    for chunk in sextets.chunks(4) {
        if chunk.len() >= 2 {
            bytes.push((chunk[0] << 2) | (chunk[1] >> 4));
        }
        if chunk.len() >= 3 {
            bytes.push((chunk[1] << 4) | (chunk[2] >> 2));
        }
        if chunk.len() >= 4 {
            bytes.push((chunk[2] << 6) | chunk[3]);
        }
    }
    Ok(bytes)
}

#[async_trait]
impl ToolBackend for ImageGenerationTool {
    async fn invoke(&self, arguments: Value) -> Result<ToolPayload, ToolError> {
        let prompt = match arguments.get("prompt").and_then(|v| v.as_str()) {
            Some(p) if !p.trim().is_empty() => p.trim().to_string(),
            _ => {
                return Err(ToolError::InvalidArguments(
                    "missing 'prompt' string argument".to_string(),
                ))
            }
        };
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                return Err(ToolError::Authentication(
                    "no API key configured for image generation".to_string(),
                ))
            }
        };

        let response_format = if self.media_dir.is_some() { "b64_json" } else { "url" };
        let request = ImageRequest {
            model: &self.model,
            prompt: &prompt,
            n: 1,
            size: &self.size,
            response_format,
        };
        log::debug!(
            "ImageGenerationTool: generating {} image for '{}'",
            self.size,
            prompt
        );

        let response = self
            .http
            .post(format!("{}/v1/images/generations", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            return Err(ToolError::Authentication(format!(
                "image API rejected the key (status {})",
                status
            )));
        }
        if status == 429 {
            return Err(ToolError::RateLimited);
        }
        if status >= 500 {
            return Err(ToolError::Network(format!(
                "image API returned status {}",
                status
            )));
        }
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::Unavailable(format!(
                "image API returned status {}: {}",
                status, body
            )));
        }

        let parsed: ImageResponse = response.json().await.map_err(|err| {
            ToolError::Unavailable(format!("invalid image response: {}", err))
        })?;
        let datum = match parsed.data.into_iter().next() {
            Some(datum) => datum,
            None => {
                return Err(ToolError::Unavailable(
                    "image response contained no data".to_string(),
                ))
            }
        };

        if let Some(dir) = &self.media_dir {
            let b64 = match datum.b64_json {
                Some(b64) => b64,
                None => {
                    return Err(ToolError::Unavailable(
                        "image response missing b64_json data".to_string(),
                    ))
                }
            };
            let bytes = decode_base64(&b64)
                .map_err(|err| ToolError::Unavailable(format!("invalid image data: {}", err)))?;
            let filename = format!("{}.{}", Uuid::new_v4(), image_extension(&b64));

            tokio::fs::create_dir_all(dir).await.map_err(|err| {
                ToolError::Unavailable(format!("could not create media directory: {}", err))
            })?;
            let path = dir.join(filename);
            tokio::fs::write(&path, &bytes).await.map_err(|err| {
                ToolError::Unavailable(format!("could not write image file: {}", err))
            })?;
            log::info!(
                "ImageGenerationTool: saved {} byte image to {}",
                bytes.len(),
                path.display()
            );
            Ok(ToolPayload::Media {
                location: path.to_string_lossy().into_owned(),
            })
        } else {
            match datum.url {
                Some(url) => Ok(ToolPayload::Media { location: url }),
                None => Err(ToolError::Unavailable(
                    "image response missing url".to_string(),
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_base64_known_vector() {
        assert_eq!(decode_base64("SGVsbG8gV29ybGQ=").unwrap(), b"Hello World");
    }

    #[test]
    fn test_decode_base64_tolerates_line_breaks() {
        assert_eq!(decode_base64("SGVs\nbG8g\r\nV29ybGQ=").unwrap(), b"Hello World");
    }

    #[test]
    fn test_decode_base64_rejects_garbage() {
        assert!(decode_base64("SGVs*bG8=").is_err());
    }

    #[test]
    fn test_image_extension_sniffing() {
        assert_eq!(image_extension("iVBORw0KGgoAAAANSUhEUg"), "png");
        assert_eq!(image_extension("/9j/4AAQSkZJRg"), "jpg");
        assert_eq!(image_extension("UklGRiQAAABXRUJQ"), "webp");
        assert_eq!(image_extension("aW52YWxpZA"), "bin");
    }

    #[test]
    fn test_metadata_requires_prompt() {
        let metadata = ImageGenerationTool::metadata();
        assert_eq!(metadata.name, "generate_image");
        assert_eq!(metadata.parameters[0].name, "prompt");
        assert!(metadata.parameters[0].required);
    }

    #[tokio::test]
    async fn test_missing_prompt_is_invalid_arguments() {
        let tool = ImageGenerationTool::new(Some("sk-test".to_string()));
        let err = tool.invoke(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_missing_key_is_authentication() {
        let tool = ImageGenerationTool::new(None);
        let err = tool.invoke(json!({"prompt": "a red barn"})).await.unwrap_err();
        assert!(matches!(err, ToolError::Authentication(_)));
        assert!(!err.is_transient());
    }
}
