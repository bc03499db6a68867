//! Built-in [`ToolBackend`](crate::workforce::tool::ToolBackend)
//! implementations workers can call during execution.
//!
//! - [`web_search::WebSearchTool`]: DuckDuckGo Instant Answer lookups, no
//!   API key required.
//! - [`image_generation::ImageGenerationTool`]: OpenAI image generation,
//!   saving files locally or passing through hosted URLs.

pub mod image_generation;
pub mod web_search;

pub use image_generation::ImageGenerationTool;
pub use web_search::WebSearchTool;

use crate::workforce::tool::ToolError;

/// Map a reqwest transport failure onto the retry-aware error taxonomy.
/// Timeouts and connect failures are transient; anything else is not.
pub(crate) fn map_transport_error(err: reqwest::Error) -> ToolError {
    if err.is_timeout() {
        ToolError::Timeout
    } else if err.is_connect() {
        ToolError::Network(err.to_string())
    } else {
        ToolError::Unavailable(err.to_string())
    }
}
