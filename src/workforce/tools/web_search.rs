//! Web search tool backed by DuckDuckGo's Instant Answer API.
//!
//! No API key is required. The worker passes only a `query` string; the
//! tool builds the request URL itself, queries the JSON endpoint, and
//! returns a numbered list of snippets the model can cite from.
//!
//! The Instant Answer API returns an abstract plus related topics rather
//! than full result pages, which is a good fit for grounding a model
//! response without dragging whole web pages into the conversation.

use crate::workforce::tool::{ToolBackend, ToolError, ToolMetadata, ToolParameter, ToolParameterType, ToolPayload};
use crate::workforce::tools::map_transport_error;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Hard cap on results regardless of configuration.
const MAX_RESULTS_CAP: usize = 10;

/// Default number of snippets returned to the worker.
const DEFAULT_MAX_RESULTS: usize = 5;

const DEFAULT_ENDPOINT: &str = "https://api.duckduckgo.com";

/// DuckDuckGo Instant Answer search tool.
pub struct WebSearchTool {
    http: reqwest::Client,
    max_results: usize,
    endpoint: String,
}

impl WebSearchTool {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            max_results: DEFAULT_MAX_RESULTS,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Cap the number of snippets returned, clamped to 1..=10.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1).min(MAX_RESULTS_CAP);
        self
    }

    /// Point the tool at a different Instant Answer compatible endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Metadata describing this tool to workers and models.
    pub fn metadata() -> ToolMetadata {
        ToolMetadata::new(
            "web_search",
            "Search the web using DuckDuckGo. Returns a numbered list of \
             short factual snippets. Use this for current information such \
             as news, prices, and facts you are not certain about.",
        )
        .with_parameter(
            ToolParameter::new("query", ToolParameterType::String)
                .with_description("Search query string")
                .required(),
        )
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<Topic>,
}

/// One related topic. DuckDuckGo nests grouped topics one level deep
/// under `Topics`.
#[derive(Deserialize)]
struct Topic {
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "FirstURL", default)]
    first_url: String,
    #[serde(rename = "Topics", default)]
    topics: Vec<Topic>,
}

/// Flatten an Instant Answer into at most `max` snippet strings: the
/// abstract first, then related topics, then one level of grouped topics.
fn extract_snippets(answer: &InstantAnswer, max: usize) -> Vec<String> {
    let mut snippets = Vec::new();
    if !answer.abstract_text.is_empty() {
        if answer.abstract_url.is_empty() {
            snippets.push(answer.abstract_text.clone());
        } else {
            snippets.push(format!("{} ({})", answer.abstract_text, answer.abstract_url));
        }
    }
    for topic in &answer.related_topics {
        if snippets.len() >= max {
            break;
        }
        push_topic(topic, &mut snippets);
        for nested in &topic.topics {
            if snippets.len() >= max {
                break;
            }
            push_topic(nested, &mut snippets);
        }
    }
    snippets.truncate(max);
    snippets
}

fn push_topic(topic: &Topic, snippets: &mut Vec<String>) {
    if topic.text.is_empty() {
        return;
    }
    if topic.first_url.is_empty() {
        snippets.push(topic.text.clone());
    } else {
        snippets.push(format!("{} ({})", topic.text, topic.first_url));
    }
}

#[async_trait]
impl ToolBackend for WebSearchTool {
    async fn invoke(&self, arguments: Value) -> Result<ToolPayload, ToolError> {
        let query = match arguments.get("query").and_then(|v| v.as_str()) {
            Some(q) if !q.trim().is_empty() => q.trim().to_string(),
            _ => {
                return Err(ToolError::InvalidArguments(
                    "missing 'query' string argument".to_string(),
                ))
            }
        };

        let url = format!(
            "{}/?q={}&format=json&no_html=1",
            self.endpoint,
            urlencoding::encode(&query)
        );
        log::debug!("WebSearchTool: searching for '{}'", query);

        let response = self.http.get(&url).send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        if status == 429 {
            return Err(ToolError::RateLimited);
        }
        if status >= 500 {
            return Err(ToolError::Network(format!(
                "search endpoint returned status {}",
                status
            )));
        }
        if !(200..300).contains(&status) {
            return Err(ToolError::Unavailable(format!(
                "search endpoint returned status {}",
                status
            )));
        }

        let answer: InstantAnswer = response.json().await.map_err(|err| {
            ToolError::Unavailable(format!("invalid search response: {}", err))
        })?;

        let snippets = extract_snippets(&answer, self.max_results);
        if snippets.is_empty() {
            return Ok(ToolPayload::Text {
                text: format!("No results found for '{}'.", query),
            });
        }
        let lines: Vec<String> = snippets
            .iter()
            .enumerate()
            .map(|(i, snippet)| format!("{}. {}", i + 1, snippet))
            .collect();
        Ok(ToolPayload::Text {
            text: lines.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_answer() -> InstantAnswer {
        serde_json::from_value(json!({
            "AbstractText": "Oakdale is a city in Stanislaus County, California.",
            "AbstractURL": "https://en.wikipedia.org/wiki/Oakdale",
            "RelatedTopics": [
                {"Text": "Oakdale Cheese Festival", "FirstURL": "https://example.com/cheese"},
                {
                    "Name": "Nearby",
                    "Topics": [
                        {"Text": "Riverbank, California", "FirstURL": "https://example.com/riverbank"},
                        {"Text": "Escalon, California", "FirstURL": ""}
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_extract_snippets_flattens_nested_topics() {
        let snippets = extract_snippets(&sample_answer(), 10);
        assert_eq!(snippets.len(), 4);
        assert!(snippets[0].starts_with("Oakdale is a city"));
        assert!(snippets[0].contains("wikipedia.org"));
        assert_eq!(snippets[1], "Oakdale Cheese Festival (https://example.com/cheese)");
        assert_eq!(snippets[3], "Escalon, California");
    }

    #[test]
    fn test_extract_snippets_respects_cap() {
        let snippets = extract_snippets(&sample_answer(), 2);
        assert_eq!(snippets.len(), 2);
    }

    #[test]
    fn test_extract_snippets_empty_answer() {
        let answer: InstantAnswer = serde_json::from_value(json!({})).unwrap();
        assert!(extract_snippets(&answer, 5).is_empty());
    }

    #[test]
    fn test_metadata_requires_query() {
        let metadata = WebSearchTool::metadata();
        assert_eq!(metadata.name, "web_search");
        assert_eq!(metadata.parameters.len(), 1);
        assert_eq!(metadata.parameters[0].name, "query");
        assert!(metadata.parameters[0].required);
    }

    #[test]
    fn test_max_results_clamped() {
        let tool = WebSearchTool::new().with_max_results(99);
        assert_eq!(tool.max_results, MAX_RESULTS_CAP);
        let tool = WebSearchTool::new().with_max_results(0);
        assert_eq!(tool.max_results, 1);
    }

    #[tokio::test]
    async fn test_missing_query_is_invalid_arguments() {
        let tool = WebSearchTool::new();
        let err = tool.invoke(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_blank_query_is_invalid_arguments() {
        let tool = WebSearchTool::new();
        let err = tool.invoke(json!({"query": "   "})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
