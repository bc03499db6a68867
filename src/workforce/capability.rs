//! Worker capability model.
//!
//! Routing inside the [`Workforce`](crate::workforce::orchestrator::Workforce)
//! is driven entirely by capability tags: each worker declares the kinds of
//! subtasks it can handle, and a subtask declares the tags it requires. A
//! worker is eligible when its tag set is a superset of the required tags;
//! ties between eligible workers are broken by registration order.
//!
//! # Example
//!
//! ```rust
//! use workforce::capability::CapabilityTag;
//!
//! let tags = vec![CapabilityTag::TextSynthesis, CapabilityTag::WebLookup];
//! assert!(tags.contains(&CapabilityTag::TextSynthesis));
//!
//! // Domain-specific tags outside the built-in set
//! let custom = CapabilityTag::Custom("legal-review".into());
//! assert_eq!(custom.to_string(), "legal-review");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A label declaring what kind of subtask a worker can handle.
///
/// The built-in variants cover the specialist roles a document-producing
/// team is composed of; [`CapabilityTag::Custom`] is the escape hatch for
/// applications that define their own specialisations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityTag {
    /// Free-form narrative text generation.
    TextSynthesis,
    /// Short, catchy naming (titles, product names, headlines).
    NameGeneration,
    /// Answering with live information gathered from the web.
    WebLookup,
    /// Producing images or other generated media.
    MediaSynthesis,
    /// Application-defined capability outside the built-in set.
    Custom(String),
}

impl CapabilityTag {
    /// Stable, human-readable name used in prompts, logs, and error messages.
    pub fn display_name(&self) -> &str {
        match self {
            CapabilityTag::TextSynthesis => "text-synthesis",
            CapabilityTag::NameGeneration => "name-generation",
            CapabilityTag::WebLookup => "web-lookup",
            CapabilityTag::MediaSynthesis => "media-synthesis",
            CapabilityTag::Custom(name) => name,
        }
    }
}

impl fmt::Display for CapabilityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Render a tag list as a comma-separated string for error messages and logs.
pub(crate) fn format_tags(tags: &[CapabilityTag]) -> String {
    tags.iter()
        .map(|t| t.display_name().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_display_names() {
        assert_eq!(CapabilityTag::TextSynthesis.to_string(), "text-synthesis");
        assert_eq!(CapabilityTag::WebLookup.to_string(), "web-lookup");
        assert_eq!(
            CapabilityTag::Custom("fact-check".into()).to_string(),
            "fact-check"
        );
    }

    #[test]
    fn test_tags_are_hashable() {
        let mut set = HashSet::new();
        set.insert(CapabilityTag::TextSynthesis);
        set.insert(CapabilityTag::TextSynthesis);
        set.insert(CapabilityTag::Custom("a".into()));

        assert_eq!(set.len(), 2);
        assert!(set.contains(&CapabilityTag::TextSynthesis));
    }

    #[test]
    fn test_format_tags() {
        let tags = vec![CapabilityTag::TextSynthesis, CapabilityTag::MediaSynthesis];
        assert_eq!(format_tags(&tags), "text-synthesis, media-synthesis");
        assert_eq!(format_tags(&[]), "");
    }
}
