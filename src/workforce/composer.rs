//! Artifact composition: splitting merged results into text and media blocks.
//!
//! Worker contributions are plain text that may embed markdown image
//! references (`![alt](location)`). [`Composer::compose`] turns such text
//! into an ordered, total sequence of [`Block`]s: every character of input
//! is accounted for either inside a text block or as a recognized media
//! reference. [`Composer::resolve_local_media`] then optionally checks
//! local media locations against a media directory, rewriting or dropping
//! blocks that cannot be found.
//!
//! Recognition is line-bounded: an image reference whose alt text or
//! location spans a newline is not a reference, it is ordinary text.

use std::mem;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One ordered piece of a composed artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// A span of prose, trimmed of surrounding whitespace.
    Text { text: String },
    /// A media reference extracted from `![alt](location)` syntax.
    Media { alt_text: String, location: String },
}

/// The composed output of a task: ordered blocks plus any warnings
/// collected while resolving media.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub blocks: Vec<Block>,
    /// Human-readable notes about dropped media blocks. Empty unless
    /// [`Composer::resolve_local_media`] discarded something.
    pub warnings: Vec<String>,
}

impl Artifact {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render the artifact back to markdown. Blocks are separated by blank
    /// lines; media blocks become `![alt](location)` references again.
    pub fn to_markdown(&self) -> String {
        let rendered: Vec<String> = self
            .blocks
            .iter()
            .map(|block| match block {
                Block::Text { text } => text.clone(),
                Block::Media { alt_text, location } => {
                    format!("![{}]({})", alt_text, location)
                }
            })
            .collect();
        rendered.join("\n\n")
    }
}

/// Splits merged result text into blocks and resolves media locations.
pub struct Composer;

impl Composer {
    /// Split `text` into an ordered sequence of text and media blocks.
    ///
    /// The split is total: text between, before, and after media
    /// references is preserved (trimmed; empty spans are skipped), and
    /// block order follows input order. A `sandbox:` prefix on a media
    /// location is stripped, matching the path convention some model
    /// backends use for generated files.
    pub fn compose(text: &str) -> Artifact {
        let mut blocks = Vec::new();
        // `cursor` marks the start of text not yet emitted; `scan` is the
        // search position. They diverge when a candidate reference is
        // rejected for spanning a newline.
        let mut cursor = 0usize;
        let mut scan = 0usize;

        while let Some(rel) = text[scan..].find("![") {
            let start = scan + rel;
            let alt_start = start + 2;
            let close = match text[alt_start..].find("](") {
                Some(i) => alt_start + i,
                None => break,
            };
            let loc_start = close + 2;
            let end = match text[loc_start..].find(')') {
                Some(i) => loc_start + i,
                None => break,
            };

            let alt_text = &text[alt_start..close];
            let location = &text[loc_start..end];
            if alt_text.contains('\n') || location.contains('\n') {
                scan = start + 2;
                continue;
            }

            let span = text[cursor..start].trim();
            if !span.is_empty() {
                blocks.push(Block::Text {
                    text: span.to_string(),
                });
            }

            let location = location.strip_prefix("sandbox:").unwrap_or(location);
            blocks.push(Block::Media {
                alt_text: alt_text.to_string(),
                location: location.to_string(),
            });

            cursor = end + 1;
            scan = end + 1;
        }

        let tail = text[cursor..].trim();
        if !tail.is_empty() {
            blocks.push(Block::Text {
                text: tail.to_string(),
            });
        }

        Artifact {
            blocks,
            warnings: Vec::new(),
        }
    }

    /// Check every local media location against the filesystem.
    ///
    /// Remote locations (containing `://`) and data URIs are left alone.
    /// A local location is kept as-is if the path exists; otherwise it is
    /// retried relative to `media_root` (leading slashes stripped) and
    /// rewritten to the joined path on success. Locations that resolve
    /// neither way are dropped from the artifact, each leaving a warning.
    pub fn resolve_local_media(artifact: &mut Artifact, media_root: &Path) {
        let blocks = mem::take(&mut artifact.blocks);
        for block in blocks {
            match block {
                Block::Media { alt_text, location } => {
                    if location.contains("://") || location.starts_with("data:") {
                        artifact.blocks.push(Block::Media { alt_text, location });
                        continue;
                    }
                    if Path::new(&location).exists() {
                        artifact.blocks.push(Block::Media { alt_text, location });
                        continue;
                    }
                    let joined = media_root.join(location.trim_start_matches('/'));
                    if joined.exists() {
                        artifact.blocks.push(Block::Media {
                            alt_text,
                            location: joined.to_string_lossy().into_owned(),
                        });
                    } else {
                        log::warn!(
                            "Dropping media block '{}': '{}' not found",
                            alt_text,
                            location
                        );
                        artifact
                            .warnings
                            .push(format!("media '{}' not found at '{}'", alt_text, location));
                    }
                }
                text_block => artifact.blocks.push(text_block),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Block {
        Block::Text {
            text: s.to_string(),
        }
    }

    fn media(alt: &str, loc: &str) -> Block {
        Block::Media {
            alt_text: alt.to_string(),
            location: loc.to_string(),
        }
    }

    #[test]
    fn test_text_media_text() {
        let artifact = Composer::compose("Intro ![Skyline](sandbox:/img/1.png) Outro");
        assert_eq!(
            artifact.blocks,
            vec![text("Intro"), media("Skyline", "/img/1.png"), text("Outro")]
        );
    }

    #[test]
    fn test_plain_text_is_one_block() {
        let artifact = Composer::compose("  Just prose, no images.  ");
        assert_eq!(artifact.blocks, vec![text("Just prose, no images.")]);
    }

    #[test]
    fn test_adjacent_media_blocks() {
        let artifact = Composer::compose("![a](1.png)![b](2.png)");
        assert_eq!(artifact.blocks, vec![media("a", "1.png"), media("b", "2.png")]);
    }

    #[test]
    fn test_unclosed_reference_stays_text() {
        let artifact = Composer::compose("Look: ![broken](no-closing");
        assert_eq!(artifact.blocks, vec![text("Look: ![broken](no-closing")]);
    }

    #[test]
    fn test_multiline_candidate_rejected() {
        let artifact = Composer::compose("before ![a](b\nc) after ![ok](x.png)");
        assert_eq!(
            artifact.blocks,
            vec![text("before ![a](b\nc) after"), media("ok", "x.png")]
        );
    }

    #[test]
    fn test_empty_input() {
        let artifact = Composer::compose("");
        assert!(artifact.is_empty());
    }

    #[test]
    fn test_remote_location_untouched_by_resolution() {
        let mut artifact = Composer::compose("![logo](https://example.com/logo.png)");
        Composer::resolve_local_media(&mut artifact, Path::new("/nonexistent"));
        assert_eq!(
            artifact.blocks,
            vec![media("logo", "https://example.com/logo.png")]
        );
        assert!(artifact.warnings.is_empty());
    }

    #[test]
    fn test_missing_local_media_dropped_with_warning() {
        let mut artifact = Composer::compose("keep ![gone](/definitely/not/here.png) this");
        Composer::resolve_local_media(&mut artifact, Path::new("/nonexistent"));
        assert_eq!(artifact.blocks, vec![text("keep"), text("this")]);
        assert_eq!(artifact.warnings.len(), 1);
        assert!(artifact.warnings[0].contains("gone"));
    }

    #[test]
    fn test_to_markdown_round_trip_shape() {
        let artifact = Composer::compose("Intro ![Skyline](/img/1.png) Outro");
        assert_eq!(artifact.to_markdown(), "Intro\n\n![Skyline](/img/1.png)\n\nOutro");
    }
}
