//! Shared types used across pipeline stages.
//!
//! These types are serialized to JSON between stages (scan → generate) and
//! must be identical on both sides of the manifest.

use crate::config::SiteConfig;
use crate::document::Document;
use crate::frontmatter::FrontMatter;
use serde::{Deserialize, Serialize};

/// Listing entry for one case study.
///
/// Built from the project folder and its front matter. Missing front matter
/// fields fall back to the slug (title) or the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub slug: String,
    pub title: String,
    pub role: String,
    pub timeline: String,
    pub description: String,
    /// Site path of the thumbnail, set only when the file exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Number prefix of the folder, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl ProjectSummary {
    pub fn from_front_matter(
        slug: &str,
        order: Option<u32>,
        front_matter: &FrontMatter,
        thumbnail: Option<String>,
    ) -> Self {
        let or_empty = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            slug: slug.to_string(),
            title: front_matter
                .title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| slug.to_string()),
            role: or_empty(&front_matter.role),
            timeline: or_empty(&front_matter.timeline),
            description: or_empty(&front_matter.description),
            thumbnail,
            order,
        }
    }

    /// Site path of the project page.
    pub fn url(&self) -> String {
        format!("/project/{}/", self.slug)
    }
}

/// A case study with its parsed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(flatten)]
    pub summary: ProjectSummary,
    pub document: Document,
    /// Folder path relative to the content root, e.g. `projects/010-redaction`.
    pub source_dir: String,
    /// Resolved config when the project folder has its own `config.toml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SiteConfig>,
}

/// A standalone page from a markdown file in the content root
/// (`resume.md`, `intro.md`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Front matter title, or the fallback supplied by the caller.
    pub title: String,
    pub front_matter: FrontMatter,
    pub document: Document,
}
