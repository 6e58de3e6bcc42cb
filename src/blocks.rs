//! Widget block definitions.
//!
//! Each fenced widget block in a document body carries a TOML table that
//! deserializes into one of these structs. Unknown keys are rejected so a
//! typo in a field name surfaces as a document error instead of silently
//! dropping content.

use serde::{Deserialize, Serialize};

/// Full-bleed image at the top of a case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroImage {
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub tagline: Option<String>,
}

/// Muted looping background video with a click-to-watch overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroVideo {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    /// Darkening layer over the background, 0-100.
    #[serde(default = "default_overlay_opacity")]
    pub overlay_opacity: u8,
}

fn default_overlay_opacity() -> u8 {
    60
}

/// A single headline metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Kpi {
    pub metric: String,
    pub label: String,
}

/// One before/after comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonPair {
    pub before: String,
    pub after: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Bullet points; `"Label: text"` renders the label in bold.
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub rationale: Option<String>,
    /// Pairs sharing a group are labelled "Part n/m".
    #[serde(default)]
    pub group: Option<String>,
    /// Optional demo video (direct file or Dropbox link).
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Before/after carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Compare {
    /// Autoplay interval; falls back to `widgets.compare_interval_ms`.
    #[serde(default)]
    pub interval_ms: Option<u64>,
    pub pairs: Vec<ComparisonPair>,
}

impl Compare {
    /// 1-based position of `index` within its group and the group size,
    /// when the pair belongs to a group of more than one.
    pub fn group_part(&self, index: usize) -> Option<(usize, usize)> {
        let group = self.pairs.get(index)?.group.as_deref()?;
        let members: Vec<usize> = self
            .pairs
            .iter()
            .enumerate()
            .filter(|(_, p)| p.group.as_deref() == Some(group))
            .map(|(i, _)| i)
            .collect();
        if members.len() < 2 {
            return None;
        }
        let position = members.iter().position(|&i| i == index)?;
        Some((position + 1, members.len()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Quote {
    pub quote: String,
    pub source: String,
}

/// Rotating testimonial quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Quotes {
    #[serde(default)]
    pub interval_ms: Option<u64>,
    pub quotes: Vec<Quote>,
}

/// Still image with caption, zoomable to full screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MockupImage {
    pub src: String,
    pub alt: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Third-party video shown as a poster that opens a player overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoEmbed {
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Local poster image that opens a video overlay (provider or direct file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoModal {
    pub thumbnail: String,
    pub video_url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// One milestone on a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelineNode {
    pub year: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Structured detail rows rendered under the description.
    #[serde(default)]
    pub details: Vec<TimelineDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelineDetail {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timeline {
    pub nodes: Vec<TimelineNode>,
}
