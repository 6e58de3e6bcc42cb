//! Front matter splitting and parsing.
//!
//! Documents may start with a TOML table fenced by `+++` lines. `---` fences
//! are accepted too, but the content between them is still TOML. YAML front
//! matter is not supported and fails with an error that says so:
//!
//! ```text
//! +++
//! title = "Redaction Studio"
//! role = "Lead Product Designer"
//! timeline = "2023 – 2024"
//! description = "An AI-assisted rebuild of the redaction workflow."
//! +++
//!
//! ## Overview
//! ...
//! ```
//!
//! A document without an opening fence has empty front matter and the whole
//! file as its body.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter opened with `{0}` is never closed")]
    Unterminated(&'static str),
    #[error("front matter is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("front matter fenced by `---` must be TOML, not YAML: {0}")]
    DashFencedToml(toml::de::Error),
}

/// Metadata block at the top of a document.
///
/// Every field is optional; callers apply their own fallbacks. Keys other than
/// the four known ones are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten, default, skip_serializing_if = "toml::Table::is_empty")]
    pub extra: toml::Table,
}

impl FrontMatter {
    /// String value of an extra key, if present and a string.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(toml::Value::as_str)
    }
}

/// A document split into its front matter and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<'a> {
    pub front_matter: FrontMatter,
    pub body: &'a str,
    /// 1-based line number of the first body line, for error reporting.
    pub body_line: usize,
}

const FENCES: &[&str] = &["+++", "---"];

/// Split `source` into front matter and body.
pub fn split(source: &str) -> Result<Split<'_>, FrontMatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let first_line_end = source.find('\n').unwrap_or(source.len());
    let first_line = source[..first_line_end].trim_end();
    let Some(&fence) = FENCES.iter().find(|&&f| f == first_line) else {
        return Ok(Split {
            front_matter: FrontMatter::default(),
            body: source,
            body_line: 1,
        });
    };

    let rest = source.get(first_line_end + 1..).unwrap_or("");
    let mut offset = 0;
    for (idx, line) in rest.split_inclusive('\n').enumerate() {
        if line.trim_end() == fence {
            let toml_src = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let front_matter: FrontMatter = match toml::from_str(toml_src) {
                Ok(front_matter) => front_matter,
                Err(err) if fence == "---" => return Err(FrontMatterError::DashFencedToml(err)),
                Err(err) => return Err(err.into()),
            };
            return Ok(Split {
                front_matter,
                body,
                // opening fence + front matter lines + closing fence
                body_line: idx + 3,
            });
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated(fence))
}
