//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml` files. Configuration
//! is layered: stock defaults are overridden by the content root's
//! `config.toml`, which in turn can be overridden per case study by a
//! `config.toml` inside the project folder.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml                  # Root config (overrides stock defaults)
//! └── projects/
//!     └── 010-redaction-studio/
//!         ├── config.toml          # Project config (overrides root, this page only)
//!         └── index.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Design Portfolio"
//! description = "Product Design Portfolio - UX/UI Case Studies"
//! author = ""
//! email = "hello@example.com"
//! linkedin = "https://linkedin.com"
//! footer = "All rights reserved."
//!
//! [home]
//! # featured = "redaction-studio"   # slug; defaults to the first project
//!
//! [widgets]
//! compare_interval_ms = 6000
//! quote_interval_ms = 5500
//!
//! [colors]
//! background = "#0a0a0b"
//! surface = "#121214"
//! surface_elevated = "#1a1a1d"
//! border = "rgba(255, 255, 255, 0.08)"
//! text_primary = "#fafafa"
//! text_secondary = "rgba(250, 250, 250, 0.7)"
//! text_muted = "rgba(250, 250, 250, 0.45)"
//! accent = "#FEC62E"
//! accent_hover = "#E6A817"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want:
//!
//! ```toml
//! [colors]
//! accent = "#7dd3fc"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::is_valid_slug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity and contact details shown in headers and footers.
    pub site: SiteInfo,
    /// Home page layout.
    pub home: HomeConfig,
    /// Widget timing defaults.
    pub widgets: WidgetConfig,
    /// Dark theme palette.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.widgets.compare_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "widgets.compare_interval_ms must be positive".into(),
            ));
        }
        if self.widgets.quote_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "widgets.quote_interval_ms must be positive".into(),
            ));
        }
        if let Some(featured) = &self.home.featured
            && !is_valid_slug(featured)
        {
            return Err(ConfigError::Validation(format!(
                "home.featured is not a valid slug: {featured:?}"
            )));
        }
        for (name, value) in self.colors.entries() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "colors.{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    pub description: String,
    /// Name shown in the footer copyright line.
    pub author: String,
    /// Contact address for the "Get in touch" links.
    pub email: String,
    pub linkedin: String,
    pub footer: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Design Portfolio".to_string(),
            description: "Product Design Portfolio - UX/UI Case Studies".to_string(),
            author: String::new(),
            email: "hello@example.com".to_string(),
            linkedin: "https://linkedin.com".to_string(),
            footer: "All rights reserved.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    /// Slug of the project shown as the featured case study.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    /// Autoplay interval for comparison carousels without their own.
    pub compare_interval_ms: u64,
    /// Rotation interval for quote blocks without their own.
    pub quote_interval_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            compare_interval_ms: 6000,
            quote_interval_ms: 5500,
        }
    }
}

/// Palette for the dark theme. Any CSS color value is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub background: String,
    pub surface: String,
    pub surface_elevated: String,
    pub border: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub text_muted: String,
    pub accent: String,
    pub accent_hover: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#0a0a0b".to_string(),
            surface: "#121214".to_string(),
            surface_elevated: "#1a1a1d".to_string(),
            border: "rgba(255, 255, 255, 0.08)".to_string(),
            text_primary: "#fafafa".to_string(),
            text_secondary: "rgba(250, 250, 250, 0.7)".to_string(),
            text_muted: "rgba(250, 250, 250, 0.45)".to_string(),
            accent: "#FEC62E".to_string(),
            accent_hover: "#E6A817".to_string(),
        }
    }
}

impl ColorConfig {
    /// Every color with its config key, in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("background", &self.background),
            ("surface", &self.surface),
            ("surface_elevated", &self.surface_elevated),
            ("border", &self.border),
            ("text_primary", &self.text_primary),
            ("text_secondary", &self.text_secondary),
            ("text_muted", &self.text_muted),
            ("accent", &self.accent),
            ("accent_hover", &self.accent_hover),
        ]
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Resolve a project's config: its own `config.toml` merged over the
/// already-resolved site config.
///
/// Returns `Ok(None)` when the project has no config file of its own.
pub fn load_project_config(
    site: &SiteConfig,
    project_dir: &Path,
) -> Result<Option<SiteConfig>, ConfigError> {
    let Some(overlay) = load_raw_config(project_dir)? else {
        return Ok(None);
    };
    let base = toml::Value::try_from(site)?;
    resolve_config(base, Some(overlay)).map(Some)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Casebook Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Config files can be placed at two levels:
#   content/config.toml                          -> site (overrides stock defaults)
#   content/projects/010-my-project/config.toml  -> one case study (overrides site)
#
# Each level only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Browser title and meta description.
title = "Design Portfolio"
description = "Product Design Portfolio - UX/UI Case Studies"

# Name in the footer copyright line (empty = no name).
author = ""

# Contact links used by the header and the "Get in touch" call to action.
email = "hello@example.com"
linkedin = "https://linkedin.com"

# Footer text after the copyright year.
footer = "All rights reserved."

# ---------------------------------------------------------------------------
# Home page
# ---------------------------------------------------------------------------
[home]
# Slug of the featured case study. Defaults to the first project.
# featured = "redaction-studio"

# ---------------------------------------------------------------------------
# Widgets
# ---------------------------------------------------------------------------
[widgets]
# Autoplay interval for before/after carousels, in milliseconds.
# A `compare` block's own interval_ms takes precedence.
compare_interval_ms = 6000

# Rotation interval for quote blocks, in milliseconds.
quote_interval_ms = 5500

# ---------------------------------------------------------------------------
# Colors (any CSS color value)
# ---------------------------------------------------------------------------
[colors]
background = "#0a0a0b"
surface = "#121214"
surface_elevated = "#1a1a1d"
border = "rgba(255, 255, 255, 0.08)"
text_primary = "#fafafa"
text_secondary = "rgba(250, 250, 250, 0.7)"
text_muted = "rgba(250, 250, 250, 0.45)"
accent = "#FEC62E"
accent_hover = "#E6A817"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in colors.entries() {
        css.push_str(&format!("    --color-{}: {value};\n", name.replace('_', "-")));
    }
    css.push('}');
    css
}
