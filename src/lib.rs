//! # casebook
//!
//! A static site generator for product-design case study portfolios.
//! Each case study is a folder holding a markdown document with TOML front
//! matter and a small vocabulary of widget blocks: before/after comparison
//! carousels, rotating testimonials, timelines, KPI cards, mockups and
//! video embeds.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → parsed documents)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON holding every parsed block tree, so a
//! build can be inspected between stages.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: loads config, pages and projects into a [`scan::Manifest`] |
//! | [`generate`] | Stage 2: page templates, asset fingerprinting, media copying |
//! | [`render`] | Document → HTML, widgets rendered in their initial state |
//! | [`content`] | Content repository: project listing, lookup by slug, pages |
//! | [`document`] | Block markup parser: markdown, containers, widget fences |
//! | [`blocks`] | Typed widget payloads deserialized from TOML |
//! | [`frontmatter`] | `+++`/`---` TOML front matter splitting |
//! | [`video`] | Video provider recognition and embed URLs |
//! | [`interaction`] | Carousel, overlay and hover controllers behind the widgets |
//! | [`config`] | `config.toml` loading, merging, validation and CSS generation |
//! | [`naming`] | `NNN-slug` folder convention |
//! | [`types`] | Shared types serialized between stages |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | Tracing subscriber setup for the binary |
//!
//! # Design Decisions
//!
//! ## Widgets Are Fenced TOML
//!
//! A widget is a fenced code block whose info string names the widget and
//! whose body is TOML. Plain markdown renderers show the block as code, the
//! payload is typed and validated at scan time, and errors carry the line
//! number of the block.
//!
//! ## Controllers Own Interaction State
//!
//! Autoplay, overlays, scroll locking and hover emphasis are modelled as
//! plain state machines in [`interaction`]. The renderer uses them to emit
//! each widget's initial markup; the shipped `widgets.js` follows the same
//! transitions in the browser. Shared page resources (scroll lock, key
//! listeners, overlay layers) are reference-counted guards, so two overlays
//! open at once release the page only when both close.
//!
//! ## Overlays Live At The Document Root
//!
//! Overlay markup is collected per page and emitted under `#overlay-root`
//! as a direct child of `<body>`, never inside the widget that opens it.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are
//! checked at compile time and all interpolation is escaped.

pub mod blocks;
pub mod config;
pub mod content;
pub mod document;
pub mod frontmatter;
pub mod generate;
pub mod interaction;
pub mod logging;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod types;
pub mod video;

#[cfg(test)]
pub(crate) mod test_helpers;
