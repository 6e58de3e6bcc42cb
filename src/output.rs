//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every case study is its positional index and title, with filesystem
//! paths shown as secondary context via indented `Source:` lines. This makes
//! the output readable as a portfolio inventory while still letting authors
//! trace data back to specific files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Projects
//! 001 Redaction Studio
//!     Source: projects/010-redaction-studio/
//!     Lead Product Designer • 2023 – 2024
//!     Widgets: compare ×2, kpi ×3, timeline
//! 002 side-project
//!     Source: projects/side-project/
//!     Thumbnail: missing
//!
//! Pages
//!     CV: Khue Nguyen
//!         Source: resume.md
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! CV → cv/index.html
//! 001 redaction-studio → project/redaction-studio/index.html
//! Not found → 404.html
//!
//! Generated 4 pages, 12 media files
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::document::Document;
use crate::generate::Report;
use crate::scan::{Manifest, Problem};
use crate::types::Project;
use std::collections::BTreeMap;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

/// `role • timeline`, skipping empty parts.
fn role_line(project: &Project) -> Option<String> {
    let parts: Vec<&str> = [&project.summary.role, &project.summary.timeline]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(" • "))
}

/// Widget names with repeat counts, alphabetical: `compare ×2, kpi`.
fn widget_summary(document: &Document) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for widget in document.widgets() {
        *counts.entry(widget.name()).or_default() += 1;
    }
    if counts.is_empty() {
        return None;
    }
    let parts: Vec<String> = counts
        .into_iter()
        .map(|(name, n)| match n {
            1 => name.to_string(),
            n => format!("{name} ×{n}"),
        })
        .collect();
    Some(parts.join(", "))
}

// ============================================================================
// Scan
// ============================================================================

/// Format scan output: the content inventory.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Projects".to_string()];

    if manifest.projects.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, project) in manifest.projects.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), project.summary.title));
        lines.push(format!("    Source: {}/", project.source_dir));
        if let Some(role) = role_line(project) {
            lines.push(format!("    {role}"));
        }
        if let Some(widgets) = widget_summary(&project.document) {
            lines.push(format!("    Widgets: {widgets}"));
        }
        if project.summary.thumbnail.is_none() {
            lines.push("    Thumbnail: missing".to_string());
        }
        if project.config.is_some() {
            lines.push("    Config: config.toml".to_string());
        }
    }

    let pages: Vec<(&str, &str, &str)> = [
        manifest.resume.as_ref().map(|p| ("CV", p.title.as_str(), "resume.md")),
        manifest.intro.as_ref().map(|p| ("Intro", p.title.as_str(), "intro.md")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for (label, title, source) in pages {
            if title.is_empty() {
                lines.push(format!("    {label}"));
            } else {
                lines.push(format!("    {label}: {title}"));
            }
            lines.push(format!("        Source: {source}"));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    } else {
        lines.push("    (stock defaults)".to_string());
    }
    if source_root.join("assets").is_dir() {
        lines.push("    assets/".to_string());
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the problems found by a scan.
pub fn format_problems(problems: &[Problem]) -> Vec<String> {
    if problems.is_empty() {
        return vec!["No problems found".to_string()];
    }
    let mut lines = vec![format!("{} problem(s)", problems.len())];
    lines.extend(problems.iter().map(|p| format!("    {p}")));
    lines
}

pub fn print_problems(problems: &[Problem]) {
    for line in format_problems(problems) {
        println!("{}", line);
    }
}

// ============================================================================
// List / show
// ============================================================================

/// One line per project: index, slug, title and role.
pub fn format_list(manifest: &Manifest) -> Vec<String> {
    let featured = manifest.featured().map(|p| p.summary.slug.as_str());
    manifest
        .projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let summary = &project.summary;
            let marker = if Some(summary.slug.as_str()) == featured {
                " *"
            } else {
                ""
            };
            match role_line(project) {
                Some(role) => format!(
                    "{} {}{marker}  {} ({role})",
                    format_index(i + 1),
                    summary.slug,
                    summary.title
                ),
                None => format!("{} {}{marker}  {}", format_index(i + 1), summary.slug, summary.title),
            }
        })
        .collect()
}

pub fn print_list(manifest: &Manifest) {
    for line in format_list(manifest) {
        println!("{}", line);
    }
}

/// Metadata of a single project.
pub fn format_show(project: &Project) -> Vec<String> {
    let summary = &project.summary;
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
    let mut lines = vec![
        summary.title.clone(),
        format!("    Slug: {}", summary.slug),
        format!("    URL: {}", summary.url()),
        format!("    Role: {}", or_dash(&summary.role)),
        format!("    Timeline: {}", or_dash(&summary.timeline)),
        format!(
            "    Description: {}",
            or_dash(&truncate_desc(summary.description.trim(), 80))
        ),
        format!(
            "    Thumbnail: {}",
            summary.thumbnail.as_deref().unwrap_or("missing")
        ),
        format!("    Source: {}/", project.source_dir),
    ];
    if let Some(order) = summary.order {
        lines.push(format!("    Order: {order}"));
    }
    if let Some(widgets) = widget_summary(&project.document) {
        lines.push(format!("    Widgets: {widgets}"));
    }
    lines
}

pub fn print_show(project: &Project) {
    for line in format_show(project) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format generate output: every page written, then totals.
pub fn format_generate_output(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();
    let mut project_index = 0;
    for page in &report.pages {
        let file = if page.ends_with(".html") {
            page.trim_start_matches('/').to_string()
        } else {
            format!("{}index.html", page.trim_start_matches('/'))
        };
        let label = match page.as_str() {
            "/" => "Home".to_string(),
            "/cv/" => "CV".to_string(),
            "/404.html" => "Not found".to_string(),
            other => {
                project_index += 1;
                let slug = other
                    .trim_start_matches("/project/")
                    .trim_end_matches('/');
                format!("{} {}", format_index(project_index), slug)
            }
        };
        lines.push(format!("{label} → {file}"));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages, {} media files",
        report.pages.len(),
        report.media_files
    ));
    lines
}

pub fn print_generate_output(report: &Report) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan;
    use crate::test_helpers::*;

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("hello", 10), "hello");
    }

    #[test]
    fn truncate_desc_long_counts_chars() {
        assert_eq!(truncate_desc("2023 – 2024 redesign", 6), "2023 –...");
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn scan_output_lists_projects_pages_and_config() {
        let tmp = setup_fixtures();
        let manifest = scan::scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        assert_eq!(lines[0], "Projects");
        assert_eq!(lines[1], "001 Redaction Studio");
        assert_eq!(lines[2], "    Source: projects/010-redaction-studio/");
        assert_eq!(lines[3], "    Lead Product Designer • 2023 – 2024");
        assert!(lines[4].starts_with("    Widgets: "));
        assert!(lines.contains(&"    CV: Khue Nguyen".to_string()));
        assert!(lines.contains(&"    config.toml".to_string()));
        assert!(lines.contains(&"    Thumbnail: missing".to_string()));
    }

    #[test]
    fn widget_summary_counts_repeats() {
        let document = Document::parse(
            "```kpi\nmetric = \"1\"\nlabel = \"a\"\n```\n```kpi\nmetric = \"2\"\nlabel = \"b\"\n```\n```image\nsrc = \"x\"\nalt = \"y\"\n```\n",
            1,
        )
        .unwrap();
        assert_eq!(widget_summary(&document).as_deref(), Some("image, kpi ×2"));
        assert_eq!(widget_summary(&Document::default()), None);
    }

    #[test]
    fn list_marks_featured() {
        let tmp = setup_fixtures();
        let manifest = scan::scan(tmp.path()).unwrap();
        let lines = format_list(&manifest);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("001 redaction-studio *  Redaction Studio"));
        assert!(lines[2].starts_with("003 side-project  "));
    }

    #[test]
    fn show_prints_metadata() {
        let tmp = setup_fixtures();
        let manifest = scan::scan(tmp.path()).unwrap();
        let lines = format_show(find_project(&manifest, "redaction-studio"));
        assert_eq!(lines[0], "Redaction Studio");
        assert!(lines.contains(&"    URL: /project/redaction-studio/".to_string()));
        assert!(lines.contains(&"    Order: 10".to_string()));
    }

    #[test]
    fn problems_format() {
        assert_eq!(format_problems(&[]), vec!["No problems found"]);
        let lines = format_problems(&[Problem::UnknownFeatured("ghost".into())]);
        assert_eq!(lines[0], "1 problem(s)");
        assert!(lines[1].contains("ghost"));
    }

    #[test]
    fn generate_output_labels_pages() {
        let report = Report {
            pages: vec![
                "/".into(),
                "/cv/".into(),
                "/project/redaction-studio/".into(),
                "/404.html".into(),
            ],
            media_files: 3,
            stylesheet: "/style.00000000.css".into(),
            script: "/widgets.00000000.js".into(),
        };
        let lines = format_generate_output(&report);
        assert_eq!(lines[0], "Home → index.html");
        assert_eq!(lines[1], "CV → cv/index.html");
        assert_eq!(lines[2], "001 redaction-studio → project/redaction-studio/index.html");
        assert_eq!(lines[3], "Not found → 404.html");
        assert_eq!(lines[5], "Generated 4 pages, 3 media files");
    }
}
