//! Content scanning and manifest generation.
//!
//! Stage 1 of the casebook build pipeline. Reads the content directory into a
//! [`Manifest`]: every case study with its parsed document, the optional
//! resume and intro pages, and the resolved site config. The manifest is
//! written as JSON so the generate stage (and anyone debugging a build) can
//! read it.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                      # Site configuration (optional)
//! ├── intro.md                         # Home page introduction (optional)
//! ├── resume.md                        # Resume page (optional)
//! ├── assets/                          # Copied to the site root (optional)
//! └── projects/
//!     ├── 010-redaction-studio/        # Numbered = listed first, in order
//!     │   ├── index.md
//!     │   └── images/thumbnail.svg
//!     └── side-project/                # Unnumbered = listed after, by slug
//!         └── index.md
//! ```
//!
//! ## Problems
//!
//! A project, resume or intro that cannot be loaded does not stop the scan.
//! It is reported as a [`Problem`], logged, and left out of the manifest. `casebook check`
//! turns problems into a failing exit status.

use crate::config::{self, SiteConfig};
use crate::content::{ContentError, ContentRepository};
use crate::types::{Page, Project};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Non-fatal content issue found while scanning.
#[derive(Error, Debug)]
pub enum Problem {
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("home.featured names an unknown project: {0}")]
    UnknownFeatured(String),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<Page>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<Page>,
    pub config: SiteConfig,
}

impl Manifest {
    /// The featured project: `home.featured` when it names a project,
    /// otherwise the first one.
    pub fn featured(&self) -> Option<&Project> {
        self.config
            .home
            .featured
            .as_deref()
            .and_then(|slug| self.project(slug))
            .or_else(|| self.projects.first())
    }

    /// Every project except the featured one, in listing order.
    pub fn more_work(&self) -> Vec<&Project> {
        let featured = self.featured().map(|p| p.summary.slug.as_str());
        self.projects
            .iter()
            .filter(|p| Some(p.summary.slug.as_str()) != featured)
            .collect()
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.summary.slug == slug)
    }
}

/// Scan `root`, returning the manifest and every problem found.
pub fn scan_with_problems(root: &Path) -> Result<(Manifest, Vec<Problem>), ScanError> {
    let config = config::load_config(root)?;
    let repo = ContentRepository::new(root);

    let (projects, content_problems) = repo.load_all(&config)?;
    let mut problems: Vec<Problem> = content_problems.into_iter().map(Problem::from).collect();

    if let Some(featured) = &config.home.featured
        && !projects.iter().any(|p| &p.summary.slug == featured)
    {
        problems.push(Problem::UnknownFeatured(featured.clone()));
    }

    let resume = optional_page(&repo, "resume.md", "Resume", &mut problems);
    let intro = optional_page(&repo, "intro.md", "", &mut problems);

    info!(
        projects = projects.len(),
        problems = problems.len(),
        resume = resume.is_some(),
        "scanned content"
    );

    Ok((
        Manifest {
            projects,
            resume,
            intro,
            config,
        },
        problems,
    ))
}

/// A root page such as `resume.md`. One that fails to load is recorded as a
/// problem and left out, like a broken project.
fn optional_page(
    repo: &ContentRepository,
    file_name: &str,
    fallback_title: &str,
    problems: &mut Vec<Problem>,
) -> Option<Page> {
    repo.page(file_name, fallback_title).unwrap_or_else(|err| {
        problems.push(Problem::Content(err));
        None
    })
}

/// Scan `root`, logging problems and leaving the affected content out.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let (manifest, problems) = scan_with_problems(root)?;
    for problem in &problems {
        warn!("{problem}");
    }
    Ok(manifest)
}

/// Write the manifest as pretty JSON, creating parent directories.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<(), ScanError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(manifest)?)?;
    Ok(())
}

/// Read a manifest written by [`write_manifest`].
pub fn read_manifest(path: &Path) -> Result<Manifest, ScanError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, Widget};
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn scan_finds_all_projects() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            project_slugs(&manifest),
            vec!["redaction-studio", "auto-tagging", "side-project"]
        );
    }

    #[test]
    fn scan_reads_pages() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let resume = manifest.resume.as_ref().unwrap();
        assert_eq!(resume.title, "Khue Nguyen");
        assert!(resume.front_matter.extra_str("pdf").is_some());
        assert!(manifest.intro.is_some());
    }

    #[test]
    fn scan_parses_documents() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let project = find_project(&manifest, "redaction-studio");
        let kinds = widget_names(&project.document);
        assert!(kinds.contains(&"compare"));
        assert!(kinds.contains(&"timeline"));
        assert!(
            project
                .document
                .blocks
                .iter()
                .any(|b| matches!(b, Block::Section { .. }))
        );
    }

    #[test]
    fn config_loaded_from_fixtures() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.home.featured.as_deref(), Some("redaction-studio"));
        assert_eq!(manifest.config.site.email, "khue@example.com");
    }

    #[test]
    fn default_config_when_no_toml() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.projects.is_empty());
        assert_eq!(manifest.config, SiteConfig::default());
        assert!(manifest.resume.is_none());
    }

    #[test]
    fn broken_project_reported_and_skipped() {
        let tmp = setup_fixtures();
        let broken = tmp.path().join("projects/040-broken");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("index.md"), "```kpi\nmetric = \"1\"\n```\n").unwrap();

        let (manifest, problems) = scan_with_problems(tmp.path()).unwrap();
        assert_eq!(manifest.projects.len(), 3);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].to_string().contains("kpi"));
    }

    #[test]
    fn broken_resume_reported_and_skipped() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("resume.md"), "::: section Experience\nunclosed\n").unwrap();

        let (manifest, problems) = scan_with_problems(tmp.path()).unwrap();
        assert!(manifest.resume.is_none());
        assert!(manifest.intro.is_some());
        assert_eq!(manifest.projects.len(), 3);
        assert!(matches!(&problems[..], [Problem::Content(ContentError::Document { .. })]));
        assert!(problems[0].to_string().contains("resume.md"));

        assert!(scan(tmp.path()).is_ok());
    }

    #[test]
    fn broken_intro_reported_and_skipped() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("intro.md"), "+++\ntitle = \n+++\nHello\n").unwrap();

        let (manifest, problems) = scan_with_problems(tmp.path()).unwrap();
        assert!(manifest.intro.is_none());
        assert!(manifest.resume.is_some());
        assert!(matches!(&problems[..], [Problem::Content(ContentError::FrontMatter { .. })]));
    }

    #[test]
    fn unknown_featured_is_a_problem() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[home]\nfeatured = \"ghost\"").unwrap();
        let (_, problems) = scan_with_problems(tmp.path()).unwrap();
        assert!(matches!(&problems[..], [Problem::UnknownFeatured(s)] if s == "ghost"));
    }

    #[test]
    fn featured_excluded_from_more_work() {
        let tmp = setup_fixtures();
        let mut manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.featured().unwrap().summary.slug, "redaction-studio");
        let more: Vec<&str> = manifest.more_work().iter().map(|p| p.summary.slug.as_str()).collect();
        assert_eq!(more, vec!["auto-tagging", "side-project"]);

        manifest.config.home.featured = Some("side-project".to_string());
        let more: Vec<&str> = manifest.more_work().iter().map(|p| p.summary.slug.as_str()).collect();
        assert_eq!(more, vec!["redaction-studio", "auto-tagging"]);

        manifest.config.home.featured = Some("ghost".to_string());
        assert_eq!(manifest.featured().unwrap().summary.slug, "redaction-studio");
    }

    #[test]
    fn manifest_json_roundtrip_preserves_widgets() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let path = tmp.path().join("out/manifest.json");
        write_manifest(&manifest, &path).unwrap();

        let back = read_manifest(&path).unwrap();
        let project = find_project(&back, "redaction-studio");
        let original = find_project(&manifest, "redaction-studio");
        assert_eq!(project.document, original.document);
        assert!(
            project
                .document
                .widgets()
                .iter()
                .any(|w| matches!(w, Widget::Compare(_)))
        );
    }
}
