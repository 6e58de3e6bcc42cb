//! Read access to the content directory.
//!
//! [`ContentRepository`] answers questions about the case studies on disk:
//! which projects exist, the summary of one project, its full document. It
//! keeps no state between calls, so every answer reflects the filesystem at
//! the moment of the call.
//!
//! Listing is forgiving: a project whose document cannot be read or parsed
//! is logged and left out, and the remaining projects are still returned.
//! Single-project lookups report the error instead.

use crate::config::{self, ConfigError, SiteConfig};
use crate::document::{Document, DocumentError};
use crate::frontmatter::{self, FrontMatterError};
use crate::naming::{ProjectDirName, parse_project_dir};
use crate::types::{Page, Project, ProjectSummary};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("project not found: {0}")]
    NotFound(String),
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
    #[error("{path}: {source}")]
    Document {
        path: PathBuf,
        source: DocumentError,
    },
    #[error("{path}: {source}")]
    Config { path: PathBuf, source: ConfigError },
    #[error("{0}: no index.md or index.mdx")]
    MissingDocument(PathBuf),
    #[error("slug `{slug}` is used by both {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Document file names, in preference order.
pub const DOCUMENT_FILES: &[&str] = &["index.md", "index.mdx"];

/// Thumbnail extensions, in preference order.
pub const THUMBNAIL_EXTENSIONS: &[&str] = &["svg", "png"];

/// A project folder found under `projects/`.
#[derive(Debug, Clone)]
pub struct ProjectDir {
    pub name: ProjectDirName,
    pub path: PathBuf,
}

/// Filesystem-backed accessor over a content root.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    root: PathBuf,
}

impl ContentRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.root.join("projects")
    }

    /// Project folders in listing order. Folders whose name is not a valid
    /// slug are skipped with a warning. A missing `projects/` directory is an
    /// empty listing.
    pub fn project_dirs(&self) -> Result<Vec<ProjectDir>, ContentError> {
        let dir = self.projects_dir();
        if !dir.is_dir() {
            debug!(path = %dir.display(), "no projects directory");
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&dir).map_err(|source| ContentError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut dirs = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().to_string();
            if file_name.starts_with('.') {
                continue;
            }
            match parse_project_dir(&file_name) {
                Some(name) => dirs.push(ProjectDir { name, path }),
                None => warn!(folder = %file_name, "skipping project folder with invalid slug"),
            }
        }
        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(dirs)
    }

    /// Summaries of every readable project, in listing order.
    pub fn all_projects(&self) -> Vec<ProjectSummary> {
        let dirs = match self.project_dirs() {
            Ok(dirs) => dirs,
            Err(err) => {
                warn!(error = %err, "cannot list projects");
                return Vec::new();
            }
        };
        first_per_slug(dirs)
            .iter()
            .filter_map(|dir| match self.summary_for(dir) {
                Ok(summary) => Some(summary),
                Err(err) => {
                    warn!(error = %err, "skipping project");
                    None
                }
            })
            .collect()
    }

    /// Summary of one project.
    pub fn project(&self, slug: &str) -> Result<ProjectSummary, ContentError> {
        let dir = self.find(slug)?;
        self.summary_for(&dir)
    }

    /// Slugs of every project that has a document file.
    pub fn project_slugs(&self) -> Vec<String> {
        first_per_slug(self.project_dirs().unwrap_or_default())
            .into_iter()
            .filter(|dir| document_path(&dir.path).is_some())
            .map(|dir| dir.name.slug)
            .collect()
    }

    /// Full project: summary, parsed document and per-project config.
    pub fn document(&self, slug: &str, site: &SiteConfig) -> Result<Project, ContentError> {
        let dir = self.find(slug)?;
        self.load(&dir, site)
    }

    /// Load every project, separating successes from failures. Used by the
    /// scan and check commands, which need to report what went wrong.
    pub fn load_all(&self, site: &SiteConfig) -> Result<(Vec<Project>, Vec<ContentError>), ContentError> {
        let mut projects = Vec::new();
        let mut problems = Vec::new();
        let mut seen: Vec<(String, PathBuf)> = Vec::new();

        for dir in self.project_dirs()? {
            if let Some((_, first)) = seen.iter().find(|(slug, _)| *slug == dir.name.slug) {
                problems.push(ContentError::DuplicateSlug {
                    slug: dir.name.slug.clone(),
                    first: first.clone(),
                    second: dir.path.clone(),
                });
                continue;
            }
            seen.push((dir.name.slug.clone(), dir.path.clone()));

            match self.load(&dir, site) {
                Ok(project) => projects.push(project),
                Err(err) => problems.push(err),
            }
        }
        Ok((projects, problems))
    }

    /// A standalone page in the content root, e.g. `resume.md`. Returns
    /// `Ok(None)` when the file does not exist.
    pub fn page(&self, file_name: &str, fallback_title: &str) -> Result<Option<Page>, ContentError> {
        let path = self.root.join(file_name);
        if !path.is_file() {
            return Ok(None);
        }
        let source = read(&path)?;
        let split = frontmatter::split(&source).map_err(|source| ContentError::FrontMatter {
            path: path.clone(),
            source,
        })?;
        let document = Document::parse(split.body, split.body_line)
            .map_err(|source| ContentError::Document { path, source })?;
        let title = split
            .front_matter
            .title
            .clone()
            .unwrap_or_else(|| fallback_title.to_string());
        Ok(Some(Page {
            title,
            front_matter: split.front_matter,
            document,
        }))
    }

    fn find(&self, slug: &str) -> Result<ProjectDir, ContentError> {
        self.project_dirs()?
            .into_iter()
            .find(|dir| dir.name.slug == slug)
            .ok_or_else(|| ContentError::NotFound(slug.to_string()))
    }

    fn summary_for(&self, dir: &ProjectDir) -> Result<ProjectSummary, ContentError> {
        let path = document_path(&dir.path).ok_or_else(|| ContentError::MissingDocument(dir.path.clone()))?;
        let source = read(&path)?;
        let split = frontmatter::split(&source)
            .map_err(|source| ContentError::FrontMatter { path, source })?;
        Ok(ProjectSummary::from_front_matter(
            &dir.name.slug,
            dir.name.order,
            &split.front_matter,
            thumbnail(&dir.path, &dir.name.slug),
        ))
    }

    fn load(&self, dir: &ProjectDir, site: &SiteConfig) -> Result<Project, ContentError> {
        let path = document_path(&dir.path).ok_or_else(|| ContentError::MissingDocument(dir.path.clone()))?;
        let source = read(&path)?;
        let split = frontmatter::split(&source).map_err(|source| ContentError::FrontMatter {
            path: path.clone(),
            source,
        })?;
        let document = Document::parse(split.body, split.body_line)
            .map_err(|source| ContentError::Document { path, source })?;
        let config = config::load_project_config(site, &dir.path).map_err(|source| ContentError::Config {
            path: dir.path.join("config.toml"),
            source,
        })?;

        let summary = ProjectSummary::from_front_matter(
            &dir.name.slug,
            dir.name.order,
            &split.front_matter,
            thumbnail(&dir.path, &dir.name.slug),
        );
        let source_dir = dir
            .path
            .strip_prefix(&self.root)
            .unwrap_or(&dir.path)
            .to_string_lossy()
            .replace('\\', "/");

        Ok(Project {
            summary,
            document,
            source_dir,
            config,
        })
    }
}

/// Keep the first folder for each slug, matching [`ContentRepository::project`]
/// lookups. Later folders are logged and dropped.
fn first_per_slug(dirs: Vec<ProjectDir>) -> Vec<ProjectDir> {
    let mut kept: Vec<ProjectDir> = Vec::with_capacity(dirs.len());
    for dir in dirs {
        if let Some(first) = kept.iter().find(|k| k.name.slug == dir.name.slug) {
            warn!(
                slug = %dir.name.slug,
                first = %first.path.display(),
                skipped = %dir.path.display(),
                "duplicate project slug"
            );
            continue;
        }
        kept.push(dir);
    }
    kept
}

/// The project's document file, if any.
pub fn document_path(project_dir: &Path) -> Option<PathBuf> {
    DOCUMENT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.is_file())
}

/// Site path of the project thumbnail, preferring vector over raster.
pub fn thumbnail(project_dir: &Path, slug: &str) -> Option<String> {
    THUMBNAIL_EXTENSIONS.iter().find_map(|ext| {
        let file = format!("thumbnail.{ext}");
        project_dir
            .join("images")
            .join(&file)
            .is_file()
            .then(|| format!("/projects/{slug}/images/{file}"))
    })
}

fn read(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}
