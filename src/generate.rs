//! HTML site generation.
//!
//! Stage 2 of the casebook build pipeline. Takes the scan manifest and the
//! content directory and writes the final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): intro, featured case study, "More work" grid
//! - **CV** (`/cv/index.html`): resume page, only when `resume.md` exists
//! - **Case studies** (`/project/{slug}/index.html`): one per project
//! - **Not found** (`/404.html`): served by static hosts for unknown paths
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── style.3f9a1c2e.css           # palette + static/style.css, fingerprinted
//! ├── widgets.b71d04aa.js          # static/widgets.js, fingerprinted
//! ├── cv/index.html
//! ├── project/
//! │   └── redaction-studio/index.html
//! ├── projects/
//! │   └── redaction-studio/        # project media, copied as is
//! │       └── images/thumbnail.svg
//! └── ...                          # content/assets/, copied to the root
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Documents are rendered by [`crate::render`]; this module owns the page
//! chrome around them. Project pages are rendered in parallel.

use crate::config::{self, SiteConfig};
use crate::render::{OverlaySurface, Renderer};
use crate::scan::{self, Manifest, ScanError};
use crate::types::{Page, Project, ProjectSummary};
use chrono::{Datelike, Utc};
use maud::{DOCTYPE, Markup, html};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] ScanError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a generate run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Site paths of the HTML pages written.
    pub pages: Vec<String>,
    pub media_files: usize,
    pub stylesheet: String,
    pub script: String,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/widgets.js");

/// Files in a project folder that are source, not media.
const SOURCE_FILES: &[&str] = &["index.md", "index.mdx", "config.toml"];

/// Fingerprinted asset paths shared by every page.
#[derive(Debug, Clone)]
struct Assets {
    stylesheet: String,
    script: String,
}

/// Everything a page template needs besides its own content.
#[derive(Clone, Copy)]
struct PageContext<'a> {
    config: &'a SiteConfig,
    assets: &'a Assets,
    has_resume: bool,
    year: i32,
}

pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<Report, GenerateError> {
    let manifest = scan::read_manifest(manifest_path)?;
    generate_site(&manifest, source_root, output_dir)
}

/// Render `manifest` into `output_dir`, copying media from `source_root`.
pub fn generate_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<Report, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let assets = write_assets(&manifest.config, output_dir)?;
    let ctx = PageContext {
        config: &manifest.config,
        assets: &assets,
        has_resume: manifest.resume.is_some(),
        year: Utc::now().year(),
    };

    let mut media_files = copy_tree(&source_root.join("assets"), output_dir, |_| true)?;
    let mut pages = Vec::new();

    write_page(output_dir, "/", render_home(manifest, ctx))?;
    pages.push("/".to_string());

    if let Some(resume) = &manifest.resume {
        write_page(output_dir, "/cv/", render_cv(resume, ctx))?;
        pages.push("/cv/".to_string());
    }

    let project_pages = manifest
        .projects
        .par_iter()
        .map(|project| -> Result<(String, usize), GenerateError> {
            let media = copy_project_media(project, source_root, output_dir)?;
            let url = project.summary.url();
            write_page(output_dir, &url, render_project(project, ctx))?;
            Ok((url, media))
        })
        .collect::<Result<Vec<_>, _>>()?;
    for (url, media) in project_pages {
        pages.push(url);
        media_files += media;
    }

    fs::write(output_dir.join("404.html"), render_not_found(ctx).into_string())?;
    debug!(page = "/404.html", "wrote page");
    pages.push("/404.html".to_string());

    info!(
        pages = pages.len(),
        media_files,
        output = %output_dir.display(),
        "generated site"
    );
    Ok(Report {
        pages,
        media_files,
        stylesheet: assets.stylesheet,
        script: assets.script,
    })
}

// ============================================================================
// Files
// ============================================================================

/// Write the stylesheet and widget script under content-hashed names.
fn write_assets(config: &SiteConfig, output_dir: &Path) -> Result<Assets, GenerateError> {
    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);
    let stylesheet = fingerprinted("style", "css", &css);
    let script = fingerprinted("widgets", "js", JS);
    fs::write(output_dir.join(&stylesheet), css)?;
    fs::write(output_dir.join(&script), JS)?;
    Ok(Assets {
        stylesheet: format!("/{stylesheet}"),
        script: format!("/{script}"),
    })
}

/// `name.<first 8 hex digits of sha256>.ext`
pub fn fingerprinted(name: &str, ext: &str, content: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(content.as_bytes()));
    format!("{name}.{}.{ext}", &digest[..8])
}

/// Write a page to `<output>/<site path>/index.html`.
fn write_page(output_dir: &Path, site_path: &str, page: Markup) -> Result<(), GenerateError> {
    let dir = output_dir.join(site_path.trim_matches('/'));
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("index.html"), page.into_string())?;
    debug!(page = site_path, "wrote page");
    Ok(())
}

fn copy_project_media(
    project: &Project,
    source_root: &Path,
    output_dir: &Path,
) -> Result<usize, GenerateError> {
    let src = source_root.join(&project.source_dir);
    let dst = output_dir.join("projects").join(&project.summary.slug);
    copy_tree(&src, &dst, |relative| {
        !(relative.components().count() == 1
            && relative
                .to_str()
                .is_some_and(|name| SOURCE_FILES.contains(&name)))
    })
}

/// Copy every file under `src` accepted by `keep` into `dst`, returning the
/// number of files copied. A missing `src` copies nothing.
fn copy_tree(
    src: &Path,
    dst: &Path,
    keep: impl Fn(&Path) -> bool,
) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        if !entry.file_type().is_file() || !keep(relative) {
            continue;
        }
        let target: PathBuf = dst.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        copied += 1;
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    ctx: PageContext<'_>,
    body_class: Option<&str>,
    palette: Option<String>,
    content: Markup,
    overlays: &OverlaySurface,
) -> Markup {
    let site = &ctx.config.site;
    let full_title = if title.is_empty() || title == site.title {
        site.title.clone()
    } else {
        format!("{title} | {}", site.title)
    };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(site.description);
                title { (full_title) }
                link rel="stylesheet" href=(ctx.assets.stylesheet);
                @if let Some(palette) = palette {
                    style { (palette) }
                }
                script src=(ctx.assets.script) defer {}
            }
            body class=[body_class] {
                (site_header(ctx))
                (content)
                (site_footer(ctx))
                button.back-to-top type="button" data-action="top" hidden aria-label="Back to top" { "↑" }
                (overlays.render())
            }
        }
    }
}

/// Renders the top navigation bar
fn site_header(ctx: PageContext<'_>) -> Markup {
    let site = &ctx.config.site;
    let brand = if site.author.is_empty() {
        &site.title
    } else {
        &site.author
    };
    html! {
        header.site-header {
            a.brand href="/" { (brand) }
            nav.site-nav {
                a href="/#work" { "Work" }
                @if ctx.has_resume {
                    a href="/cv/" { "CV" }
                }
                a href={ "mailto:" (site.email) } { "Contact" }
            }
        }
    }
}

fn site_footer(ctx: PageContext<'_>) -> Markup {
    let site = &ctx.config.site;
    html! {
        footer.site-footer {
            p.copyright {
                "© " (ctx.year)
                @if !site.author.is_empty() {
                    " " (site.author) "."
                }
                " " (site.footer)
            }
            nav.footer-links {
                @if ctx.has_resume {
                    a href="/cv/" { "CV" }
                }
                a href=(site.linkedin) target="_blank" rel="noopener noreferrer" { "LinkedIn" }
            }
        }
    }
}

fn project_meta(summary: &ProjectSummary) -> Option<String> {
    let parts: Vec<&str> = [summary.role.as_str(), summary.timeline.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(" • "))
}

fn thumbnail(summary: &ProjectSummary) -> Markup {
    html! {
        @match &summary.thumbnail {
            Some(src) => { img.card-thumb src=(src) alt=(summary.title) loading="lazy"; }
            None => { div.card-thumb.card-placeholder { span { "Preview" } } }
        }
    }
}

fn project_card(summary: &ProjectSummary) -> Markup {
    html! {
        a.project-card href=(summary.url()) {
            (thumbnail(summary))
            div.card-body {
                h3.card-title { (summary.title) }
                @if let Some(meta) = project_meta(summary) {
                    p.card-meta { (meta) }
                }
                @if !summary.description.is_empty() {
                    p.card-description { (summary.description) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page with the featured project and the rest of the work
fn render_home(manifest: &Manifest, ctx: PageContext<'_>) -> Markup {
    let mut renderer = Renderer::new(None, &ctx.config.widgets);
    let intro = manifest
        .intro
        .as_ref()
        .map(|page| renderer.render_document(&page.document));
    let intro_title = manifest
        .intro
        .as_ref()
        .map(|page| page.title.as_str())
        .filter(|t| !t.is_empty());
    let more_work = manifest.more_work();

    let content = html! {
        main.home-page {
            @if let Some(intro) = intro {
                section.intro {
                    @if let Some(title) = intro_title {
                        h1.intro-title { (title) }
                    }
                    (intro)
                }
            }
            @if let Some(featured) = manifest.featured() {
                section.featured id="work" {
                    h2.section-label { "Featured case study" }
                    a.featured-card href=(featured.summary.url()) {
                        (thumbnail(&featured.summary))
                        div.card-body {
                            @if let Some(meta) = project_meta(&featured.summary) {
                                p.card-meta { (meta) }
                            }
                            h3.card-title { (featured.summary.title) }
                            @if !featured.summary.description.is_empty() {
                                p.card-description { (featured.summary.description) }
                            }
                            span.card-cta { "View case study →" }
                        }
                    }
                }
            } @else {
                section.featured id="work" {
                    p.empty { "No case studies yet." }
                }
            }
            @if !more_work.is_empty() {
                section.more-work {
                    h2.section-label { "More work" }
                    div.project-grid {
                        @for project in &more_work {
                            (project_card(&project.summary))
                        }
                    }
                }
            }
        }
    };

    let overlays = renderer.finish();
    base_document("", ctx, Some("home"), None, content, &overlays)
}

/// Renders the resume page
fn render_cv(resume: &Page, ctx: PageContext<'_>) -> Markup {
    let mut renderer = Renderer::new(None, &ctx.config.widgets);
    let body = renderer.render_document(&resume.document);
    let pdf = resume.front_matter.extra_str("pdf");

    let content = html! {
        main.cv-page {
            header.cv-header {
                h1 { (resume.title) }
                @if let Some(pdf) = pdf {
                    a.cv-download href=(pdf) download { "Download CV" }
                }
            }
            article.cv-body { (body) }
        }
    };

    let overlays = renderer.finish();
    base_document(&resume.title, ctx, Some("cv"), None, content, &overlays)
}

/// Renders a case study page
fn render_project(project: &Project, ctx: PageContext<'_>) -> Markup {
    let site_colors = &ctx.config.colors;
    let palette = project
        .config
        .as_ref()
        .filter(|c| &c.colors != site_colors)
        .map(|c| config::generate_color_css(&c.colors));
    let config = project.config.as_ref().unwrap_or(ctx.config);
    let ctx = PageContext { config, ..ctx };

    let summary = &project.summary;
    let mut renderer = Renderer::new(
        Some(format!("/projects/{}", summary.slug)),
        &config.widgets,
    );
    let body = renderer.render_document(&project.document);

    let content = html! {
        nav.back-nav {
            a href="/#work" { "← All work" }
        }
        main.project-page {
            header.project-header {
                @if let Some(meta) = project_meta(summary) {
                    p.project-meta { (meta) }
                }
                h1.project-title { (summary.title) }
                @if !summary.description.is_empty() {
                    p.project-description { (summary.description) }
                }
            }
            article.project-body { (body) }
            section.project-cta {
                h2 { "Interested in working together?" }
                a.cta-button href={ "mailto:" (config.site.email) } { "Get in touch" }
            }
        }
    };

    let overlays = renderer.finish();
    base_document(&summary.title, ctx, Some("project"), palette, content, &overlays)
}

fn render_not_found(ctx: PageContext<'_>) -> Markup {
    let content = html! {
        main.not-found {
            h1 { "Page not found" }
            p { "The case study you were looking for doesn't exist or has moved." }
            a.cta-button href="/" { "Back to home" }
        }
    };
    base_document("Not found", ctx, Some("not-found"), None, content, &OverlaySurface::default())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn build() -> (TempDir, TempDir, Report) {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        let report = generate_site(&manifest, content.path(), out.path()).unwrap();
        (content, out, report)
    }

    fn read(out: &TempDir, rel: &str) -> String {
        fs::read_to_string(out.path().join(rel)).unwrap()
    }

    #[test]
    fn writes_every_page() {
        let (_content, out, report) = build();
        assert_eq!(
            report.pages,
            vec![
                "/",
                "/cv/",
                "/project/redaction-studio/",
                "/project/auto-tagging/",
                "/project/side-project/",
                "/404.html",
            ]
        );
        for rel in [
            "index.html",
            "cv/index.html",
            "project/redaction-studio/index.html",
            "project/side-project/index.html",
            "404.html",
        ] {
            assert!(out.path().join(rel).is_file(), "{rel} missing");
        }
    }

    #[test]
    fn assets_are_fingerprinted() {
        let (_content, out, report) = build();
        assert!(report.stylesheet.starts_with("/style."));
        assert!(report.script.ends_with(".js"));
        let css = read(&out, report.stylesheet.trim_start_matches('/'));
        assert!(css.contains("--color-background: #0a0a0b;"));
        let home = read(&out, "index.html");
        assert!(home.contains(&format!(r#"href="{}""#, report.stylesheet)));
        assert!(home.contains(&format!(r#"src="{}""#, report.script)));
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = fingerprinted("style", "css", "a{}");
        assert_eq!(a, fingerprinted("style", "css", "a{}"));
        assert_ne!(a, fingerprinted("style", "css", "b{}"));
        assert_eq!(a.len(), "style..css".len() + 8);
    }

    #[test]
    fn home_lists_featured_then_more_work() {
        let (_content, out, _) = build();
        let home = read(&out, "index.html");
        let featured = home.find("featured-card").unwrap();
        let more = home.find("More work").unwrap();
        assert!(featured < more);
        assert_eq!(count(&home, r#"href="/project/redaction-studio/""#), 1);
        assert!(home.contains(r#"href="/project/auto-tagging/""#));
        assert!(home.contains("card-placeholder"), "side-project has no thumbnail");
    }

    #[test]
    fn project_page_chrome() {
        let (_content, out, _) = build();
        let page = read(&out, "project/redaction-studio/index.html");
        assert!(page.contains("Lead Product Designer • 2023 – 2024"));
        assert!(page.contains("<title>Redaction Studio | "));
        assert!(page.contains("Interested in working together?"));
        assert!(page.contains(r#"href="mailto:khue@example.com""#));
        assert!(page.contains("back-nav"));
    }

    #[test]
    fn overlays_render_at_body_level() {
        let (_content, out, _) = build();
        let page = read(&out, "project/redaction-studio/index.html");
        let root = page.find(r#"<div id="overlay-root">"#).unwrap();
        let article_end = page.find("</article>").unwrap();
        assert!(root > article_end);
        assert!(!page[..root].contains(r#"class="overlay""#));
        assert!(page[root..].contains(r#"class="overlay""#));
    }

    #[test]
    fn media_copied_without_sources() {
        let (_content, out, report) = build();
        let dir = out.path().join("projects/redaction-studio");
        assert!(dir.join("images/thumbnail.svg").is_file());
        assert!(!dir.join("index.md").exists());
        assert!(report.media_files >= 1);
    }

    #[test]
    fn cv_has_download_link() {
        let (_content, out, _) = build();
        let cv = read(&out, "cv/index.html");
        assert!(cv.contains("Download CV"));
        assert!(cv.contains("<h1>Khue Nguyen</h1>"));
    }

    #[test]
    fn no_cv_without_resume() {
        let content = setup_fixtures();
        fs::remove_file(content.path().join("resume.md")).unwrap();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        let report = generate_site(&manifest, content.path(), out.path()).unwrap();
        assert!(!report.pages.contains(&"/cv/".to_string()));
        assert!(!read(&out, "index.html").contains(r#"href="/cv/""#));
    }

    #[test]
    fn project_config_overrides_palette_and_contact() {
        let content = setup_fixtures();
        let dir = content.path().join("projects/020-auto-tagging");
        fs::write(
            dir.join("config.toml"),
            "[site]\nemail = \"tagging@example.com\"\n[colors]\naccent = \"#00ff00\"\n",
        )
        .unwrap();
        let out = TempDir::new().unwrap();
        let manifest = scan::scan(content.path()).unwrap();
        generate_site(&manifest, content.path(), out.path()).unwrap();

        let page = read(&out, "project/auto-tagging/index.html");
        assert!(page.contains("--color-accent: #00ff00;"));
        assert!(page.contains("mailto:tagging@example.com"));
        assert!(!out.path().join("projects/auto-tagging/config.toml").exists());

        let other = read(&out, "project/side-project/index.html");
        assert!(!other.contains("#00ff00"));
    }

    #[test]
    fn footer_shows_current_year() {
        let (_content, out, _) = build();
        let home = read(&out, "index.html");
        assert!(home.contains(&format!("© {} Khue Nguyen.", Utc::now().year())));
    }

    #[test]
    fn page_content_is_escaped() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let mut manifest = scan::scan(content.path()).unwrap();
        manifest.projects[0].summary.title = "<script>x</script>".to_string();
        generate_site(&manifest, content.path(), out.path()).unwrap();
        let page = read(&out, "project/redaction-studio/index.html");
        assert!(page.contains("&lt;script&gt;x&lt;/script&gt;"));
    }
}
