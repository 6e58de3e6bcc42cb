//! Shared test utilities for the casebook test suite.
//!
//! Provides fixture setup, lookup helpers, and small extractors that work
//! with scan-stage data (`Manifest`, `Project`, `Document`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let project = find_project(&manifest, "redaction-studio");
//! assert!(widget_names(&project.document).contains(&"compare"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::document::Document;
use crate::scan::Manifest;
use crate::types::Project;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups: panic with a clear message on miss
// =========================================================================

/// Find a project by slug. Panics if not found.
pub fn find_project<'a>(manifest: &'a Manifest, slug: &str) -> &'a Project {
    manifest.project(slug).unwrap_or_else(|| {
        let slugs = project_slugs(manifest);
        panic!("project '{slug}' not found. Available: {slugs:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All project slugs in manifest order.
pub fn project_slugs(manifest: &Manifest) -> Vec<&str> {
    manifest
        .projects
        .iter()
        .map(|p| p.summary.slug.as_str())
        .collect()
}

/// Widget block names in document order, containers included.
pub fn widget_names(document: &Document) -> Vec<&'static str> {
    document.widgets().iter().map(|w| w.name()).collect()
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
