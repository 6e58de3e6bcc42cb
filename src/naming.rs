//! Project folder naming: the `NNN-slug` convention.
//!
//! Every case study lives in its own folder under `content/projects/`. The
//! folder name carries two things: an optional numeric prefix that orders the
//! home page listing, and the URL slug the project is published under.
//!
//! - `010-redaction-studio` → order 10, slug `redaction-studio`
//! - `side-project` → no order, slug `side-project`
//! - `2024` → no order, slug `2024` (a bare number is a slug, not a prefix)
//!
//! Numbered folders sort first by number; unnumbered folders follow, sorted
//! by slug. The prefix never appears in URLs, so renumbering a folder does not
//! break links.

use std::cmp::Ordering;

/// Result of parsing a project folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDirName {
    /// Number prefix if present (`10` from `010-redaction-studio`).
    pub order: Option<u32>,
    /// URL slug: the folder name with the prefix removed.
    pub slug: String,
}

impl ProjectDirName {
    /// Sort key: numbered entries first (by number), then by slug.
    pub fn sort_key(&self) -> (u32, &str) {
        (self.order.unwrap_or(u32::MAX), self.slug.as_str())
    }
}

impl PartialOrd for ProjectDirName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProjectDirName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Parse a project folder name following the `NNN-slug` convention.
///
/// Returns `None` when the remaining slug is empty (`010-`) or contains
/// characters that are not safe in a URL path segment.
pub fn parse_project_dir(name: &str) -> Option<ProjectDirName> {
    let (order, slug) = match name.split_once('-') {
        Some((prefix, rest))
            if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) =>
        {
            (prefix.parse::<u32>().ok(), rest)
        }
        _ => (None, name),
    };

    if !is_valid_slug(slug) {
        return None;
    }

    Some(ProjectDirName {
        order,
        slug: slug.to_string(),
    })
}

/// A slug is non-empty, does not start with a dot, and contains only ASCII
/// alphanumerics, dashes and underscores.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_folder() {
        let p = parse_project_dir("010-redaction-studio").unwrap();
        assert_eq!(p.order, Some(10));
        assert_eq!(p.slug, "redaction-studio");
    }

    #[test]
    fn unnumbered_folder_keeps_dashes() {
        let p = parse_project_dir("side-project").unwrap();
        assert_eq!(p.order, None);
        assert_eq!(p.slug, "side-project");
    }

    #[test]
    fn bare_number_is_a_slug() {
        let p = parse_project_dir("2024").unwrap();
        assert_eq!(p.order, None);
        assert_eq!(p.slug, "2024");
    }

    #[test]
    fn empty_slug_after_prefix_rejected() {
        assert_eq!(parse_project_dir("010-"), None);
    }

    #[test]
    fn unsafe_characters_rejected() {
        assert_eq!(parse_project_dir("010-my project"), None);
        assert_eq!(parse_project_dir("a/b"), None);
        assert_eq!(parse_project_dir(".hidden"), None);
    }

    #[test]
    fn zero_prefix() {
        let p = parse_project_dir("000-first").unwrap();
        assert_eq!(p.order, Some(0));
        assert_eq!(p.slug, "first");
    }

    #[test]
    fn numbered_sort_before_unnumbered() {
        let mut names: Vec<ProjectDirName> = ["zeta", "020-beta", "alpha", "010-gamma"]
            .iter()
            .filter_map(|n| parse_project_dir(n))
            .collect();
        names.sort();
        let slugs: Vec<&str> = names.iter().map(|n| n.slug.as_str()).collect();
        assert_eq!(slugs, vec!["gamma", "beta", "alpha", "zeta"]);
    }
}
