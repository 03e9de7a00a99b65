use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{AssetCheckError, Result};

use super::AssetKind;

const TYPE_PREFIX: &str = "t:";
const GLOB_PREFIX: &str = "glob:";

/// Parsed search filter string.
///
/// Tokens are whitespace separated:
/// - `t:<type>` restricts results to an asset type; several are OR'ed
/// - `glob:<pattern>` matches the project path; several are OR'ed
/// - anything else must occur in the file name (case-insensitive)
///
/// An empty filter matches everything.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    type_names: Vec<String>,
    globs: Option<GlobSet>,
    name_terms: Vec<String>,
}

impl SearchFilter {
    /// Parse a filter string.
    ///
    /// # Errors
    /// Returns an error if a `glob:` pattern is invalid.
    pub fn parse(filter: &str) -> Result<Self> {
        let mut type_names = Vec::new();
        let mut name_terms = Vec::new();
        let mut glob_builder: Option<GlobSetBuilder> = None;

        for token in filter.split_whitespace() {
            if let Some(type_name) = strip_prefix_ignore_case(token, TYPE_PREFIX) {
                type_names.push(type_name.to_ascii_lowercase());
            } else if let Some(pattern) = strip_prefix_ignore_case(token, GLOB_PREFIX) {
                let pattern = pattern.trim_matches('"');
                let glob = Glob::new(pattern).map_err(|e| AssetCheckError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source: e,
                })?;
                glob_builder
                    .get_or_insert_with(GlobSetBuilder::new)
                    .add(glob);
            } else {
                name_terms.push(token.to_lowercase());
            }
        }

        let globs = glob_builder
            .map(|builder| {
                builder.build().map_err(|e| AssetCheckError::InvalidPattern {
                    pattern: "combined patterns".to_string(),
                    source: e,
                })
            })
            .transpose()?;

        Ok(Self {
            type_names,
            globs,
            name_terms,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.type_names.is_empty() && self.globs.is_none() && self.name_terms.is_empty()
    }

    /// Check a project path of the given kind against the filter.
    #[must_use]
    pub fn matches(&self, path: &str, kind: AssetKind) -> bool {
        self.matches_type(kind) && self.matches_glob(path) && self.matches_name(path)
    }

    fn matches_type(&self, kind: AssetKind) -> bool {
        self.type_names.is_empty()
            || self
                .type_names
                .iter()
                .any(|name| name.eq_ignore_ascii_case(kind.name()))
    }

    fn matches_glob(&self, path: &str) -> bool {
        self.globs.as_ref().is_none_or(|globs| globs.is_match(path))
    }

    fn matches_name(&self, path: &str) -> bool {
        if self.name_terms.is_empty() {
            return true;
        }
        let file_name = path.rsplit('/').next().unwrap_or(path).to_lowercase();
        self.name_terms
            .iter()
            .all(|term| file_name.contains(term.as_str()))
    }
}

fn strip_prefix_ignore_case<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    let head = token.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &token[prefix.len()..])
}

#[cfg(test)]
#[path = "search_filter_tests.rs"]
mod tests;
