use globset::{Glob, GlobMatcher};

/// Normalize a request path for pattern matching.
///
/// The matching grammar works on normalized paths: the query string (`?...`)
/// and fragment (`#...`) are stripped, a leading `/` is ensured, and
/// trailing slashes are trimmed (the root path stays `/`). Matching is
/// case-sensitive.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let mut normalized = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Patterns get the same leading/trailing slash treatment as paths, but the
/// query/fragment stripping step is skipped since `?` and `#` are glob
/// syntax there.
fn normalize_pattern(pattern: &str) -> String {
    let mut normalized = if pattern.starts_with('/') {
        pattern.to_owned()
    } else {
        format!("/{pattern}")
    };
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Compiled page filter for one rule.
///
/// Patterns are globs with non-literal separators: `*` matches any character
/// sequence including `/`, `?` matches a single character, and `[a-z]` /
/// `{a,b}` classes and alternations are available.
#[derive(Debug, Clone)]
pub(crate) enum PageMatcher {
    /// No patterns configured; every path matches.
    All,
    /// At least one of the globs must match.
    Any(Vec<GlobMatcher>),
    /// A pattern failed to compile; the rule can never match.
    Invalid,
}

impl PageMatcher {
    pub(crate) fn compile(patterns: &[String]) -> Self {
        if patterns.is_empty() {
            return PageMatcher::All;
        }
        let mut matchers = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            match Glob::new(&normalize_pattern(pattern)) {
                Ok(glob) => matchers.push(glob.compile_matcher()),
                Err(_) => return PageMatcher::Invalid,
            }
        }
        PageMatcher::Any(matchers)
    }

    /// Match against an already-normalized path.
    pub(crate) fn matches(&self, normalized_path: &str) -> bool {
        match self {
            PageMatcher::All => true,
            PageMatcher::Any(matchers) => matchers.iter().any(|m| m.is_match(normalized_path)),
            PageMatcher::Invalid => false,
        }
    }

    pub(crate) fn is_invalid(&self) -> bool {
        matches!(self, PageMatcher::Invalid)
    }
}
