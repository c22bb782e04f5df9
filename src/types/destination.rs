use std::fmt;

use thiserror::Error;

use super::pattern::normalize_path;

/// A parsed redirect target.
///
/// Destinations are written as strings in rule configuration and parsed once
/// at compile time. Four forms are accepted:
///
/// - `"<current>"`: stay on the page the event happened on
/// - `"<front>"`: the site front page
/// - a site-absolute path starting with `/`, e.g. `"/dashboard"`
/// - an absolute URI with a scheme, e.g. `"https://example.org/welcome"`
///
/// Anything else is rejected with [`DestinationError`]; a rule carrying such
/// a destination is skipped at resolution time rather than failing the whole
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Site-absolute path, resolved against the ruleset's base URL.
    Internal(String),
    /// Absolute URI, returned verbatim.
    External(String),
    /// The page the authentication event happened on.
    CurrentPage,
    /// The site front page.
    Front,
}

/// Error returned when a destination string has none of the accepted forms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DestinationError {
    #[error("destination is empty")]
    Empty,

    #[error("unknown destination token '{0}'")]
    UnknownToken(String),

    #[error("destination '{0}' must start with '/' or be an absolute URI")]
    NotAbsolute(String),
}

impl Destination {
    /// Parse a raw destination string.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError`] if the string is empty, an unknown
    /// `<...>` token, or neither site-absolute nor an absolute URI.
    pub fn parse(raw: &str) -> Result<Self, DestinationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DestinationError::Empty);
        }
        if raw.starts_with('<') {
            return match raw {
                "<current>" => Ok(Destination::CurrentPage),
                "<front>" => Ok(Destination::Front),
                other => Err(DestinationError::UnknownToken(other.to_owned())),
            };
        }
        if raw.starts_with('/') {
            return Ok(Destination::Internal(raw.to_owned()));
        }
        if has_scheme(raw) {
            return Ok(Destination::External(raw.to_owned()));
        }
        Err(DestinationError::NotAbsolute(raw.to_owned()))
    }

    /// Resolve this destination to a concrete URI.
    ///
    /// Internal paths and placeholders are prefixed with `base` (any
    /// trailing slash trimmed); an empty base yields site-root-relative
    /// URIs. `current_path` is normalized before use.
    #[must_use]
    pub fn resolve(&self, base: &str, current_path: &str) -> String {
        let base = base.trim_end_matches('/');
        match self {
            Destination::Internal(path) => format!("{base}{path}"),
            Destination::External(uri) => uri.clone(),
            Destination::CurrentPage => {
                format!("{base}{}", normalize_path(current_path))
            }
            Destination::Front => {
                if base.is_empty() {
                    "/".to_owned()
                } else {
                    format!("{base}/")
                }
            }
        }
    }
}

/// Whether `raw` begins with a URI scheme followed by `://`.
fn has_scheme(raw: &str) -> bool {
    let Some((scheme, rest)) = raw.split_once("://") else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Internal(path) => write!(f, "{path}"),
            Destination::External(uri) => write!(f, "{uri}"),
            Destination::CurrentPage => write!(f, "<current>"),
            Destination::Front => write!(f, "<front>"),
        }
    }
}
