#![forbid(unsafe_code)]

//! Error type shared by the core and web crates.

use std::borrow::Cow;

/// Failures surfaced while configuring or attaching page components.
///
/// None of these are fatal to the page: a component that hits one degrades
/// (skips its feature) and the remaining components keep working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteError {
    /// An element the stylesheet contract promises was not in the document.
    MissingElement(Cow<'static, str>),
    /// Host-supplied options were malformed or out of range.
    InvalidConfig(String),
    /// A browser API call threw.
    Js(String),
}

impl SiteError {
    /// Missing element identified by a static selector.
    #[must_use]
    pub const fn missing(selector: &'static str) -> Self {
        Self::MissingElement(Cow::Borrowed(selector))
    }
}

impl core::fmt::Display for SiteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingElement(selector) => write!(f, "missing element: {selector}"),
            Self::InvalidConfig(reason) => write!(f, "invalid config: {reason}"),
            Self::Js(msg) => write!(f, "js error: {msg}"),
        }
    }
}

impl std::error::Error for SiteError {}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_selector() {
        let err = SiteError::missing("#nav-toggle");
        assert_eq!(err.to_string(), "missing element: #nav-toggle");
    }

    #[test]
    fn json_errors_become_invalid_config() {
        let err: SiteError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, SiteError::InvalidConfig(_)));
        assert!(err.to_string().starts_with("invalid config: "));
    }
}
