use crate::error::{AggregateError, Result};
use std::fmt;

/// Validated application namespace: a single path component that cannot escape the apps
/// root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = raw.is_empty()
            || raw == "."
            || raw == ".."
            || raw.contains(&['/', '\\', '\0'][..]);
        if invalid {
            return Err(AggregateError::InvalidNamespace(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<std::path::Path> for Namespace {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for raw in ["tasks", "my-app", "app.v2", "..hidden", "a b"] {
            assert_eq!(Namespace::parse(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for raw in ["", ".", "..", "../etc", "a/b", "a\\b", "/abs", "nul\0byte"] {
            assert!(
                matches!(
                    Namespace::parse(raw),
                    Err(AggregateError::InvalidNamespace(_))
                ),
                "{raw:?} must be rejected"
            );
        }
    }
}
