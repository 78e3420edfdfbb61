//! Composition of the document rendered in the preview frame.
//!
//! Sources are interpolated verbatim, no escaping. The document is only safe to
//! show inside a frame carrying [`SANDBOX_POLICY`]: its scripts run, but they get
//! an opaque origin and cannot reach the host page, its storage, forms, popups
//! or top-level navigation.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::source::SourceSet;

/// Value of the preview `<iframe>`'s `sandbox` attribute.
pub const SANDBOX_POLICY: &str = "allow-scripts";

const TEMPLATE_OVERHEAD: usize =
    "<html><body></body><style></style><script></script></html>".len();

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PreviewDocument(String);

impl PreviewDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for PreviewDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    /// Composed document would exceed the configured byte limit.
    TooLarge { len: usize, limit: usize },
    /// Writing the template failed.
    Template,
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::TooLarge { len, limit } => write!(
                f,
                "Preview document is {len} bytes, more than the {limit} bytes allowed."
            ),
            PreviewError::Template => write!(f, "Failed to compose the preview document."),
        }
    }
}

impl std::error::Error for PreviewError {}

impl From<fmt::Error> for PreviewError {
    fn from(_: fmt::Error) -> Self {
        PreviewError::Template
    }
}

/// Builds `<html><body>{markup}</body><style>{styles}</style><script>{script}</script></html>`.
pub fn compose<S: AsRef<str>>(
    sources: &SourceSet<S>,
    max_bytes: usize,
) -> Result<PreviewDocument, PreviewError> {
    let len = TEMPLATE_OVERHEAD + sources.total_len();
    if len > max_bytes {
        return Err(PreviewError::TooLarge { len, limit: max_bytes });
    }
    let mut document = String::with_capacity(len);
    write!(
        document,
        "<html><body>{}</body><style>{}</style><script>{}</script></html>",
        sources.markup.as_ref(),
        sources.styles.as_ref(),
        sources.script.as_ref(),
    )?;
    Ok(PreviewDocument(document))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_only_allows_scripts() {
        assert_eq!(SANDBOX_POLICY, "allow-scripts");
        assert!(!SANDBOX_POLICY.contains("allow-same-origin"));
    }

    #[test]
    fn interpolates_without_escaping() {
        let sources = SourceSet::new("<b>&</b>", "b{}", "alert(\"</x>\")");
        let document = compose(&sources, usize::MAX).unwrap();
        assert_eq!(
            document.as_str(),
            "<html><body><b>&</b></body><style>b{}</style><script>alert(\"</x>\")</script></html>"
        );
    }

    #[test]
    fn empty_sources_still_give_the_skeleton() {
        let document = compose(&SourceSet::new("", "", ""), usize::MAX).unwrap();
        assert_eq!(document.as_str().len(), TEMPLATE_OVERHEAD);
        assert!(!document.is_empty());
    }

    #[test]
    fn limit_is_inclusive() {
        let sources = SourceSet::new("a", "b", "c");
        let exact = TEMPLATE_OVERHEAD + 3;
        assert!(compose(&sources, exact).is_ok());
        assert_eq!(
            compose(&sources, exact - 1),
            Err(PreviewError::TooLarge { len: exact, limit: exact - 1 })
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let document = compose(&SourceSet::new("", "", ""), usize::MAX).unwrap();
        assert_eq!(
            serde_json::to_string(&document).unwrap(),
            "\"<html><body></body><style></style><script></script></html>\""
        );
    }
}
