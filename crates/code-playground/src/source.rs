//! The three kinds of source a playground edits and the set that holds one
//! text per kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Markup,
    Styles,
    Script,
}

impl SourceKind {
    /// Grading and message order.
    pub const ALL: [SourceKind; 3] = [SourceKind::Markup, SourceKind::Styles, SourceKind::Script];

    pub fn tab_label(self) -> &'static str {
        match self {
            SourceKind::Markup => "HTML",
            SourceKind::Styles => "CSS",
            SourceKind::Script => "JavaScript",
        }
    }

    /// Language id understood by code editors and syntax highlighters.
    pub fn editor_language(self) -> &'static str {
        match self {
            SourceKind::Markup => "html",
            SourceKind::Styles => "css",
            SourceKind::Script => "javascript",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            SourceKind::Markup => "html",
            SourceKind::Styles => "css",
            SourceKind::Script => "js",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tab_label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceKindError(String);

impl fmt::Display for ParseSourceKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown source kind '{}' (expected html, css or js)", self.0)
    }
}

impl std::error::Error for ParseSourceKindError {}

impl FromStr for SourceKind {
    type Err = ParseSourceKindError;

    /// Accepts short ids, editor languages and the serde names, case-insensitively.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "html" | "markup" => Ok(SourceKind::Markup),
            "css" | "styles" => Ok(SourceKind::Styles),
            "js" | "javascript" | "script" => Ok(SourceKind::Script),
            _ => Err(ParseSourceKindError(text.to_owned())),
        }
    }
}

/// One text per [`SourceKind`].
///
/// `SourceSet<&'static str>` holds compile-time constants (reference solution,
/// defaults); `SourceSet<String>` holds live editor buffers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSet<S = String> {
    pub markup: S,
    pub styles: S,
    pub script: S,
}

impl<S> SourceSet<S> {
    pub const fn new(markup: S, styles: S, script: S) -> Self {
        Self { markup, styles, script }
    }

    pub fn get_ref(&self, kind: SourceKind) -> &S {
        match kind {
            SourceKind::Markup => &self.markup,
            SourceKind::Styles => &self.styles,
            SourceKind::Script => &self.script,
        }
    }

    pub fn get_mut(&mut self, kind: SourceKind) -> &mut S {
        match kind {
            SourceKind::Markup => &mut self.markup,
            SourceKind::Styles => &mut self.styles,
            SourceKind::Script => &mut self.script,
        }
    }
}

impl<S: AsRef<str>> SourceSet<S> {
    pub fn get(&self, kind: SourceKind) -> &str {
        self.get_ref(kind).as_ref()
    }

    /// Texts in grading order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceKind, &str)> + '_ {
        SourceKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn to_owned_set(&self) -> SourceSet<String> {
        SourceSet::new(
            self.markup.as_ref().to_owned(),
            self.styles.as_ref().to_owned(),
            self.script.as_ref().to_owned(),
        )
    }

    pub fn total_len(&self) -> usize {
        self.iter().map(|(_, text)| text.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_ids_and_languages() {
        assert_eq!("html".parse::<SourceKind>(), Ok(SourceKind::Markup));
        assert_eq!("CSS".parse::<SourceKind>(), Ok(SourceKind::Styles));
        assert_eq!("js".parse::<SourceKind>(), Ok(SourceKind::Script));
        assert_eq!("javascript".parse::<SourceKind>(), Ok(SourceKind::Script));
        assert!("python".parse::<SourceKind>().is_err());
    }

    #[test]
    fn iterates_in_grading_order() {
        let set = SourceSet::new("a", "b", "c");
        let kinds: Vec<_> = set.iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, SourceKind::ALL);
        assert_eq!(set.to_owned_set().get(SourceKind::Styles), "b");
        assert_eq!(set.total_len(), 3);
    }

    #[test]
    fn serde_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&SourceKind::Styles).unwrap(), "\"styles\"");
        let set: SourceSet = serde_json::from_str(r#"{"markup":"m","styles":"s","script":"j"}"#).unwrap();
        assert_eq!(set.get(SourceKind::Script), "j");
    }
}
