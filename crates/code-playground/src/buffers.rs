use crate::source::{SourceKind, SourceSet};

/// Live editor texts plus the tab currently shown in the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferStore {
    sources: SourceSet<String>,
    active_tab: SourceKind,
}

impl BufferStore {
    pub fn new<S: AsRef<str>>(initial: &SourceSet<S>) -> Self {
        Self {
            sources: initial.to_owned_set(),
            active_tab: SourceKind::default(),
        }
    }

    /// Replaces the text for `kind`. No validation.
    pub fn set_buffer(&mut self, kind: SourceKind, text: impl Into<String>) {
        *self.sources.get_mut(kind) = text.into();
    }

    /// Editor change callback. An editor cleared down to nothing reports no
    /// value at all; that is stored as an empty buffer.
    pub fn apply_editor_change(&mut self, kind: SourceKind, value: Option<String>) {
        self.set_buffer(kind, value.unwrap_or_default());
    }

    pub fn select_tab(&mut self, kind: SourceKind) {
        self.active_tab = kind;
    }

    pub fn active_tab(&self) -> SourceKind {
        self.active_tab
    }

    pub fn buffer(&self, kind: SourceKind) -> &str {
        self.sources.get(kind)
    }

    pub fn active_buffer(&self) -> &str {
        self.buffer(self.active_tab)
    }

    pub fn sources(&self) -> &SourceSet<String> {
        &self.sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::SANDBOX_DEFAULTS;

    #[test]
    fn set_buffer_touches_only_its_kind() {
        let mut store = BufferStore::new(&SANDBOX_DEFAULTS);
        store.set_buffer(SourceKind::Styles, "p { margin: 0; }");
        assert_eq!(store.buffer(SourceKind::Styles), "p { margin: 0; }");
        assert_eq!(store.buffer(SourceKind::Markup), SANDBOX_DEFAULTS.markup);
        assert_eq!(store.buffer(SourceKind::Script), SANDBOX_DEFAULTS.script);
    }

    #[test]
    fn select_tab_keeps_texts() {
        let mut store = BufferStore::new(&SANDBOX_DEFAULTS);
        assert_eq!(store.active_tab(), SourceKind::Markup);
        store.select_tab(SourceKind::Script);
        assert_eq!(store.active_tab(), SourceKind::Script);
        assert_eq!(store.active_buffer(), SANDBOX_DEFAULTS.script);
        assert_eq!(store.sources(), &SANDBOX_DEFAULTS.to_owned_set());
    }

    #[test]
    fn missing_editor_value_becomes_empty() {
        let mut store = BufferStore::new(&SANDBOX_DEFAULTS);
        store.apply_editor_change(SourceKind::Markup, None);
        assert_eq!(store.buffer(SourceKind::Markup), "");
        store.apply_editor_change(SourceKind::Markup, Some("<p>x</p>".to_owned()));
        assert_eq!(store.buffer(SourceKind::Markup), "<p>x</p>");
    }
}
