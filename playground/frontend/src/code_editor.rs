use zoon::*;

/// Plain `<textarea>` editor.
///
/// The editor reports `None` when the event carries no readable value; the
/// store turns that into an empty buffer.
pub struct CodeEditor<C, L, F> {
    content: C,
    language: L,
    on_change: F,
}

impl<C, L, F> CodeEditor<C, L, F>
where
    C: Signal<Item = String> + Unpin + 'static,
    L: Signal<Item = &'static str> + Unpin + 'static,
    F: FnMut(Option<String>) + 'static,
{
    pub fn new(content: C, language: L, on_change: F) -> Self {
        Self {
            content,
            language,
            on_change,
        }
    }

    pub fn build(self) -> impl Element {
        let Self {
            content,
            language,
            mut on_change,
        } = self;
        RawHtmlEl::new("textarea")
            .class("code-editor")
            .attr("spellcheck", "false")
            .attr("autocomplete", "off")
            .attr_signal("data-language", language)
            // Setting the same value again keeps the caret where it is.
            .prop_signal("value", content)
            .style("width", "100%")
            .style("height", "100%")
            .style("box-sizing", "border-box")
            .style("resize", "none")
            .style("border", "none")
            .style("outline", "none")
            .style("padding", "16px")
            .style("background", "transparent")
            .style("color", "#e6ebff")
            .style("font-family", "'JetBrains Mono', monospace")
            .style("font-size", "14px")
            .style("line-height", "1.5")
            .style("tab-size", "2")
            .event_handler(move |event: events::Input| {
                let value = event
                    .target()
                    .and_then(|target| js_sys::Reflect::get(&target, &"value".into()).ok())
                    .and_then(|value| value.as_string());
                on_change(value);
            })
    }
}
