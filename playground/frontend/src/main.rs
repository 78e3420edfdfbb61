use code_playground::diagnostics::mismatch_report;
use code_playground::{
    EvaluationError, Playground, PlaygroundConfig, PreviewDocument, RunId, SourceKind, Verdict,
};
use zoon::{eprintln, println, *};
use zoon::{map_ref, Rgba};

mod code_editor;
use code_editor::CodeEditor;

mod preview_frame;
use preview_frame::preview_frame;

static PLAYGROUND_CONFIG: &str = include_str!("../../../Playground.toml");

const APP_BACKGROUND_GRADIENT: &str =
    "linear-gradient(90deg, #6366f1 0%, #a855f7 50%, #ec4899 100%)";

const TABS_COLUMN_WIDTH: u32 = 180;
const PREVIEW_WIDTH_PERCENT: f64 = 40.;

fn glass_surface_color() -> Rgba {
    color!("rgba(255, 255, 255, 0.1)")
}

fn primary_text_color() -> Rgba {
    color!("#ffffff")
}

fn muted_text_color() -> Rgba {
    color!("rgba(255, 255, 255, 0.7)")
}

fn tab_accent_color(kind: SourceKind) -> Rgba {
    match kind {
        SourceKind::Markup => color!("#eab308"),
        SourceKind::Styles => color!("#22c55e"),
        SourceKind::Script => color!("#3b82f6"),
    }
}

fn main() {
    start_app("app", App::new);
}

#[derive(Clone)]
struct App {
    playground: Mutable<Playground>,
}

impl App {
    fn new() -> impl Element {
        let config = PlaygroundConfig::from_toml_str(PLAYGROUND_CONFIG).unwrap_or_else(|error| {
            eprintln!("{error}; falling back to default settings");
            PlaygroundConfig::default()
        });
        println!(
            "Code Playground started (grading {})",
            if config.grading_enabled { "enabled" } else { "disabled" }
        );
        Self {
            playground: Mutable::new(Playground::new(config)),
        }
        .root()
    }

    fn run(&self) {
        let mut playground = self.playground.lock_mut();
        playground.run();
        let outcome = playground.outcome();
        let run_id = outcome.run_id.map(|run_id| run_id.to_string()).unwrap_or_default();
        println!("Run {run_id}: {}", outcome.verdict.label());
        if let Some(error) = outcome.verdict.error() {
            if let Some(construction_error) = error.construction_error() {
                eprintln!("Failed to compose the preview: {construction_error}");
            }
            for mismatch in error.mismatches() {
                let submitted = playground.buffers().buffer(mismatch.kind);
                let expected = playground.reference().get(mismatch.kind);
                eprintln!("{}", mismatch_report(mismatch, submitted, expected));
            }
        }
    }

    fn grading_enabled(&self) -> bool {
        self.playground.lock_ref().config().grading_enabled
    }

    fn active_tab_signal(&self) -> impl Signal<Item = SourceKind> + use<> {
        self.playground
            .signal_ref(|playground| playground.buffers().active_tab())
            .dedupe()
    }

    fn root(&self) -> impl Element + use<> {
        Stack::new()
            .s(Width::fill())
            .s(Height::fill())
            .layer(
                El::new()
                    .s(Width::fill())
                    .s(Height::fill())
                    .update_raw_el(|raw_el| raw_el.style("background", APP_BACKGROUND_GRADIENT)),
            )
            .update_raw_el({
                let app = self.clone();
                move |raw_el| {
                    raw_el.global_event_handler_with_options(
                        EventOptions::new().preventable().parents_first(),
                        move |event: events::KeyDown| {
                            if event.repeat() {
                                return;
                            }
                            if event.shift_key() && event.key() == "Enter" {
                                event.prevent_default();
                                app.run();
                            }
                        },
                    )
                }
            })
            // Expose window.codePlayground for browser automation
            .update_raw_el({
                let app = self.clone();
                move |raw_el| {
                    app.expose_automation_api();
                    raw_el
                }
            })
            .layer(self.main_layout())
    }

    fn expose_automation_api(&self) {
        use wasm_bindgen::prelude::*;

        let Some(window) = web_sys::window() else {
            eprintln!("No window, automation API not installed");
            return;
        };
        let api = js_sys::Object::new();

        // setCode(kind, code) - replace a buffer, kind is "html", "css" or "js"
        let playground_for_set = self.playground.clone();
        let set_code = Closure::wrap(Box::new(move |kind: String, code: String| {
            match kind.parse::<SourceKind>() {
                Ok(kind) => playground_for_set.lock_mut().set_buffer(kind, code),
                Err(error) => eprintln!("setCode: {error}"),
            }
        }) as Box<dyn Fn(String, String)>);
        js_sys::Reflect::set(&api, &"setCode".into(), set_code.as_ref()).ok();
        set_code.forget();

        // getCode(kind) - current buffer text, empty for an unknown kind
        let playground_for_get = self.playground.clone();
        let get_code = Closure::wrap(Box::new(move |kind: String| -> String {
            kind.parse::<SourceKind>()
                .map(|kind| playground_for_get.lock_ref().buffers().buffer(kind).to_owned())
                .unwrap_or_default()
        }) as Box<dyn Fn(String) -> String>);
        js_sys::Reflect::set(&api, &"getCode".into(), get_code.as_ref()).ok();
        get_code.forget();

        // run() - same as the Run button
        let app = self.clone();
        let run_fn = Closure::wrap(Box::new(move || app.run()) as Box<dyn Fn()>);
        js_sys::Reflect::set(&api, &"run".into(), run_fn.as_ref()).ok();
        run_fn.forget();

        // getVerdict() - label of the latest verdict
        let playground_for_verdict = self.playground.clone();
        let get_verdict = Closure::wrap(Box::new(move || -> String {
            playground_for_verdict.lock_ref().verdict().label().to_owned()
        }) as Box<dyn Fn() -> String>);
        js_sys::Reflect::set(&api, &"getVerdict".into(), get_verdict.as_ref()).ok();
        get_verdict.forget();

        js_sys::Reflect::set(&window, &"codePlayground".into(), &api).ok();
    }

    fn main_layout(&self) -> impl Element + use<> {
        Column::new()
            .s(Width::fill())
            .s(Height::fill())
            .s(Padding::all(16))
            .s(Gap::new().y(16))
            .s(Font::new().color(primary_text_color()))
            .item(self.header_bar())
            .item(self.panels_row())
    }

    fn glass_panel<T: Element>(&self, content: T) -> impl Element + use<T> {
        El::new()
            .s(Width::fill())
            .s(Height::fill())
            .s(Background::new().color(glass_surface_color()))
            .s(RoundedCorners::all(12))
            .s(Shadows::new([
                Shadow::new()
                    .color(color!("rgba(15, 23, 42, 0.25)"))
                    .y(10)
                    .blur(30)
                    .spread(-8),
            ]))
            .update_raw_el(|raw_el| raw_el.style("backdrop-filter", "blur(16px)"))
            .child(content)
    }

    fn header_bar(&self) -> impl Element + use<> {
        El::new()
            .s(Width::fill())
            .s(Height::exact(72))
            .child(
                self.glass_panel(
                    Row::new()
                        .s(Width::fill())
                        .s(Height::fill())
                        .s(Padding::new().x(16))
                        .s(Align::new().center_y())
                        .s(Gap::new().x(12))
                        .item(
                            El::new()
                                .s(Font::new().size(24).weight(FontWeight::Bold).no_wrap())
                                .child("Code Playground"),
                        )
                        .item(self.mode_badge())
                        .item(El::new().s(Align::new().right()).child(self.run_button())),
                ),
            )
    }

    fn mode_badge(&self) -> impl Element + use<> {
        let label = if self.grading_enabled() { "Exercise" } else { "Sandbox" };
        El::new()
            .s(Padding::new().x(10).y(3))
            .s(RoundedCorners::all(999))
            .s(Background::new().color(color!("rgba(0, 0, 0, 0.18)")))
            .s(Font::new().size(12).weight(FontWeight::SemiBold).color(muted_text_color()).no_wrap())
            .child(label)
    }

    fn run_button(&self) -> impl Element {
        let hovered = Mutable::new(false);
        Button::new()
            .s(Padding::new().x(24).y(8))
            .s(RoundedCorners::all(8))
            .s(Font::new().color(primary_text_color()).weight(FontWeight::SemiBold))
            .s(Shadows::new([
                Shadow::new()
                    .color(color!("rgba(15, 23, 42, 0.22)"))
                    .y(6)
                    .blur(12)
                    .spread(-4),
            ]))
            .s(Background::new().color_signal(
                hovered
                    .signal()
                    .map_bool(|| color!("#1d4ed8"), || color!("#2563eb")),
            ))
            .label(
                Row::new()
                    .s(Align::new().center_y())
                    .s(Gap::new().x(8))
                    .item(El::new().s(Font::new().size(15).no_wrap()).child("Run Code"))
                    .item(
                        El::new()
                            .s(Font::new().size(12).color(muted_text_color()).no_wrap())
                            .child("Shift + Enter"),
                    ),
            )
            .on_hovered_change(move |is_hovered| hovered.set(is_hovered))
            .on_press({
                let app = self.clone();
                move || app.run()
            })
    }

    fn panels_row(&self) -> impl Element + use<> {
        Row::new()
            .s(Width::fill())
            .s(Height::fill())
            .s(Align::new().top())
            .s(Gap::new().x(16))
            .item(
                El::new()
                    .s(Width::exact(TABS_COLUMN_WIDTH))
                    .s(Height::fill())
                    .child(self.glass_panel(self.tabs_column())),
            )
            .item(
                El::new()
                    .s(Width::fill())
                    .s(Height::fill())
                    .child(self.glass_panel(self.editor_panel())),
            )
            .item(
                El::new()
                    .s(Width::percent(PREVIEW_WIDTH_PERCENT))
                    .s(Height::fill())
                    .child(self.glass_panel(self.output_panel())),
            )
    }

    fn tabs_column(&self) -> impl Element + use<> {
        Column::new()
            .s(Width::fill())
            .s(Height::fill())
            .s(Padding::all(8))
            .s(Gap::new().y(8))
            .items(SourceKind::ALL.map(|kind| self.source_tab(kind)))
    }

    fn source_tab(&self, kind: SourceKind) -> impl Element + use<> {
        let hovered = Mutable::new(false);
        let is_active_signal = self
            .active_tab_signal()
            .map(move |active| active == kind)
            .broadcast();
        Button::new()
            .s(Width::fill())
            .s(Padding::new().x(16).y(14))
            .s(RoundedCorners::all(8))
            .s(Font::new().size(15).weight(FontWeight::SemiBold).no_wrap())
            .s(Align::new().center_x())
            .s(Background::new().color_signal(map_ref! {
                let hovered = hovered.signal(),
                let is_active = is_active_signal.signal() =>
                match (*is_active, *hovered) {
                    (true, _) => tab_accent_color(kind),
                    (false, true) => color!("rgba(255, 255, 255, 0.2)"),
                    (false, false) => color!("rgba(255, 255, 255, 0)"),
                }
            }))
            .label(El::new().child(kind.tab_label()))
            .on_hovered_change(move |is_hovered| hovered.set(is_hovered))
            .on_press({
                let playground = self.playground.clone();
                move || playground.lock_mut().select_tab(kind)
            })
    }

    fn editor_panel(&self) -> impl Element + use<> {
        El::new()
            .s(Width::fill())
            .s(Height::fill())
            .s(Padding::all(16))
            .child(
                El::new()
                    .s(Width::fill())
                    .s(Height::fill())
                    .s(RoundedCorners::all(8))
                    .s(Clip::both())
                    .s(Background::new().color(color!("#1e1e1e")))
                    .child(self.code_editor_widget()),
            )
    }

    fn code_editor_widget(&self) -> impl Element + use<> {
        let content = self
            .playground
            .signal_ref(|playground| playground.buffers().active_buffer().to_owned())
            .dedupe_cloned();
        let language = self
            .active_tab_signal()
            .map(SourceKind::editor_language);
        let playground = self.playground.clone();
        CodeEditor::new(content, language, move |value| {
            let mut playground = playground.lock_mut();
            let kind = playground.buffers().active_tab();
            playground.apply_editor_change(kind, value);
        })
        .build()
    }

    fn output_panel(&self) -> impl Element + use<> {
        let playground = self.playground.clone();
        Column::new()
            .s(Width::fill())
            .s(Height::fill())
            .s(Padding::all(16))
            .s(Gap::new().y(12))
            .item_signal(
                self.playground
                    .signal_ref(|playground| playground.verdict().clone())
                    .dedupe_cloned()
                    .map(|verdict| status_panel(&verdict)),
            )
            .item(
                El::new()
                    .s(Width::fill())
                    .s(Height::fill())
                    .update_raw_el(|raw_el| raw_el.attr("data-panel", "preview"))
                    .child_signal(
                        self.playground
                            .signal_ref(|playground| playground.outcome().run_id)
                            .dedupe()
                            .map(move |run_id| {
                                let playground = playground.lock_ref();
                                Some(preview_or_placeholder(run_id, playground.preview()))
                            }),
                    ),
            )
    }
}

fn preview_or_placeholder(run_id: Option<RunId>, preview: &PreviewDocument) -> impl Element + use<> {
    match run_id {
        Some(run_id) if !preview.is_empty() => Either::Right(preview_frame(run_id, preview)),
        Some(_) => Either::Left(preview_placeholder("Fix the errors above to see the preview")),
        None => Either::Left(preview_placeholder("Run to see preview")),
    }
}

fn preview_placeholder(text: &'static str) -> impl Element + use<> {
    El::new()
        .s(Width::fill())
        .s(Height::fill())
        .s(RoundedCorners::all(16))
        .s(Background::new().color(color!("white")))
        .child(
            El::new()
                .s(Align::center())
                .s(Font::new().size(14).color(color!("#64748b")).no_wrap())
                .child(text),
        )
}

/// `None` until something has been graded.
fn status_panel(verdict: &Verdict) -> Option<impl Element + use<>> {
    match verdict {
        Verdict::Unevaluated => None,
        Verdict::Correct => Some(status_box(
            color!("rgba(34, 197, 94, 0.85)"),
            "Correct!",
            vec!["Your code matches the expected solution.".to_owned()],
        )),
        Verdict::Incorrect(EvaluationError::ContentMismatch(_)) => Some(status_box(
            color!("rgba(239, 68, 68, 0.85)"),
            "Not quite",
            verdict.combined_message().into_iter().collect(),
        )),
        Verdict::Incorrect(EvaluationError::ConstructionFailure(error)) => Some(status_box(
            color!("rgba(249, 115, 22, 0.85)"),
            "Preview failed",
            vec![error.to_string()],
        )),
    }
}

fn status_box(background: Rgba, title: &'static str, lines: Vec<String>) -> impl Element + use<> {
    Column::new()
        .s(Width::fill())
        .s(Padding::new().x(14).y(10))
        .s(Gap::new().y(4))
        .s(RoundedCorners::all(8))
        .s(Background::new().color(background))
        .s(Font::new().color(primary_text_color()))
        .item(El::new().s(Font::new().size(15).weight(FontWeight::Bold)).child(title))
        .items(
            lines
                .into_iter()
                .map(|line| El::new().s(Font::new().size(13)).child(line)),
        )
}
