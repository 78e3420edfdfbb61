//! Run-trigger behaviour of a graded playground.

use code_playground::{
    EvaluationError, Playground, PlaygroundConfig, REFERENCE_SOLUTION, SourceKind, Verdict,
};

const REFERENCE_PREVIEW: &str = "<html><body><h1>Welcome to the Code Playground</h1></body><style>h1 { color: green; }</style><script>console.log('Hello World!');</script></html>";

fn solved_playground() -> Playground {
    Playground::with_sources(PlaygroundConfig::default(), &REFERENCE_SOLUTION)
}

fn mismatching_kinds(verdict: &Verdict) -> Vec<SourceKind> {
    match verdict {
        Verdict::Incorrect(EvaluationError::ContentMismatch(mismatches)) => {
            mismatches.iter().map(|mismatch| mismatch.kind).collect()
        }
        other => panic!("expected a content mismatch, got {other:?}"),
    }
}

#[test]
fn reference_solution_is_correct_and_previewed() {
    let mut playground = solved_playground();
    let outcome = playground.run();

    assert_eq!(outcome.verdict, Verdict::Correct);
    assert_eq!(outcome.preview.as_str(), REFERENCE_PREVIEW);
    assert_eq!(outcome.verdict.combined_message(), None);
}

#[test]
fn typed_in_solution_is_correct() {
    let mut playground = Playground::default();
    playground.set_buffer(SourceKind::Markup, "<h1>Welcome to the Code Playground</h1>");
    playground.set_buffer(SourceKind::Styles, "h1 { color: green; }");
    playground.set_buffer(SourceKind::Script, "console.log('Hello World!');");

    assert!(playground.run().verdict.is_correct());
    assert_eq!(playground.preview().as_str(), REFERENCE_PREVIEW);
}

#[test]
fn single_wrong_buffer_gives_one_message() {
    for kind in SourceKind::ALL {
        let mut playground = solved_playground();
        let text = format!("{}!", REFERENCE_SOLUTION.get(kind));
        playground.set_buffer(kind, text);

        let outcome = playground.run();
        assert_eq!(mismatching_kinds(&outcome.verdict), vec![kind]);
        assert_eq!(outcome.verdict.error().unwrap().messages().len(), 1);
        assert!(outcome.preview.is_empty());
    }
}

#[test]
fn unedited_defaults_fail_everywhere_in_order() {
    let mut playground = Playground::default();
    let outcome = playground.run();

    assert_eq!(mismatching_kinds(&outcome.verdict), SourceKind::ALL.to_vec());
    assert_eq!(
        outcome.verdict.combined_message().as_deref(),
        Some(
            "HTML does not match the expected solution. \
             CSS does not match the expected solution. \
             JavaScript does not match the expected solution."
        )
    );
    assert!(outcome.preview.is_empty());
}

#[test]
fn trailing_space_is_a_mismatch() {
    let mut playground = solved_playground();
    playground.set_buffer(SourceKind::Styles, "h1 { color: green; } ");

    let outcome = playground.run();
    assert_eq!(mismatching_kinds(&outcome.verdict), vec![SourceKind::Styles]);
    assert_eq!(
        outcome.verdict.error().unwrap().mismatches()[0].first_difference,
        "h1 { color: green; }".len()
    );
}

#[test]
fn repeated_runs_give_the_same_verdict() {
    let mut playground = Playground::default();
    let first = playground.run().clone();
    let second = playground.run().clone();
    assert_eq!(first.verdict, second.verdict);
    assert_eq!(first.preview, second.preview);

    let mut playground = solved_playground();
    let first = playground.run().clone();
    let second = playground.run().clone();
    assert_eq!(first.verdict, second.verdict);
    assert_eq!(first.preview, second.preview);
}

#[test]
fn fixing_the_code_clears_stale_messages() {
    let mut playground = solved_playground();
    playground.set_buffer(SourceKind::Script, "console.log('Hello');");
    assert!(playground.run().verdict.error().is_some());

    playground.set_buffer(SourceKind::Script, REFERENCE_SOLUTION.script);
    let outcome = playground.run();
    assert_eq!(outcome.verdict, Verdict::Correct);
    assert!(outcome.verdict.error().is_none());
    assert_eq!(outcome.preview.as_str(), REFERENCE_PREVIEW);
}

#[test]
fn breaking_the_code_discards_the_previous_preview() {
    let mut playground = solved_playground();
    assert!(!playground.run().preview.is_empty());

    playground.set_buffer(SourceKind::Markup, "<h1>Welcome</h1>");
    let outcome = playground.run();
    assert_eq!(mismatching_kinds(&outcome.verdict), vec![SourceKind::Markup]);
    assert!(outcome.preview.is_empty());
}

#[test]
fn cleared_editor_counts_as_empty_buffer() {
    let mut playground = solved_playground();
    playground.apply_editor_change(SourceKind::Script, None);
    assert_eq!(playground.buffers().buffer(SourceKind::Script), "");

    let outcome = playground.run();
    assert_eq!(mismatching_kinds(&outcome.verdict), vec![SourceKind::Script]);
}

#[test]
fn switching_tabs_does_not_affect_grading() {
    let mut playground = solved_playground();
    playground.select_tab(SourceKind::Styles);
    assert_eq!(playground.buffers().active_buffer(), REFERENCE_SOLUTION.styles);
    assert!(playground.run().verdict.is_correct());
}

#[test]
fn oversized_preview_is_a_construction_failure() {
    let config = PlaygroundConfig {
        max_preview_bytes: REFERENCE_PREVIEW.len() - 1,
        ..PlaygroundConfig::default()
    };
    let mut playground = Playground::with_sources(config, &REFERENCE_SOLUTION);

    let outcome = playground.run();
    let error = outcome.verdict.error().expect("construction failure");
    assert!(matches!(error, EvaluationError::ConstructionFailure(_)));
    assert!(error.mismatches().is_empty());
    assert_eq!(error.messages().len(), 1);
    assert!(outcome.preview.is_empty());

    // The exact limit is still allowed.
    let config = PlaygroundConfig {
        max_preview_bytes: REFERENCE_PREVIEW.len(),
        ..PlaygroundConfig::default()
    };
    let mut playground = Playground::with_sources(config, &REFERENCE_SOLUTION);
    assert!(playground.run().verdict.is_correct());
}
