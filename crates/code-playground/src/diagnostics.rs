//! Human-readable reports pointing at where a submission leaves the reference.

use ariadne::{Config, Label, Report, ReportKind, Source};

use crate::grader::Mismatch;
use crate::source::SourceKind;

const EXPECTED_SNIPPET_CHARS: usize = 40;

/// Name shown in report headers.
pub fn file_name(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Markup => "index.html",
        SourceKind::Styles => "style.css",
        SourceKind::Script => "script.js",
    }
}

fn expected_snippet(expected: &str, offset: usize) -> String {
    let rest: String = expected.chars().skip(offset).take(EXPECTED_SNIPPET_CHARS + 1).collect();
    match rest.chars().count() {
        0 => "expected nothing more here".to_owned(),
        count if count > EXPECTED_SNIPPET_CHARS => {
            let head: String = rest.chars().take(EXPECTED_SNIPPET_CHARS).collect();
            format!("expected `{head}…`")
        }
        _ => format!("expected `{rest}`"),
    }
}

/// Renders an uncolored ariadne report for `mismatch` over the submitted text.
pub fn mismatch_report(mismatch: &Mismatch, submitted: &str, expected: &str) -> String {
    let filename = file_name(mismatch.kind);
    let len = submitted.chars().count();
    if len == 0 {
        return format!(
            "{} ({filename} is empty, {})",
            mismatch.message(),
            expected_snippet(expected, 0)
        );
    }
    // A submission that is a strict prefix of the reference points at its last char.
    let start = mismatch.first_difference.min(len - 1);
    let span = start..len;

    let mut report_bytes = Vec::new();
    let written = Report::build(ReportKind::Error, (filename, span.clone()))
        .with_config(Config::default().with_color(false))
        .with_message(mismatch.message())
        .with_label(
            Label::new((filename, span))
                .with_message(expected_snippet(expected, mismatch.first_difference)),
        )
        .finish()
        .write((filename, Source::from(submitted)), &mut report_bytes);
    match written {
        Ok(()) => String::from_utf8_lossy(&report_bytes).into_owned(),
        Err(error) => {
            log::warn!("Failed to render mismatch report for {filename}: {error}");
            mismatch.message()
        }
    }
}
