//! JSON shape of `code-playground grade --format json`.

use code_playground::{EvaluationError, RunOutcome, SourceKind};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GradeReport {
    pub run_id: Option<String>,
    pub verdict: &'static str,
    /// Per-buffer messages of a content mismatch.
    pub mismatches: Vec<MismatchReport>,
    /// Message of a failed preview composition.
    pub construction_error: Option<String>,
    pub combined_message: Option<String>,
    pub preview: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MismatchReport {
    pub kind: SourceKind,
    pub message: String,
    pub first_difference: usize,
}

impl GradeReport {
    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        let error = outcome.verdict.error();
        Self {
            run_id: outcome.run_id.map(|run_id| run_id.to_string()),
            verdict: outcome.verdict.label(),
            mismatches: error
                .map(EvaluationError::mismatches)
                .unwrap_or_default()
                .iter()
                .map(|mismatch| MismatchReport {
                    kind: mismatch.kind,
                    message: mismatch.message(),
                    first_difference: mismatch.first_difference,
                })
                .collect(),
            construction_error: error
                .and_then(EvaluationError::construction_error)
                .map(ToString::to_string),
            combined_message: outcome.verdict.combined_message(),
            preview: (!outcome.preview.is_empty()).then(|| outcome.preview.to_string()),
        }
    }
}
