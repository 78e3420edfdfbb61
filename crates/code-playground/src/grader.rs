//! Exact-match grading and the verdict it produces.
//!
//! Texts are compared byte for byte: no whitespace trimming, case folding or
//! any notion of equivalent code. One stray space fails a buffer.

use std::fmt;

use smallvec::SmallVec;

use crate::preview::{self, PreviewDocument, PreviewError};
use crate::source::{SourceKind, SourceSet};

/// A buffer that differs from its reference text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub kind: SourceKind,
    /// Char offset in the submitted text where it stops agreeing with the
    /// reference.
    pub first_difference: usize,
}

impl Mismatch {
    pub fn message(&self) -> String {
        format!("{} does not match the expected solution.", self.kind.tab_label())
    }
}

/// At most one entry per [`SourceKind`], in grading order.
pub type Mismatches = SmallVec<[Mismatch; 3]>;

pub fn first_difference(submitted: &str, expected: &str) -> usize {
    submitted
        .chars()
        .zip(expected.chars())
        .take_while(|(submitted, expected)| submitted == expected)
        .count()
}

pub fn grade<S: AsRef<str>, R: AsRef<str>>(
    submission: &SourceSet<S>,
    reference: &SourceSet<R>,
) -> Mismatches {
    SourceKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let submitted = submission.get(kind);
            let expected = reference.get(kind);
            (submitted != expected).then(|| Mismatch {
                kind,
                first_difference: first_difference(submitted, expected),
            })
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvaluationError {
    ContentMismatch(Mismatches),
    ConstructionFailure(PreviewError),
}

impl EvaluationError {
    /// Panel lines: one per mismatching buffer, or the single failure message.
    pub fn messages(&self) -> Vec<String> {
        match self {
            EvaluationError::ContentMismatch(mismatches) => {
                mismatches.iter().map(Mismatch::message).collect()
            }
            EvaluationError::ConstructionFailure(error) => vec![error.to_string()],
        }
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        match self {
            EvaluationError::ContentMismatch(mismatches) => mismatches.as_slice(),
            EvaluationError::ConstructionFailure(_) => &[],
        }
    }

    pub fn construction_error(&self) -> Option<&PreviewError> {
        match self {
            EvaluationError::ContentMismatch(_) => None,
            EvaluationError::ConstructionFailure(error) => Some(error),
        }
    }
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationError::ContentMismatch(_) => f.write_str(&self.messages().join(" ")),
            EvaluationError::ConstructionFailure(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for EvaluationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvaluationError::ContentMismatch(_) => None,
            EvaluationError::ConstructionFailure(error) => Some(error),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Verdict {
    #[default]
    Unevaluated,
    Correct,
    Incorrect(EvaluationError),
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }

    pub fn error(&self) -> Option<&EvaluationError> {
        match self {
            Verdict::Incorrect(error) => Some(error),
            Verdict::Unevaluated | Verdict::Correct => None,
        }
    }

    /// Space-joined messages of an incorrect verdict.
    pub fn combined_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Unevaluated => "unevaluated",
            Verdict::Correct => "correct",
            Verdict::Incorrect(EvaluationError::ContentMismatch(_)) => "incorrect",
            Verdict::Incorrect(EvaluationError::ConstructionFailure(_)) => "construction-failure",
        }
    }
}

/// Result of one trigger: the verdict and the preview it allows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub preview: PreviewDocument,
}

impl Evaluation {
    fn failed(error: EvaluationError) -> Self {
        Self {
            verdict: Verdict::Incorrect(error),
            preview: PreviewDocument::empty(),
        }
    }
}

/// Grades `submission` and composes the preview only when every buffer matches.
pub fn evaluate<S: AsRef<str>, R: AsRef<str>>(
    submission: &SourceSet<S>,
    reference: &SourceSet<R>,
    max_preview_bytes: usize,
) -> Evaluation {
    let mismatches = grade(submission, reference);
    if !mismatches.is_empty() {
        return Evaluation::failed(EvaluationError::ContentMismatch(mismatches));
    }
    match preview::compose(submission, max_preview_bytes) {
        Ok(preview) => Evaluation {
            verdict: Verdict::Correct,
            preview,
        },
        Err(error) => Evaluation::failed(EvaluationError::ConstructionFailure(error)),
    }
}

/// Ungraded run: composes the preview and leaves the verdict unevaluated.
pub fn preview_only<S: AsRef<str>>(submission: &SourceSet<S>, max_preview_bytes: usize) -> Evaluation {
    match preview::compose(submission, max_preview_bytes) {
        Ok(preview) => Evaluation {
            verdict: Verdict::Unevaluated,
            preview,
        },
        Err(error) => Evaluation::failed(EvaluationError::ConstructionFailure(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::REFERENCE_SOLUTION;

    #[test]
    fn first_difference_counts_chars() {
        assert_eq!(first_difference("abc", "abd"), 2);
        assert_eq!(first_difference("ab", "abc"), 2);
        assert_eq!(first_difference("abc ", "abc"), 3);
        assert_eq!(first_difference("žluť", "žlutý"), 3);
        assert_eq!(first_difference("", "x"), 0);
    }

    #[test]
    fn grade_reports_only_failing_buffers() {
        let mut submission = REFERENCE_SOLUTION.to_owned_set();
        submission.styles = "h1 { color: Green; }".to_owned();
        let mismatches = grade(&submission, &REFERENCE_SOLUTION);
        assert_eq!(
            mismatches.as_slice(),
            &[Mismatch { kind: SourceKind::Styles, first_difference: 12 }]
        );
    }

    #[test]
    fn construction_failure_keeps_its_own_message() {
        let evaluation = evaluate(&REFERENCE_SOLUTION, &REFERENCE_SOLUTION, 10);
        let error = evaluation.verdict.error().unwrap();
        assert!(error.mismatches().is_empty());
        assert!(matches!(
            error.construction_error(),
            Some(PreviewError::TooLarge { limit: 10, .. })
        ));
        assert_eq!(evaluation.verdict.label(), "construction-failure");
        assert!(evaluation.preview.is_empty());
    }

    #[test]
    fn preview_only_skips_grading() {
        let submission = SourceSet::new("x", "y", "z");
        let evaluation = preview_only(&submission, usize::MAX);
        assert_eq!(evaluation.verdict, Verdict::Unevaluated);
        assert!(!evaluation.preview.is_empty());
    }
}
