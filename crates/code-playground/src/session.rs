use std::fmt;

use ulid::Ulid;

use crate::buffers::BufferStore;
use crate::config::PlaygroundConfig;
use crate::grader::{self, Evaluation, Verdict};
use crate::preview::PreviewDocument;
use crate::reference::{self, REFERENCE_SOLUTION};
use crate::source::{SourceKind, SourceSet};

/// Identity of one run. Every trigger gets a fresh id, so a front end can
/// restart the preview even when the document did not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub Ulid);

impl RunId {
    pub fn generate() -> Self {
        Self(Ulid::new())
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Verdict and preview of the latest run, always replaced as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// `None` until the first run.
    pub run_id: Option<RunId>,
    pub verdict: Verdict,
    pub preview: PreviewDocument,
}

/// State of one playground: the editor buffers and the latest run outcome.
///
/// Buffers change only through [`Playground::set_buffer`],
/// [`Playground::apply_editor_change`] and [`Playground::select_tab`]; the
/// outcome changes only through [`Playground::run`].
#[derive(Clone, Debug)]
pub struct Playground {
    config: PlaygroundConfig,
    reference: SourceSet<&'static str>,
    buffers: BufferStore,
    outcome: RunOutcome,
}

impl Playground {
    /// Seeds the buffers with the defaults of the configured variant.
    pub fn new(config: PlaygroundConfig) -> Self {
        let defaults = reference::defaults(config.grading_enabled);
        Self::with_sources(config, &defaults)
    }

    pub fn with_sources<S: AsRef<str>>(config: PlaygroundConfig, sources: &SourceSet<S>) -> Self {
        Self {
            config,
            reference: REFERENCE_SOLUTION,
            buffers: BufferStore::new(sources),
            outcome: RunOutcome::default(),
        }
    }

    pub fn set_buffer(&mut self, kind: SourceKind, text: impl Into<String>) {
        self.buffers.set_buffer(kind, text);
    }

    pub fn apply_editor_change(&mut self, kind: SourceKind, value: Option<String>) {
        self.buffers.apply_editor_change(kind, value);
    }

    pub fn select_tab(&mut self, kind: SourceKind) {
        self.buffers.select_tab(kind);
    }

    /// The trigger: grades the current buffers (when grading is enabled),
    /// composes the preview and replaces the previous outcome.
    pub fn run(&mut self) -> &RunOutcome {
        let run_id = RunId::generate();
        let sources = self.buffers.sources();
        log::debug!("Run {run_id}: {} bytes of source", sources.total_len());

        let Evaluation { verdict, preview } = if self.config.grading_enabled {
            grader::evaluate(sources, &self.reference, self.config.max_preview_bytes)
        } else {
            grader::preview_only(sources, self.config.max_preview_bytes)
        };

        match &verdict {
            Verdict::Incorrect(error) if error.construction_error().is_some() => {
                log::warn!("Run {run_id}: {error}");
            }
            verdict if verdict.label() != self.outcome.verdict.label() => {
                log::info!(
                    "Run {run_id}: verdict {} -> {}",
                    self.outcome.verdict.label(),
                    verdict.label()
                );
            }
            _ => {}
        }

        self.outcome = RunOutcome {
            run_id: Some(run_id),
            verdict,
            preview,
        };
        &self.outcome
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn reference(&self) -> &SourceSet<&'static str> {
        &self.reference
    }

    pub fn buffers(&self) -> &BufferStore {
        &self.buffers
    }

    pub fn outcome(&self) -> &RunOutcome {
        &self.outcome
    }

    pub fn verdict(&self) -> &Verdict {
        &self.outcome.verdict
    }

    pub fn preview(&self) -> &PreviewDocument {
        &self.outcome.preview
    }
}

impl Default for Playground {
    fn default() -> Self {
        Self::new(PlaygroundConfig::default())
    }
}
