//! Core of the HTML/CSS/JS code playground: editor buffers, the exact-match
//! grader and the composer of the sandboxed preview document.
//!
//! Everything here is synchronous and UI-agnostic; the MoonZoon front end in
//! `playground/` and the `code-playground` CLI drive the same [`Playground`].

pub mod buffers;
pub mod config;
pub mod diagnostics;
pub mod grader;
pub mod preview;
pub mod reference;
pub mod session;
pub mod source;

pub use buffers::BufferStore;
pub use config::{ConfigError, PlaygroundConfig};
pub use grader::{EvaluationError, Mismatch, Verdict};
pub use preview::{PreviewDocument, PreviewError, SANDBOX_POLICY};
pub use reference::REFERENCE_SOLUTION;
pub use session::{Playground, RunId, RunOutcome};
pub use source::{SourceKind, SourceSet};
