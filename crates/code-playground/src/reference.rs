//! Compile-time texts: the reference solution and the default buffers of both
//! playground variants.

use crate::source::SourceSet;

pub const REFERENCE_SOLUTION: SourceSet<&'static str> = SourceSet::new(
    "<h1>Welcome to the Code Playground</h1>",
    "h1 { color: green; }",
    "console.log('Hello World!');",
);

/// Starting buffers of the ungraded sandbox.
pub const SANDBOX_DEFAULTS: SourceSet<&'static str> = SourceSet::new(
    "<h1>Hello World!</h1>",
    "h1 { color: red; }",
    "console.log('Hello World!');",
);

/// Starting buffers of the graded exercise. Every buffer differs from
/// [`REFERENCE_SOLUTION`] so the learner has something to fix in each tab.
pub const EXERCISE_DEFAULTS: SourceSet<&'static str> = SourceSet::new(
    "<h1>Hello World!</h1>",
    "h1 { color: red; }",
    "console.log('Hello, Playground!');",
);

pub fn defaults(grading_enabled: bool) -> SourceSet<&'static str> {
    if grading_enabled {
        EXERCISE_DEFAULTS
    } else {
        SANDBOX_DEFAULTS
    }
}
