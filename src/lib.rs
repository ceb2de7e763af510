//! Reorganizes the members of Unity C# classes into canonical `#region`
//! buckets: inspector fields, runtime data, Unity lifecycle callbacks (in
//! execution order), public API, internal logic and debug helpers.
//!
//! ```
//! let source = "class A\n{\n    void Update() { }\n    int hp;\n}\n";
//! let output = regionsort::process_script(source).unwrap();
//! assert!(output.contains("#region === RUNTIME DATA ==="));
//! ```

pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod csharp;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod lifecycle;
pub mod model;
pub mod reorganize;
pub mod rewrite;

pub use crate::classify::{classify, Classifier, DirectiveRule};
pub use crate::errors::{Error, Result};
pub use crate::lifecycle::{sort_lifecycle, LIFECYCLE_ORDER};
pub use crate::model::{Bucket, Member, MemberKind, MemberText, Trivia};
pub use crate::reorganize::{reorganize, Edges, Layout, Placement, Section};
pub use crate::rewrite::{
    process_script, process_source, ClassReport, ClassStatus, MemberReport, RewriteOptions,
    RewriteOutcome,
};
