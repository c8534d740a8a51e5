//! tombgraph command shell
//!
//! Thin layer over [`tombgraph_core::Registry`]:
//! - [`shell`]: line-oriented `create`/`connect`/`remove`/`show` commands
//! - [`demo`]: the 200-children removal demonstration
//! - [`harness`]: randomized multi-threaded stress runs
//! - [`logging`]: tracing subscriber setup for the binary

pub mod demo;
pub mod harness;
pub mod logging;
pub mod shell;

pub use demo::{run_demo, DemoSummary, DEMO_CHILDREN};
pub use harness::{run_stress, StressConfig, StressReport};
pub use shell::{Command, ParseError, RunSummary, Shell};
