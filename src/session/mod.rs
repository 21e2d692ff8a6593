//! Session lifecycle: explicit state, sequential task execution and command dispatch

pub mod context;
pub mod executor;
pub mod controller;

pub use context::SessionContext;
pub use controller::{Command, Controller, Notice, RenderModel};
pub use executor::{AnalysisTask, SequentialExecutor};
