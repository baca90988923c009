//! Core contracts for Tabula.
//!
//! This crate defines the engine-agnostic pieces of the reset pipeline:
//! table and foreign-key identifiers, the checkpoint configuration, the
//! filtered dependency graph, and the deletion planner. Everything that
//! talks SQL or a wire protocol lives in the dialect and checkpoint crates.

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod ident;
pub mod plan;

pub use config::CheckpointOptions;
pub use engine::Engine;
pub use error::{Error, Result};
pub use graph::{DependencyGraph, GraphEdge};
pub use ident::{FkEdge, TableId};
pub use plan::{Action, DeletionPlan, build_plan};
