//! Checkpoint executor for Tabula.
//!
//! A [`Checkpoint`] drives one reset end to end: read the engine catalog
//! through a [`DatabaseClient`], build the filtered dependency graph, plan a
//! safe deletion order, render dialect SQL, and execute it inside one
//! transaction. The rendered statements stay retrievable after success and
//! failure alike.

pub mod checkpoint;
pub mod client;
pub mod postgres;

pub use checkpoint::{Checkpoint, ResetState};
pub use client::DatabaseClient;
pub use postgres::PostgresClient;

pub use tabula_core::{CheckpointOptions, Engine, Error, Result};
