//! Engine dialects for Tabula.
//!
//! One [`Dialect`] implementation per supported database family. A dialect
//! owns everything engine-specific: identifier quoting and case folding,
//! catalog queries for tables and foreign keys, and the DDL for suspending
//! and restoring constraints. The rest of the pipeline is engine-blind.

pub mod catalog;
pub mod dialect;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod render;
pub mod sqlite;
pub mod sqlserver;

pub use catalog::{Catalog, TemporalTable, map_relationships, map_tables, map_temporal_tables};
pub use dialect::{Dialect, dialect_for};
pub use render::render_statements;
