use std::time::Duration;

use tabula_core::{Engine, FkEdge, TableId};

use crate::catalog::TemporalTable;
use crate::{mysql, oracle, postgres, sqlite, sqlserver};

/// Everything the pipeline needs to know about one database family.
///
/// Catalog queries return text-typed columns only, so rows cross the
/// connection boundary as plain strings: two columns (schema, table) for
/// [`Self::table_query`], five (referencing schema, referencing table,
/// referenced schema, referenced table, constraint name) for
/// [`Self::relationship_query`].
pub trait Dialect: Send + Sync {
    fn engine(&self) -> Engine;

    /// Case fold used when comparing configured names against catalog names.
    fn normalize(&self, ident: &str) -> String {
        ident.to_ascii_lowercase()
    }

    /// Quote a single identifier part.
    fn quote(&self, ident: &str) -> String;

    fn quote_table(&self, table: &TableId) -> String {
        format!("{}.{}", self.quote(&table.schema), self.quote(&table.name))
    }

    /// Catalog query listing every user table, system objects excluded.
    fn table_query(&self) -> &'static str;

    /// Catalog query listing every foreign-key relationship.
    fn relationship_query(&self) -> &'static str;

    /// Catalog query mapping system-versioned tables to their history tables,
    /// for engines that have them.
    fn temporal_table_query(&self) -> Option<&'static str> {
        None
    }

    /// Whether the engine can suspend a foreign key for the duration of the
    /// reset. Engines answering `false` refuse cyclic graphs.
    fn supports_constraint_suspension(&self) -> bool {
        true
    }

    fn render_delete(&self, table: &TableId) -> String {
        format!("DELETE FROM {}", self.quote_table(table))
    }

    /// Fast-path truncate, only for engines where it cannot cascade beyond
    /// the one table.
    fn render_truncate(&self, _table: &TableId) -> Option<String> {
        None
    }

    /// DDL suspending (`enable == false`) or restoring one foreign key. The
    /// generator deduplicates, so engine-wide toggles may render identically
    /// for every edge.
    fn render_constraint_toggle(&self, edge: &FkEdge, enable: bool) -> String;

    /// Session statement applying the configured statement timeout.
    fn render_timeout(&self, _timeout: Duration) -> Option<String> {
        None
    }

    /// DDL toggling system versioning for one temporal table.
    fn render_versioning_toggle(&self, _table: &TemporalTable, _on: bool) -> Option<String> {
        None
    }
}

/// Resolve the dialect for a configured engine, once, up front.
pub fn dialect_for(engine: Engine) -> &'static dyn Dialect {
    match engine {
        Engine::Postgres => &postgres::Postgres,
        Engine::MySql => &mysql::MySql,
        Engine::SqlServer => &sqlserver::SqlServer,
        Engine::Oracle => &oracle::Oracle,
        Engine::Sqlite => &sqlite::Sqlite,
    }
}
