use std::time::Duration;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::ident::TableId;

/// Options that control what a checkpoint resets and how.
///
/// Constructed once per checkpoint instance and never mutated afterwards;
/// every stage of the pipeline reads it through a shared reference.
#[derive(Debug, Clone, Default)]
pub struct CheckpointOptions {
    pub engine: Engine,
    /// When non-empty, only these schemas are in scope.
    pub schemas_to_include: Vec<String>,
    /// Consulted only when `schemas_to_include` is empty.
    pub schemas_to_exclude: Vec<String>,
    /// When non-empty, only these tables are in scope.
    pub tables_to_include: Vec<String>,
    /// Consulted only when `tables_to_include` is empty.
    pub tables_to_ignore: Vec<String>,
    /// Discover system-versioned tables and suspend versioning around deletes
    /// (SQL Server only; a no-op elsewhere).
    pub check_temporal_tables: bool,
    /// Use the engine's truncate for tables nothing references, restoring
    /// identity counters where the engine supports it. Off by default; the
    /// unconditional delete is always safe.
    pub prefer_truncate: bool,
    /// Rendered as an engine-specific session statement ahead of the plan.
    pub command_timeout: Option<Duration>,
    /// Skip catalog re-discovery on repeated resets of the same instance.
    pub reuse_catalog: bool,
}

impl CheckpointOptions {
    /// Options scoped to a single engine with no filters.
    pub fn for_engine(engine: Engine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    /// Reject contradictory filter lists before any destructive action.
    ///
    /// `normalize` is the engine's identifier case fold, so `Foo` and `FOO`
    /// conflict on engines that compare identifiers case-insensitively.
    pub fn validate<F>(&self, normalize: F) -> Result<()>
    where
        F: Fn(&str) -> String,
    {
        if let Some(schema) = first_overlap(&self.schemas_to_include, &self.schemas_to_exclude, &normalize) {
            return Err(Error::Configuration(format!(
                "schema '{schema}' is both included and excluded"
            )));
        }
        if let Some(table) = first_overlap(&self.tables_to_include, &self.tables_to_ignore, &normalize) {
            return Err(Error::Configuration(format!(
                "table '{table}' is both included and ignored"
            )));
        }
        Ok(())
    }

    /// Whether a discovered table survives the schema and table filters.
    pub fn is_in_scope<F>(&self, table: &TableId, normalize: F) -> bool
    where
        F: Fn(&str) -> String,
    {
        let schema = normalize(&table.schema);
        let name = normalize(&table.name);

        let schema_ok = if self.schemas_to_include.is_empty() {
            !contains(&self.schemas_to_exclude, &schema, &normalize)
        } else {
            contains(&self.schemas_to_include, &schema, &normalize)
        };
        let table_ok = if self.tables_to_include.is_empty() {
            !contains(&self.tables_to_ignore, &name, &normalize)
        } else {
            contains(&self.tables_to_include, &name, &normalize)
        };

        schema_ok && table_ok
    }
}

fn contains<F>(list: &[String], normalized: &str, normalize: &F) -> bool
where
    F: Fn(&str) -> String,
{
    list.iter().any(|item| normalize(item) == normalized)
}

fn first_overlap<'a, F>(include: &'a [String], exclude: &[String], normalize: &F) -> Option<&'a str>
where
    F: Fn(&str) -> String,
{
    include
        .iter()
        .find(|item| contains(exclude, &normalize(item), normalize))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(s: &str) -> String {
        s.to_ascii_lowercase()
    }

    #[test]
    fn default_options_accept_everything() {
        let opts = CheckpointOptions::default();
        assert!(opts.validate(lower).is_ok());
        assert!(opts.is_in_scope(&TableId::new("public", "foo"), lower));
    }

    #[test]
    fn conflicting_schema_lists_are_rejected() {
        let opts = CheckpointOptions {
            schemas_to_include: vec!["A".to_string()],
            schemas_to_exclude: vec!["a".to_string()],
            ..CheckpointOptions::default()
        };
        assert!(matches!(opts.validate(lower), Err(Error::Configuration(_))));
    }

    #[test]
    fn conflicting_table_lists_are_rejected() {
        let opts = CheckpointOptions {
            tables_to_include: vec!["foo".to_string()],
            tables_to_ignore: vec!["FOO".to_string()],
            ..CheckpointOptions::default()
        };
        assert!(matches!(opts.validate(lower), Err(Error::Configuration(_))));
    }

    #[test]
    fn include_list_wins_over_absent_exclusions() {
        let opts = CheckpointOptions {
            schemas_to_include: vec!["b".to_string()],
            ..CheckpointOptions::default()
        };
        assert!(!opts.is_in_scope(&TableId::new("a", "t"), lower));
        assert!(opts.is_in_scope(&TableId::new("B", "t"), lower));
    }

    #[test]
    fn ignored_tables_fall_out_of_scope() {
        let opts = CheckpointOptions {
            tables_to_ignore: vec!["foo".to_string()],
            ..CheckpointOptions::default()
        };
        assert!(!opts.is_in_scope(&TableId::new("public", "Foo"), lower));
        assert!(opts.is_in_scope(&TableId::new("public", "bar"), lower));
    }
}
